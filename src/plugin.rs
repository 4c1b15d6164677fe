//! Host plugin protocol.
//!
//! The host starts the process with a JSON job description on stdin and
//! reads a single status line from stdout. Every run ends with
//! `{"output":"ok"}`, whatever happened in between; failures only show up in
//! the logs.

use crate::catalog::{Connection, SessionCookie, StashClient};
use crate::config::Config;
use crate::context::{RunContext, Task};
use crate::runner;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{Read, Write};

/// Job description sent by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginInput {
    pub server_connection: ServerConnection,
    #[serde(default)]
    pub args: PluginArgs,
}

/// Where the host's catalog is listening, and how to authenticate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerConnection {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub session_cookie: Option<HostCookie>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostCookie {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginArgs {
    #[serde(default)]
    pub mode: Option<String>,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

impl ServerConnection {
    /// Base URL of the catalog. A wildcard bind address is reached via localhost.
    pub fn base_url(&self) -> String {
        let host = match self.host.as_str() {
            "" | "0.0.0.0" => "localhost",
            host => host,
        };
        format!("{}://{}:{}", self.scheme.to_lowercase(), host, self.port)
    }

    pub fn to_connection(&self, config: &Config) -> Connection {
        Connection {
            url: self.base_url(),
            api_key: self
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .or_else(|| config.catalog.api_key.clone())
                .filter(|key| !key.is_empty()),
            session_cookie: self.session_cookie.as_ref().map(|c| SessionCookie {
                name: c.name.clone(),
                value: c.value.clone(),
            }),
            timeout: config.catalog.timeout(),
        }
    }
}

/// The line written to stdout at the end of every run.
pub fn completion_line() -> String {
    serde_json::json!({ "output": "ok" }).to_string()
}

/// Parse the job description.
pub fn read_input<R: Read>(mut reader: R) -> Result<PluginInput> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("Failed to read plugin input")?;
    serde_json::from_str(&raw).context("Failed to parse plugin input")
}

/// Run one plugin job, reading the job from `input` and writing the status to `output`.
///
/// Errors from the job itself are logged and swallowed; only a failure to
/// write the status line is returned.
pub async fn run_plugin<R: Read, W: Write>(
    input: R,
    mut output: W,
    config: &Config,
) -> std::io::Result<()> {
    if let Err(e) = run_job(input, config).await {
        tracing::error!("{:#}", e);
    }

    writeln!(output, "{}", completion_line())?;
    output.flush()
}

async fn run_job<R: Read>(input: R, config: &Config) -> Result<()> {
    let job = read_input(input)?;
    let task = Task::from_mode_arg(job.args.mode.as_deref());
    let ctx = RunContext::new(task, config, Vec::new());

    let connection = job.server_connection.to_connection(config);
    tracing::debug!("Connecting to catalog at {}", connection.url);
    let catalog = StashClient::new(&connection);

    runner::run(&ctx, &catalog).await?;
    Ok(())
}
