mod cli;

use curator::{
    catalog::{Connection, StashClient},
    config,
    context::{RunContext, Task, WriteMode},
    logging::{self, LogTarget},
    plugin, runner,
    scanner::{ScanMode, TreeScanner},
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = match cli.command {
        Commands::Plugin => LogTarget::Plugin,
        _ => LogTarget::Terminal,
    };
    logging::init(target, cli.verbose);

    match cli.command {
        Commands::Plugin => run_plugin(&cli),
        Commands::Covers {
            recent,
            apply,
            ref roots,
        } => {
            let task = Task::SceneCovers {
                scan: if recent { ScanMode::Recent } else { ScanMode::All },
                write: if apply { WriteMode::Apply } else { WriteMode::DryRun },
            };
            run_task(&cli, task, roots.clone())
        }
        Commands::Movies {
            dry_run,
            ref roots,
        } => {
            let task = Task::Movies {
                write: if dry_run { WriteMode::DryRun } else { WriteMode::Apply },
            };
            run_task(&cli, task, roots.clone())
        }
        Commands::Scan { ref roots, json } => scan(roots, json),
        Commands::Validate { ref file } => {
            let path = file.clone().or_else(|| cli.config.clone());
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("curator {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn load_config(cli: &Cli) -> Result<config::Config> {
    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    if let Some(ref url) = cli.url {
        config.catalog.url = url.clone();
    }
    if let Some(ref key) = cli.api_key {
        config.catalog.api_key = Some(key.clone());
    }
    Ok(config)
}

fn run_plugin(cli: &Cli) -> Result<()> {
    // A broken config must not keep the host from getting its status line.
    let config = load_config(cli).unwrap_or_else(|e| {
        tracing::error!("{:#}", e);
        config::Config::default()
    });

    let rt = runtime()?;
    rt.block_on(plugin::run_plugin(
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        &config,
    ))?;
    Ok(())
}

fn run_task(cli: &Cli, task: Task, roots: Vec<PathBuf>) -> Result<()> {
    let config = load_config(cli)?;
    let ctx = RunContext::new(task, &config, roots);
    let catalog = StashClient::new(&Connection::from_config(&config.catalog));

    let rt = runtime()?;
    let report = rt.block_on(runner::run(&ctx, &catalog))?;
    println!("{}", report);
    Ok(())
}

fn scan(roots: &[PathBuf], json: bool) -> Result<()> {
    let found = TreeScanner::new(roots.to_vec()).discover();

    if json {
        println!("{}", serde_json::to_string_pretty(&found_json(&found))?);
        return Ok(());
    }

    println!("Movies: {}", found.movies.len());
    for movie in &found.movies {
        println!("  {}", movie);
    }
    println!("\nGalleries: {}", found.galleries.len());
    for gallery in &found.galleries {
        println!("  {}", gallery);
    }
    Ok(())
}

fn found_json(found: &curator::scanner::Discovery) -> serde_json::Value {
    serde_json::json!({
        "movies": found.movies,
        "galleries": found.galleries,
    })
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Catalog: {}", config.catalog.url);
            println!("  API key set: {}", config.catalog.api_key.is_some());
            println!("  Scan roots: {}", config.scan.roots.len());
            println!("  Recent window: {} days", config.scan.recent_days);
            println!(
                "  Retry: {} attempts, {} ms apart",
                config.retry.max_attempts, config.retry.delay_ms
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Catalog: {}", config.catalog.url);
        }
    }

    Ok(())
}
