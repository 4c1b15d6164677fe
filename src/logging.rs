//! Log output setup.
//!
//! On a terminal, logs are plain `tracing-subscriber` lines on stderr. As a
//! host plugin, each line is prefixed with the host's level marker
//! (`\x01` + level char + `\x02`) so the host can file it under the right level.

use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Where logs are going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Terminal,
    Plugin,
}

/// Filter directives, unless `RUST_LOG` is set.
pub fn default_filter(verbose: bool) -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "curator=debug,curator_common=debug".to_string()
        } else {
            "curator=info,curator_common=info".to_string()
        }
    })
}

/// Install the global subscriber.
pub fn init(target: LogTarget, verbose: bool) {
    let env_filter = default_filter(verbose);

    match target {
        LogTarget::Terminal => tracing_subscriber::fmt()
            .with_env_filter(&env_filter)
            .with_writer(std::io::stderr)
            .init(),
        LogTarget::Plugin => tracing_subscriber::fmt()
            .with_env_filter(&env_filter)
            .with_writer(std::io::stderr)
            .event_format(PluginLogFormat)
            .init(),
    }
}

/// Event format understood by the plugin host.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginLogFormat;

impl PluginLogFormat {
    fn level_char(level: &Level) -> char {
        match *level {
            Level::TRACE => 't',
            Level::DEBUG => 'd',
            Level::INFO => 'i',
            Level::WARN => 'w',
            Level::ERROR => 'e',
        }
    }
}

impl<S, N> FormatEvent<S, N> for PluginLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = Self::level_char(event.metadata().level());
        write!(writer, "\x01{}\x02", level)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
