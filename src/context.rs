//! Immutable description of one run.

use crate::config::Config;
use crate::retry::RetryPolicy;
use crate::scanner::ScanMode;
use std::path::PathBuf;

/// Whether writes reach the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Apply,
    /// Lookups run, writes are only logged.
    DryRun,
}

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Apply `poster.*`/`cover.*` files to the scenes in the same directory.
    SceneCovers { scan: ScanMode, write: WriteMode },
    /// Create movies and galleries from directories and link their scenes and images.
    Movies { write: WriteMode },
}

impl Task {
    /// Map the plugin `mode` argument to a task.
    ///
    /// Unknown or missing modes run a report-only cover pass.
    pub fn from_mode_arg(mode: Option<&str>) -> Self {
        match mode {
            Some("set_cover") => Self::SceneCovers {
                scan: ScanMode::All,
                write: WriteMode::Apply,
            },
            Some("set_cover_recent") => Self::SceneCovers {
                scan: ScanMode::Recent,
                write: WriteMode::Apply,
            },
            Some("generate_movies") => Self::Movies {
                write: WriteMode::Apply,
            },
            _ => Self::SceneCovers {
                scan: ScanMode::All,
                write: WriteMode::DryRun,
            },
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        match *self {
            Self::SceneCovers { write, .. } | Self::Movies { write } => write,
        }
    }
}

/// Everything a run needs besides the catalog connection.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub task: Task,
    /// Roots to scan instead of asking the catalog. Empty means ask.
    pub roots: Vec<PathBuf>,
    pub retry: RetryPolicy,
    /// Lookback for [`ScanMode::Recent`], in days.
    pub recent_days: u32,
}

impl RunContext {
    /// Context for `task` with scan and retry settings taken from `config`.
    ///
    /// `roots` overrides `scan.roots` when non-empty.
    pub fn new(task: Task, config: &Config, roots: Vec<PathBuf>) -> Self {
        let roots = if roots.is_empty() {
            config.scan.roots.clone()
        } else {
            roots
        };

        Self {
            task,
            roots,
            retry: config.retry.policy(),
            recent_days: config.scan.recent_days,
        }
    }
}
