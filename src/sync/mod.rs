//! Catalog synchronization.
//!
//! [`CatalogSyncer`] resolves discovered entities against the catalog and
//! applies the missing associations. Each entity is processed on its own: a
//! failure is logged, counted in the [`SyncReport`], and the batch continues.

mod covers;
mod galleries;
mod movies;

use crate::catalog::{CatalogClient, CatalogError};
use crate::context::{RunContext, WriteMode};
use crate::retry::{write_with_retry, RetryPolicy, WriteOutcome};
use std::fmt;
use std::future::Future;
use tracing::error;

/// Counters for one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entities created in the catalog.
    pub created: usize,
    /// Entities that already existed and were reused.
    pub reused: usize,
    /// Associations or covers written.
    pub linked: usize,
    /// Associations that already existed.
    pub skipped: usize,
    /// Entities or writes abandoned after an error.
    pub failed: usize,
}

impl SyncReport {
    pub fn merge(&mut self, other: SyncReport) {
        self.created += other.created;
        self.reused += other.reused;
        self.linked += other.linked;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} reused, {} linked, {} skipped, {} failed",
            self.created, self.reused, self.linked, self.skipped, self.failed
        )
    }
}

/// Applies scan results to the catalog.
pub struct CatalogSyncer<'a> {
    catalog: &'a dyn CatalogClient,
    retry: RetryPolicy,
    write: WriteMode,
}

impl<'a> CatalogSyncer<'a> {
    pub fn new(catalog: &'a dyn CatalogClient, ctx: &RunContext) -> Self {
        Self {
            catalog,
            retry: ctx.retry,
            write: ctx.task.write_mode(),
        }
    }

    fn dry_run(&self) -> bool {
        self.write == WriteMode::DryRun
    }

    /// Run one write through the retry policy, logging a failed outcome.
    async fn write<T, F, Fut>(&self, label: &str, operation: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        match write_with_retry(&self.retry, label, operation).await {
            WriteOutcome::Done(value) => Some(value),
            WriteOutcome::Exhausted { attempts, .. } => {
                error!("Failed to {} after {} retries", label, attempts);
                None
            }
            WriteOutcome::Failed(e) => {
                error!("Failed to {}: {}", label, e);
                None
            }
        }
    }
}
