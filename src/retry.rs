//! Bounded retry for catalog writes.
//!
//! A write that fails because the catalog database is temporarily locked is
//! retried after a fixed delay, up to [`RetryPolicy::max_attempts`] total
//! attempts. Any other failure is terminal and reported on the first attempt.
//!
//! ```text
//! Pending ──ok──────────────────────────────▶ Done
//!    │ locked, attempts < max ──sleep──▶ Pending
//!    │ locked, attempts = max ─────────▶ Exhausted
//!    └ other error ────────────────────▶ Failed
//! ```

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::catalog::CatalogError;

/// How often and how patiently to retry a locked write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed wait between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(1),
        }
    }
}

/// Terminal state of a retried write.
#[derive(Debug)]
pub enum WriteOutcome<T> {
    /// The write succeeded.
    Done(T),
    /// Every attempt hit the transient lock condition.
    Exhausted { attempts: u32, last_error: CatalogError },
    /// A non-transient error; no retry was made.
    Failed(CatalogError),
}


/// Run `operation` until it succeeds, fails terminally, or runs out of attempts.
///
/// `label` names the write in log lines, e.g. `"update scene 17"`.
pub async fn write_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> WriteOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return WriteOutcome::Done(value),
            Err(e) if e.is_retryable() => {
                if attempt >= max_attempts {
                    return WriteOutcome::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    };
                }
                warn!(
                    attempt,
                    max_attempts,
                    "Database locked during {}, retrying in {:?}",
                    label,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return WriteOutcome::Failed(e),
        }
    }
}
