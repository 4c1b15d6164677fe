//! Time window for recent-only scans.

use chrono::{DateTime, Duration, Utc};
use std::time::SystemTime;

/// Trailing window ending at scan start.
///
/// Computed once per scan so every file is judged against the same boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ScanWindow {
    /// Window of `lookback` ending at `end`.
    ///
    /// A lookback reaching past the earliest representable time starts there.
    pub fn trailing(end: DateTime<Utc>, lookback: Duration) -> Self {
        Self {
            start: end
                .checked_sub_signed(lookback)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end,
        }
    }

    /// Window of `days` days ending now.
    pub fn last_days(days: u32) -> Self {
        Self::trailing(Utc::now(), Duration::days(i64::from(days)))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether a modification time is recent enough.
    ///
    /// Only the lower bound is checked: files stamped after scan start (clock
    /// skew, copies in progress) still count as recent.
    pub fn contains(&self, modified: SystemTime) -> bool {
        DateTime::<Utc>::from(modified) >= self.start
    }
}
