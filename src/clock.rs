//! Time source for the `exp` / `nbf` checks
//!
//! A parser reads "now" through a [`TimeFunc`] rather than the system clock
//! directly, so validation can be made deterministic.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current time as seconds since the Unix epoch
pub type TimeFunc = Arc<dyn Fn() -> i64 + Send + Sync + 'static>;

/// Get current Unix timestamp from the system clock
pub fn system_time() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// The default time source
pub fn system() -> TimeFunc {
    Arc::new(system_time)
}

/// A time source frozen at `timestamp`
pub fn fixed(timestamp: i64) -> TimeFunc {
    Arc::new(move || timestamp)
}
