//! Timeout helpers used across the crate.
//!
//! Keep these helpers minimal: they centralize the commonly used default
//! poll bound and provide a small conversion helper so tests and hosts can
//! express timeouts in milliseconds clearly.

use std::time::Duration;

/// Default bound in milliseconds for one status-change wait. The polling
/// loop regains control at least this often.
pub const DEFAULT_POLL_TIMEOUT_MS: u32 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default poll bound as Duration.
pub fn default_poll_timeout() -> Duration {
    ms(DEFAULT_POLL_TIMEOUT_MS as u64)
}
