//! Clock abstraction for cache staleness checks.

use std::time::Instant;

/// Source of monotonic time.
///
/// The quote cache measures entry age through this trait instead of
/// calling `Instant::now()` directly, so tests can advance virtual
/// time instead of sleeping through the TTL.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
