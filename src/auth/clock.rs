//! Timestamp generation for Binance signed requests.
//!
//! Every signed request carries a `timestamp` in Unix milliseconds. The
//! server rejects requests whose timestamp falls outside its receive window
//! (5000ms by default), so it must be taken when the request is built.

use time::OffsetDateTime;

/// Trait for providing request timestamps.
///
/// The default [`SystemClock`] reads the wall clock. Tests pin the clock by
/// supplying a fixed implementation.
pub trait TimestampProvider: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn timestamp_ms(&self) -> u64;
}

/// Wall-clock timestamp provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimestampProvider for SystemClock {
    fn timestamp_ms(&self) -> u64 {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        u64::try_from(millis).unwrap_or_default()
    }
}

/// A timestamp provider that always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl TimestampProvider for FixedClock {
    fn timestamp_ms(&self) -> u64 {
        self.0
    }
}
