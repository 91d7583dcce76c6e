//! Injectable wall-clock.
//!
//! Fallback generators are pure functions of their input, with one sanctioned
//! exception: display strings that mention the current date (e.g. the
//! certificate award line). That read goes through [`Clock`] so tests can pin
//! the time with [`FixedClock`].

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// **Interaction**: injected via [`FlowContext`](crate::flow::FlowContext) and
/// [`NotificationCenter`](crate::notify::NotificationCenter); production code
/// uses [`SystemClock`], tests use [`FixedClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the real system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the instant it was constructed with.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
