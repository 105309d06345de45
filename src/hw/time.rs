//! Time and cooperative scheduling services required from the platform
//!
//! The drive loop needs three kernel services: a monotonic millisecond
//! clock to bound the run window, a cooperative yield point so completion
//! handling gets CPU time between submissions, and a sleep for the settle
//! period at the end of a run. They are traits so the loop runs unchanged
//! under any RTOS or test harness.

#[cfg(test)]
use mockall::*;

/// Time in milliseconds since an arbitrary epoch, typically boot
pub type Timestamp = u64;

/// Source of monotonic wall-clock time
#[cfg_attr(test, automock)]
pub trait Uptime {
    /// Returns the time elapsed since boot in milliseconds
    ///
    /// The value is monotonically non-decreasing for the lifetime of the
    /// system.
    fn uptime_ms(&self) -> Timestamp;
}

/// Cooperative scheduling hooks
#[cfg_attr(test, automock)]
pub trait Scheduler {
    /// Gives other runnable tasks a chance to execute
    fn yield_now(&self);

    /// Suspends the calling context for at least `ms` milliseconds
    fn delay_ms(&self, ms: u32);
}
