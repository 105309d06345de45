//! Mutual exclusion for state shared with the radio event context.
//!
//! The radio link delivers completion events from an interrupt-like context
//! which may preempt the benchmark's thread context at any instruction.
//! State observed by both contexts must be accessed only while that
//! preemption is impossible. [`locked`] provides the proof as a
//! [`CriticalSection`] token and [`Mutex`] releases its content only against
//! such a token.

use core::cell::{Ref, RefCell, RefMut};

/// Proof that the radio event context cannot preempt the current context
pub struct CriticalSection<'a> {
    _token: &'a cortex_m::interrupt::CriticalSection,
}

/// Runs `f` with the radio event context masked out
///
/// TODO: mask only the radio IRQ instead of disabling all interrupts
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate nrf_esb_bench;
/// # missing_test_fns!();
/// # fn main() {
/// use nrf_esb_bench::sync::{self, Mutex};
///
/// static DRAINED_FRAMES: Mutex<u32> = Mutex::new(0);
///
/// sync::locked(|cs_token| {
///   *DRAINED_FRAMES.borrow_mut(cs_token) += 1;
/// });
/// # }
/// ```
pub fn locked<F, R>(f: F) -> R
where
    F: FnOnce(&CriticalSection) -> R,
{
    cortex_m::interrupt::free(|cs| f(&CriticalSection { _token: cs }))
}

/// Wraps a variable which is accessible from the radio event context
pub struct Mutex<T>(RefCell<T>);

impl<T> Mutex<T> {
    /// Creates a new wrapper for a variable shared with the radio event context
    pub const fn new(value: T) -> Mutex<T> {
        Self(RefCell::new(value))
    }

    /// Borrows the wrapped variable with mutually exclusive access
    pub fn borrow<'cs>(&'cs self, _cs: &'cs CriticalSection) -> Ref<'cs, T> {
        self.0.borrow()
    }

    /// Mutably borrows the wrapped variable with mutually exclusive access
    pub fn borrow_mut<'cs>(&'cs self, _cs: &'cs CriticalSection) -> RefMut<'cs, T> {
        self.0.borrow_mut()
    }
}

// Safety: the CriticalSection token required by both borrow methods proves
// that no other context can run concurrently. The RefCell inside verifies at
// run time that the proof was not circumvented.
unsafe impl<T> Sync for Mutex<T> where T: Send {}
