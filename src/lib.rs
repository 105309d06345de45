#![cfg_attr(not(any(test, doctest)), no_std)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

//! Enhanced ShockBurst throughput benchmark core for Nordic nRF SoCs.
//!
//! This crate implements the transmitter side of a short-packet throughput
//! test: it keeps exactly one frame in flight on an ESB-style radio link,
//! accounts confirmed bytes from asynchronous completion events, and derives
//! the achieved rate from wall-clock time. The radio engine itself is an
//! external collaborator reached through the [`EsbLink`](esb::link::EsbLink)
//! capability trait.
//!
//! Exactly one platform must be selected as a build feature. Host-side unit
//! tests and doctests use the `mocked_platform` feature.

#[cfg(not(any(feature = "mocked_platform", feature = "nrf52840")))]
compile_error!("One platform must be enabled as a build feature");

#[cfg(all(feature = "mocked_platform", feature = "nrf52840"))]
compile_error!("Cannot enable multiple platforms simultaneously (mocked and nrf52840)");

#[cfg(all(test, not(feature = "mocked_platform")))]
compile_error!("For tests \"mocked_platform\" feature shall be selected");

// This module must be declared first so the logging macros are visible to
// the rest of the crate.
#[macro_use]
mod log;

pub mod sync; // Pub to let applications share state with the radio event context

/// Defines errors reported by this crate
pub mod error;

/// Radio link facade: payloads, addressing, configuration and the capability
/// trait implemented by an ESB engine
pub mod esb;

/// Platform services required around a benchmark run
pub mod hw;

/// Indicator line banding for observing benchmark progress
pub mod leds;

/// Transmit admission/completion controller and throughput reporting
pub mod ptx;

/// Macro used to build tests on a host
///
/// It is used for unit tests and doctest targets
#[doc(hidden)]
#[macro_export]
macro_rules! missing_test_fns {
    () => {
        #[no_mangle]
        pub extern "C" fn __primask_r() -> u32 {
            0
        }

        #[no_mangle]
        pub extern "C" fn __cpsie() {}

        #[no_mangle]
        pub extern "C" fn __cpsid() {}
    };
}

#[cfg(test)]
missing_test_fns!();
