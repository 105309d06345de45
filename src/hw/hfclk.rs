//! High frequency clock startup
//!
//! Radio transmission requires the high frequency crystal oscillator to be
//! running. [`HfClock`] requests it from the CLOCK peripheral and waits a
//! bounded time for the hardware to report readiness. The request must have
//! succeeded before any frame is submitted; a failure is fatal to the
//! benchmark run.

use crate::error::Error;
use core::ops::Deref;

// Port to nRF52840
use nrf52840_hal::pac::clock;
type ClockRegisterBlock = clock::RegisterBlock;

//// Clock Periph Wrapper
//// It allows overriding the CLOCK peripheral memory space with arbitrary
//// selected memory space (like an array) in unit tests running on a host PC.
unsafe impl Send for ClockPeriphWrapper {}
struct ClockPeriphWrapper {
    ptr: *const ClockRegisterBlock,
}
impl ClockPeriphWrapper {
    pub fn new(clock: &ClockRegisterBlock) -> Self {
        ClockPeriphWrapper { ptr: clock }
    }
}
impl Deref for ClockPeriphWrapper {
    type Target = ClockRegisterBlock;
    fn deref(&self) -> &Self::Target {
        unsafe { &*self.ptr }
    }
}

/// Driver of the high frequency clock request
///
/// # Examples
///
/// ```no_run
/// # #[macro_use] extern crate nrf_esb_bench;
/// # missing_test_fns!();
/// # fn main() {
///   use nrf52840_hal::pac::Peripherals;
///   use nrf_esb_bench::hw::hfclk::HfClock;
///
///   let peripherals = Peripherals::take().unwrap();
///   let hfclk = HfClock::new(&peripherals.CLOCK);
///   hfclk.start(1000).expect("HF clock did not start");
/// # }
/// ```
pub struct HfClock {
    regs: ClockPeriphWrapper,
}

impl HfClock {
    /// Creates a new driver over the CLOCK peripheral
    pub fn new(clock: &ClockRegisterBlock) -> Self {
        Self {
            regs: ClockPeriphWrapper::new(clock),
        }
    }

    /// Requests the high frequency clock and waits until it runs
    ///
    /// The wait polls the started event at most `max_polls` times. Returns
    /// [`Err(Error::ClockTimeout)`](Error::ClockTimeout) when the budget is
    /// exhausted; the caller must abort the run before submitting any frame.
    pub fn start(&self, max_polls: u32) -> Result<(), Error> {
        self.regs
            .tasks_hfclkstart
            .write(|w| w.tasks_hfclkstart().set_bit());

        for _ in 0..max_polls {
            if self
                .regs
                .events_hfclkstarted
                .read()
                .events_hfclkstarted()
                .bit_is_set()
            {
                self.regs
                    .events_hfclkstarted
                    .write(|w| w.events_hfclkstarted().clear_bit());
                info!("HF clock started");
                return Ok(());
            }
        }

        error!("HF clock could not be started");
        Err(Error::ClockTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // CLOCK peripheral mock
    #[repr(align(4))]
    struct ClockMock {
        memory: [u8; 4096],
    }

    impl ClockMock {
        pub fn new() -> Self {
            Self { memory: [0; 4096] }
        }
    }

    impl Deref for ClockMock {
        type Target = ClockRegisterBlock;
        fn deref(&self) -> &Self::Target {
            let ptr: *const ClockRegisterBlock = self.memory.as_ptr() as *const _;
            unsafe { ptr.as_ref().unwrap() }
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_start_succeeds_once_hardware_reports_the_clock() {
        let clock_mock = ClockMock::new();
        let hfclk = HfClock::new(&clock_mock);

        clock_mock
            .events_hfclkstarted
            .write(|w| w.events_hfclkstarted().set_bit());

        assert_eq!(hfclk.start(16), Ok(()));

        // The start task was triggered and the started event consumed
        assert_eq!(
            u32::from_le_bytes(clock_mock.memory[0..4].try_into().unwrap()),
            1
        );
        assert!(clock_mock
            .events_hfclkstarted
            .read()
            .events_hfclkstarted()
            .bit_is_clear());
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_start_times_out_when_the_clock_never_reports() {
        let clock_mock = ClockMock::new();
        let hfclk = HfClock::new(&clock_mock);

        assert_eq!(hfclk.start(16), Err(Error::ClockTimeout));
    }
}
