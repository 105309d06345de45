use crate::hw::time::Timestamp;
use core::fmt;

/// Result of a finished throughput run
///
/// A pure value derived exactly once after the drive loop has terminated
/// and the settle period has passed; it never changes afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TxReport {
    payload_length: usize,
    sent_bytes: u32,
    received_bytes: u32,
    elapsed_ms: Timestamp,
}

impl TxReport {
    pub(crate) fn new(
        payload_length: usize,
        sent_bytes: u32,
        received_bytes: u32,
        elapsed_ms: Timestamp,
    ) -> Self {
        Self {
            payload_length,
            sent_bytes,
            received_bytes,
            elapsed_ms,
        }
    }

    /// Payload length of the transmitted frames in bytes
    pub fn payload_length(&self) -> usize {
        self.payload_length
    }

    /// Number of payload bytes confirmed sent
    pub fn sent_bytes(&self) -> u32 {
        self.sent_bytes
    }

    /// Number of payload bytes drained from the receive path
    pub fn received_bytes(&self) -> u32 {
        self.received_bytes
    }

    /// Wall-clock duration of the transmit loop in milliseconds
    pub fn elapsed_ms(&self) -> Timestamp {
        self.elapsed_ms
    }

    /// Achieved throughput in kilobits per second
    ///
    /// Returns `None` when the run finished below the clock resolution; the
    /// rate is unmeasurable then, not infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate nrf_esb_bench;
    /// # missing_test_fns!();
    /// # fn main() {
    ///   use nrf_esb_bench::esb::link::Event;
    ///   use nrf_esb_bench::esb::mock_link::MockLink;
    ///   use nrf_esb_bench::hw::time::{Scheduler, Timestamp, Uptime};
    ///   use nrf_esb_bench::ptx::{self, controller::TxController};
    ///
    ///   static LINK: MockLink = MockLink::new();
    ///   static CONTROLLER: TxController<MockLink> = TxController::new(&LINK);
    ///
    ///   // Test doubles standing in for the platform's kernel services.
    ///   struct Kernel;
    ///   impl Scheduler for Kernel {
    ///     fn yield_now(&self) {
    ///       CONTROLLER.handle_event(&Event::TxSuccess);
    ///     }
    ///     fn delay_ms(&self, _ms: u32) {}
    ///   }
    ///   impl Uptime for Kernel {
    ///     fn uptime_ms(&self) -> Timestamp { 0 }
    ///   }
    ///
    ///   MockLink::reset();
    ///   let mut payload = ptx::test_payload();
    ///   let report = CONTROLLER.run(&mut payload, 10, &Kernel, &Kernel);
    ///
    ///   assert_eq!(report.sent_bytes(), 10 * 252);
    ///   assert_eq!(report.throughput_kbps(), None); // zero elapsed time
    /// # }
    /// ```
    pub fn throughput_kbps(&self) -> Option<u64> {
        if self.elapsed_ms == 0 {
            None
        } else {
            Some(u64::from(self.sent_bytes) * 8 / self.elapsed_ms)
        }
    }

    /// Emits the human readable result line through the configured logger
    pub fn log(&self) {
        match self.throughput_kbps() {
            Some(kbps) => info!(
                "TX throughput, {} byte payloads in {} ms at {} kbps",
                self.payload_length, self.elapsed_ms, kbps
            ),
            None => info!(
                "TX throughput unmeasurable, {} bytes sent below the clock resolution",
                self.sent_bytes
            ),
        }
    }
}

impl fmt::Display for TxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.throughput_kbps() {
            Some(kbps) => write!(
                f,
                "TX throughput, {} byte payloads in {} ms at {} kbps",
                self.payload_length, self.elapsed_ms, kbps
            ),
            None => write!(
                f,
                "TX throughput unmeasurable, {} bytes sent below the clock resolution",
                self.sent_bytes
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_run_rate() {
        let report = TxReport::new(252, 252_000, 0, 500);

        assert_eq!(report.throughput_kbps(), Some(4032));
    }

    #[test]
    fn test_zero_elapsed_time_is_unmeasurable() {
        let report = TxReport::new(252, 252_000, 0, 0);

        assert_eq!(report.throughput_kbps(), None);
    }

    #[test]
    fn test_display_renders_the_result_line() {
        let report = TxReport::new(252, 252_000, 0, 500);

        assert_eq!(
            report.to_string(),
            "TX throughput, 252 byte payloads in 500 ms at 4032 kbps"
        );
    }

    #[test]
    fn test_display_renders_the_unmeasurable_line() {
        let report = TxReport::new(252, 504, 0, 0);

        assert_eq!(
            report.to_string(),
            "TX throughput unmeasurable, 504 bytes sent below the clock resolution"
        );
    }

    #[test]
    fn test_rate_math_does_not_overflow_u32_counters() {
        let report = TxReport::new(252, u32::MAX, 0, 1);

        assert_eq!(report.throughput_kbps(), Some(u64::from(u32::MAX) * 8));
    }
}
