use super::report::TxReport;
use crate::esb::link::{EsbLink, Event};
use crate::esb::payload::Payload;
use crate::hw::time::{Scheduler, Timestamp, Uptime};
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

/// Grace period between the end of the drive loop and reading the counters,
/// letting the last in-flight completion event land
pub const SETTLE_MS: u32 = 500;

/// Gatekeeper of the benchmark transmit path
///
/// The controller couples two execution contexts: [`run`](TxController::run)
/// drives submissions from thread context while
/// [`handle_event`](TxController::handle_event) accounts completions from the
/// link's event context. They share a single-slot in-flight gate and the two
/// byte counters, with one writer per direction: only the drive loop closes
/// the gate, only the event handler opens it and touches the counters.
///
/// The constructor is `const` so a controller can live in a `static` next to
/// its link, reachable from the event handler registered with the link:
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate nrf_esb_bench;
/// # missing_test_fns!();
/// # fn main() {
///   use nrf_esb_bench::esb::link::{Context, Event};
///   use nrf_esb_bench::esb::mock_link::MockLink;
///   use nrf_esb_bench::ptx::controller::TxController;
///
///   static LINK: MockLink = MockLink::new();
///   static CONTROLLER: TxController<MockLink> = TxController::new(&LINK);
///
///   // Registered as `Config::event_handler`; the link's event context calls
///   // it once per completed operation.
///   fn event_handler(event: &Event, _context: Context) {
///     CONTROLLER.handle_event(event);
///   }
///
///   MockLink::reset();
///   event_handler(&Event::TxSuccess, &None::<u8>);
///   assert_eq!(CONTROLLER.sent_bytes(), 0); // nothing was submitted yet
/// # }
/// ```
pub struct TxController<'link, L: EsbLink> {
    link: &'link L,
    // Open (true) when no frame is owned by the link
    ready: AtomicBool,
    // Length of the frame most recently handed to the link
    tx_length: AtomicUsize,
    sent_bytes: AtomicU32,
    received_bytes: AtomicU32,
}

impl<'link, L: EsbLink> TxController<'link, L> {
    /// Creates a controller driving `link`
    pub const fn new(link: &'link L) -> Self {
        Self {
            link,
            ready: AtomicBool::new(true),
            tx_length: AtomicUsize::new(0),
            sent_bytes: AtomicU32::new(0),
            received_bytes: AtomicU32::new(0),
        }
    }

    /// Number of payload bytes confirmed sent so far
    ///
    /// Increases only inside [`handle_event`](TxController::handle_event).
    pub fn sent_bytes(&self) -> u32 {
        self.sent_bytes.load(Ordering::Acquire)
    }

    /// Number of payload bytes drained from the receive path so far
    ///
    /// Increases only inside [`handle_event`](TxController::handle_event).
    pub fn received_bytes(&self) -> u32 {
        self.received_bytes.load(Ordering::Acquire)
    }

    /// Processes one completion event from the link
    ///
    /// Called from the link's event context, concurrently with
    /// [`run`](TxController::run). Every path reopens the in-flight gate
    /// exactly once; a path missing the reopen would deadlock the drive
    /// loop. Reopening is the last action so the drive loop observes the
    /// counter updates of this event.
    pub fn handle_event(&self, event: &Event) {
        match event {
            Event::TxSuccess => {
                debug!("TX SUCCESS EVENT");
                let length = self.tx_length.load(Ordering::Acquire) as u32;
                self.sent_bytes.fetch_add(length, Ordering::AcqRel);
            }
            Event::TxFailed => {
                // Not counted: the benchmark reports realized throughput,
                // not guaranteed delivery.
                debug!("TX FAILED EVENT");
            }
            Event::RxReceived => {
                // The link may buffer several frames between handler
                // invocations; anything left here would be lost.
                while let Some(payload) = self.link.read_rx_payload() {
                    debug!("Packet received, len {}", payload.len());
                    self.received_bytes
                        .fetch_add(payload.len() as u32, Ordering::AcqRel);
                }
            }
        }

        self.ready.store(true, Ordering::Release);
    }

    /// Transmits `frames` frames back-to-back and reports the achieved rate
    ///
    /// Each iteration waits cooperatively until the gate is open, so at most
    /// one frame is ever owned by the link. The payload marker is advanced
    /// after every submission. A synchronous submission error is logged and
    /// the frame is skipped; the asynchronous [`Event::TxFailed`] outcome is
    /// accounted by [`handle_event`](TxController::handle_event).
    ///
    /// After the last iteration the loop sleeps [`SETTLE_MS`] before reading
    /// the counters, giving the final completion event time to land. The
    /// elapsed time is captured before that sleep.
    pub fn run<S, U>(
        &self,
        payload: &mut Payload,
        frames: u32,
        scheduler: &S,
        uptime: &U,
    ) -> TxReport
    where
        S: Scheduler,
        U: Uptime,
    {
        let start: Timestamp = uptime.uptime_ms();

        for _ in 0..frames {
            while !self.ready.load(Ordering::Acquire) {
                scheduler.yield_now();
            }
            self.ready.store(false, Ordering::Relaxed);

            // Discard anything queued but unsent before submitting anew
            self.link.flush_tx();

            self.tx_length.store(payload.len(), Ordering::Release);
            if let Err(error) = self.link.write_payload(payload) {
                error!("Payload write failed, err {}", error);
                // A rejected submission never reaches the radio and produces
                // no completion event; reopen the gate here instead of
                // waiting for one that cannot arrive.
                self.ready.store(true, Ordering::Release);
            }

            payload.bump_marker();
            scheduler.yield_now();
        }

        let elapsed = uptime.uptime_ms().saturating_sub(start);
        scheduler.delay_ms(SETTLE_MS);

        TxReport::new(
            payload.len(),
            self.sent_bytes(),
            self.received_bytes(),
            elapsed,
        )
    }
}
