//! Scripted radio link for unit tests
//!
//! [`MockLink`] records what the benchmark does to the link and plays back
//! results selected by the test. All instances share a single global state,
//! so tests using it must run serialized and call [`MockLink::reset`] first.

#[cfg(not(feature = "mocked_platform"))]
compile_error!("MockLink cannot be used on real hardware");

use super::addresses::Addresses;
use super::config::Config;
use super::link::EsbLink;
use super::payload::{Payload, MAX_PAYLOAD_LENGTH};
use crate::error::Error;
use crate::sync::Mutex;
use core::cell::RefCell;

const RX_QUEUE_LEN: usize = 4;

struct State {
    config: Option<Config>,
    addresses: Option<Addresses>,
    write_error: Option<Error>,
    written: u32,
    last_written: Option<Payload>,
    unflushed_writes: u32,
    flush_pending: bool,
    flushed: u32,
    rx_queue: [Option<Payload>; RX_QUEUE_LEN],
}

impl State {
    fn new() -> Self {
        Self {
            config: None,
            addresses: None,
            write_error: None,
            written: 0,
            last_written: None,
            unflushed_writes: 0,
            flush_pending: false,
            flushed: 0,
            // using a magic number because of https://github.com/JoshMcguigan/arr_macro/issues/2
            rx_queue: arr_macro::arr![None; 4],
        }
    }
}

static STATE: Mutex<RefCell<Option<State>>> = Mutex::new(RefCell::new(None));

/// Phantom handle to the link mock singleton
///
/// The instance content is irrelevant; every method call operates on the
/// global singleton state. The constructor is `const` so a handle can be
/// placed in a `static` and borrowed by a controller living next to it.
pub struct MockLink {}

impl MockLink {
    /// Creates a phantom handle to the link mock singleton
    pub const fn new() -> Self {
        Self {}
    }

    /// Reset module
    ///
    /// This function is intended to be used between unit tests
    #[doc(hidden)]
    pub fn reset() {
        crate::sync::locked(|cs| {
            STATE.borrow(cs).replace(Some(State::new()));
        });
    }

    /// Helper function to access the singleton state, initializing it on
    /// first use
    fn use_state<F, R>(func: F) -> R
    where
        F: FnOnce(&mut State) -> R,
    {
        crate::sync::locked(|cs| {
            let binding = STATE.borrow(cs);
            let mut state_option = binding.borrow_mut();
            let state = state_option.get_or_insert_with(State::new);
            func(state)
        })
    }

    /// Makes following [`write_payload`](EsbLink::write_payload) calls fail
    /// with `error`
    pub fn fail_writes_with(error: Error) {
        Self::use_state(|s| s.write_error = Some(error));
    }

    /// Makes following [`write_payload`](EsbLink::write_payload) calls
    /// succeed again
    pub fn accept_writes() {
        Self::use_state(|s| s.write_error = None);
    }

    /// Buffers a payload to be handed out by
    /// [`read_rx_payload`](EsbLink::read_rx_payload)
    pub fn buffer_rx_payload(payload: Payload) {
        Self::use_state(|s| {
            let slot = s.rx_queue.iter_mut().find(|slot| slot.is_none());
            *slot.expect("mocked rx queue is full") = Some(payload);
        });
    }

    /// Number of accepted [`write_payload`](EsbLink::write_payload) calls
    pub fn written_count() -> u32 {
        Self::use_state(|s| s.written)
    }

    /// The payload most recently accepted by
    /// [`write_payload`](EsbLink::write_payload)
    pub fn last_written() -> Option<Payload> {
        Self::use_state(|s| s.last_written.clone())
    }

    /// Number of accepted writes that were not preceded by a
    /// [`flush_tx`](EsbLink::flush_tx) call
    pub fn unflushed_writes() -> u32 {
        Self::use_state(|s| s.unflushed_writes)
    }

    /// Number of [`flush_tx`](EsbLink::flush_tx) calls
    pub fn flush_count() -> u32 {
        Self::use_state(|s| s.flushed)
    }

    /// The configuration applied by [`configure`](EsbLink::configure)
    pub fn configured() -> Option<Config> {
        Self::use_state(|s| s.config.clone())
    }

    /// The address table programmed by
    /// [`set_addresses`](EsbLink::set_addresses)
    pub fn addresses() -> Option<Addresses> {
        Self::use_state(|s| s.addresses.clone())
    }
}

impl EsbLink for MockLink {
    fn configure(&self, config: &Config) -> Result<(), Error> {
        if config.payload_length == 0 || config.payload_length > MAX_PAYLOAD_LENGTH {
            return Err(Error::InvalidConfig);
        }

        Self::use_state(|s| {
            s.config = Some(config.clone());
            Ok(())
        })
    }

    fn set_addresses(&self, addresses: &Addresses) -> Result<(), Error> {
        Self::use_state(|s| {
            s.addresses = Some(addresses.clone());
            Ok(())
        })
    }

    fn write_payload(&self, payload: &Payload) -> Result<(), Error> {
        Self::use_state(|s| match s.write_error {
            Some(error) => Err(error),
            None => {
                if !s.flush_pending {
                    s.unflushed_writes += 1;
                }
                s.flush_pending = false;
                s.written += 1;
                s.last_written = Some(payload.clone());
                Ok(())
            }
        })
    }

    fn flush_tx(&self) {
        Self::use_state(|s| {
            s.flush_pending = true;
            s.flushed += 1;
        });
    }

    fn read_rx_payload(&self) -> Option<Payload> {
        Self::use_state(|s| {
            s.rx_queue
                .iter_mut()
                .find(|slot| slot.is_some())
                .and_then(|slot| slot.take())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_write_payload_records_accepted_frames() {
        MockLink::reset();
        let link = MockLink::new();

        let payload = Payload::new(&[1, 2, 3], 0, false).unwrap();
        assert_eq!(link.write_payload(&payload), Ok(()));

        assert_eq!(MockLink::written_count(), 1);
        assert_eq!(MockLink::last_written(), Some(payload));
    }

    #[test]
    #[serial]
    fn test_write_payload_plays_back_scripted_error() {
        MockLink::reset();
        let link = MockLink::new();
        let payload = Payload::new(&[1], 0, false).unwrap();

        MockLink::fail_writes_with(Error::TxQueueFull);
        assert_eq!(link.write_payload(&payload), Err(Error::TxQueueFull));
        assert_eq!(MockLink::written_count(), 0);

        MockLink::accept_writes();
        assert_eq!(link.write_payload(&payload), Ok(()));
        assert_eq!(MockLink::written_count(), 1);
    }

    #[test]
    #[serial]
    fn test_unflushed_writes_are_counted() {
        MockLink::reset();
        let link = MockLink::new();
        let payload = Payload::new(&[1], 0, false).unwrap();

        link.write_payload(&payload).unwrap();
        assert_eq!(MockLink::unflushed_writes(), 1);

        link.flush_tx();
        link.write_payload(&payload).unwrap();
        assert_eq!(MockLink::unflushed_writes(), 1);
        assert_eq!(MockLink::flush_count(), 1);
    }

    #[test]
    #[serial]
    fn test_rx_queue_hands_out_payloads_in_order() {
        MockLink::reset();
        let link = MockLink::new();

        MockLink::buffer_rx_payload(Payload::new(&[1], 1, false).unwrap());
        MockLink::buffer_rx_payload(Payload::new(&[2, 2], 1, false).unwrap());

        assert_eq!(link.read_rx_payload().unwrap().len(), 1);
        assert_eq!(link.read_rx_payload().unwrap().len(), 2);
        assert_eq!(link.read_rx_payload(), None);
    }

    #[test]
    #[serial]
    fn test_configure_and_set_addresses_record_their_arguments() {
        MockLink::reset();
        let link = MockLink::new();

        fn event_handler(_event: &crate::esb::link::Event, _context: crate::esb::link::Context) {}

        let config = Config::new(event_handler, &None::<u8>);
        assert_eq!(link.configure(&config), Ok(()));
        assert_eq!(link.set_addresses(&Addresses::default()), Ok(()));

        assert_eq!(
            MockLink::configured().unwrap().payload_length,
            MAX_PAYLOAD_LENGTH
        );
        assert_eq!(MockLink::addresses(), Some(Addresses::default()));
    }

    #[test]
    #[serial]
    fn test_configure_rejects_oversized_payload_length() {
        MockLink::reset();
        let link = MockLink::new();

        fn event_handler(_event: &crate::esb::link::Event, _context: crate::esb::link::Context) {}

        let mut config = Config::new(event_handler, &None::<u8>);
        config.payload_length = MAX_PAYLOAD_LENGTH + 1;

        assert_eq!(link.configure(&config), Err(Error::InvalidConfig));
        assert!(MockLink::configured().is_none());
    }

    #[test]
    #[serial]
    fn test_reset_clears_recorded_state() {
        MockLink::reset();
        let link = MockLink::new();

        link.write_payload(&Payload::new(&[1], 0, false).unwrap())
            .unwrap();
        MockLink::reset();

        assert_eq!(MockLink::written_count(), 0);
        assert_eq!(MockLink::last_written(), None);
    }
}
