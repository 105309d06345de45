use super::link::{Context, EventCallback};
use super::payload::MAX_PAYLOAD_LENGTH;

/// On-air packet format of the link
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// Fixed payload length frames
    Esb,
    /// Dynamic payload length frames
    EsbDpl,
}

/// On-air datarate of the link
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bitrate {
    /// 1 Mbit/s
    B1Mbit,
    /// 2 Mbit/s
    B2Mbit,
}

/// Role of this node in the link
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Primary transmitter
    Ptx,
    /// Primary receiver
    Prx,
}

/// Radio link configuration applied by
/// [`EsbLink::configure`](super::link::EsbLink::configure)
#[derive(Clone)]
pub struct Config {
    /// On-air packet format
    pub protocol: Protocol,
    /// On-air datarate
    pub bitrate: Bitrate,
    /// Frame payload length; the upper bound with [`Protocol::EsbDpl`], the
    /// exact length of every frame with [`Protocol::Esb`]
    pub payload_length: usize,
    /// Number of hardware retransmission attempts for unacknowledged frames
    pub retransmit_count: u8,
    /// Role of this node
    pub mode: Mode,
    /// Acknowledge only frames that request it
    pub selective_auto_ack: bool,
    /// Shorten the radio ramp-up time between operations
    pub use_fast_ramp_up: bool,
    /// Function called by the link's event context on every completed
    /// operation
    pub event_handler: EventCallback,
    /// Reference passed back to `event_handler` on every invocation
    pub context: Context,
}

impl Config {
    /// Creates the benchmark transmitter configuration
    ///
    /// Dynamic payload length, 2 Mbit/s, maximum-size frames, no hardware
    /// retransmissions, selective auto acknowledgement and fast ramp-up.
    ///
    /// # Examples
    ///
    /// ```
    /// use nrf_esb_bench::esb::config::{Config, Mode};
    /// use nrf_esb_bench::esb::link::{Context, Event};
    ///
    /// fn event_handler(_event: &Event, _context: Context) {}
    ///
    /// let config = Config::new(event_handler, &None::<u8>);
    /// assert_eq!(config.mode, Mode::Ptx);
    /// assert_eq!(config.retransmit_count, 0);
    /// ```
    pub fn new(event_handler: EventCallback, context: Context) -> Self {
        Self {
            protocol: Protocol::EsbDpl,
            bitrate: Bitrate::B2Mbit,
            payload_length: MAX_PAYLOAD_LENGTH,
            retransmit_count: 0,
            mode: Mode::Ptx,
            selective_auto_ack: true,
            use_fast_ramp_up: true,
            event_handler,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esb::link::Event;

    #[test]
    fn test_benchmark_config_defaults() {
        fn event_handler(_event: &Event, _context: Context) {}

        let config = Config::new(event_handler, &None::<u8>);

        assert_eq!(config.protocol, Protocol::EsbDpl);
        assert_eq!(config.bitrate, Bitrate::B2Mbit);
        assert_eq!(config.payload_length, MAX_PAYLOAD_LENGTH);
        assert!(config.selective_auto_ack);
        assert!(config.use_fast_ramp_up);
    }

    #[test]
    fn test_registered_handler_receives_events() {
        static mut SEEN: Option<Event> = None;

        fn event_handler(event: &Event, _context: Context) {
            unsafe { SEEN = Some(event.clone()) };
        }

        let config = Config::new(event_handler, &None::<u8>);
        (config.event_handler)(&Event::TxFailed, config.context);

        assert_eq!(unsafe { SEEN.clone() }, Some(Event::TxFailed));
    }
}
