use super::addresses::Addresses;
use super::config::Config;
use super::payload::Payload;
use crate::error::Error;
use core::any::Any;

#[cfg(test)]
use mockall::*;

/// Reference to any data selected by the user of a link
///
/// The same reference is passed back on every event handler invocation.
pub type Context = &'static (dyn Any + Send + Sync);

/// Type of the function called when the link completes an operation
///
/// Invoked from the link's event context, concurrently with thread context.
pub type EventCallback = fn(&Event, Context);

/// Completion event delivered by an ESB engine
///
/// Delivered at most once per submitted frame and never before the
/// submitting call has returned. The enum is non-exhaustive so engines can
/// grow new event kinds without breaking handlers; handlers ignore kinds
/// they do not know.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Event {
    /// The last submitted frame was transmitted successfully
    TxSuccess,
    /// The last submitted frame was dropped by the link
    TxFailed,
    /// One or more received frames are buffered in the link
    RxReceived,
}

/// Capabilities required from an ESB engine by the benchmark
///
/// Submissions are asynchronous: [`write_payload`](EsbLink::write_payload)
/// only queues a frame, its fate arrives later through the event handler
/// registered in [`Config`]. The engine does not limit how many frames the
/// caller queues; keeping a single frame in flight is the caller's duty.
#[cfg_attr(test, automock)]
pub trait EsbLink {
    /// Applies `config` to the radio
    ///
    /// Must be called before any other operation, with the radio idle.
    /// Returns [`Err(Error::InvalidConfig)`](Error::InvalidConfig) if the
    /// engine cannot satisfy `config`.
    fn configure(&self, config: &Config) -> Result<(), Error>;

    /// Programs the address table
    ///
    /// Returns [`Err(Error::InvalidAddresses)`](Error::InvalidAddresses) if
    /// the engine rejects the table.
    fn set_addresses(&self, addresses: &Addresses) -> Result<(), Error>;

    /// Submits one frame for transmission
    ///
    /// The outcome arrives later as [`Event::TxSuccess`] or
    /// [`Event::TxFailed`] through the configured event handler. A
    /// synchronous rejection produces no completion event.
    fn write_payload(&self, payload: &Payload) -> Result<(), Error>;

    /// Discards any queued but unsent frame
    fn flush_tx(&self);

    /// Takes one buffered received frame
    ///
    /// Returns `None` when the receive buffer is empty. Called repeatedly
    /// inside the [`Event::RxReceived`] handler until it yields `None`,
    /// because the engine may buffer several frames between handler
    /// invocations.
    fn read_rx_payload(&self) -> Option<Payload>;
}
