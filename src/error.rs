/// Errors reported by the benchmark software
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The module is busy with an ongoing operation
    WouldBlock,
    /// The payload does not fit in the link's frame size limit
    PayloadTooLong,
    /// The radio link rejected the requested configuration
    InvalidConfig,
    /// The radio link rejected the address table
    InvalidAddresses,
    /// The link's transmit queue cannot accept another frame
    TxQueueFull,
    /// The high frequency clock did not report readiness within the poll budget
    ClockTimeout,
}
