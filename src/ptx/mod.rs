//! Enhanced ShockBurst PTX throughput benchmark
//!
//! A benchmark run is a fixed sequence:
//! bring the high frequency clock up ([`hfclk`](crate::hw::hfclk)),
//! [`initialize`] the link, then hand the marker payload from
//! [`test_payload`] to [`TxController::run`](controller::TxController::run)
//! for [`DEFAULT_FRAME_COUNT`] frames. The returned
//! [`TxReport`](report::TxReport) carries the achieved rate.

/// Transmit admission/completion controller
pub mod controller;
/// Throughput report of a finished run
pub mod report;

use crate::error::Error;
use crate::esb::addresses::Addresses;
use crate::esb::config::Config;
use crate::esb::link::EsbLink;
use crate::esb::payload::{Payload, MAX_PAYLOAD_LENGTH};

/// Number of frames transmitted by the standard throughput test
pub const DEFAULT_FRAME_COUNT: u32 = 1000;

/// Applies the benchmark configuration and address table to the link
///
/// Any error is fatal to the run: the caller must abort before entering the
/// drive loop.
pub fn initialize<L: EsbLink>(
    link: &L,
    config: &Config,
    addresses: &Addresses,
) -> Result<(), Error> {
    link.configure(config)?;
    link.set_addresses(addresses)?;
    Ok(())
}

/// Builds the marker payload transmitted by the throughput test
///
/// A maximum-size frame of `1` bytes on pipe 0, requesting acknowledgements.
/// The byte at the marker position is advanced between sends by the drive
/// loop, so consecutive frames are distinguishable on air.
pub fn test_payload() -> Payload {
    let mut payload = Payload::filled(1, MAX_PAYLOAD_LENGTH, 0).unwrap();
    payload.set_ack(true);
    payload
}
