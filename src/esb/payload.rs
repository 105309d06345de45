use crate::error::Error;
use core::fmt::{Debug, Formatter};
use core::ops::{Deref, DerefMut};

/// Maximum number of payload bytes in a single ESB frame
pub const MAX_PAYLOAD_LENGTH: usize = 252;

// The second payload byte carries the rolling marker advanced between sends.
const MARKER_INDEX: usize = 1;

/// A single frame handed to the radio link for transmission
///
/// The buffer capacity is fixed at [`MAX_PAYLOAD_LENGTH`]; the live length is
/// set at construction time. [`Payload`] is a smart pointer dereferencing the
/// live byte slice.
///
/// The link borrows a payload only for the duration of a
/// [`write_payload`](super::link::EsbLink::write_payload) call; it does not
/// retain it afterwards.
#[derive(Clone)]
pub struct Payload {
    data: [u8; MAX_PAYLOAD_LENGTH],
    length: usize,
    pipe: u8,
    ack: bool,
}

impl Payload {
    /// Creates a payload carrying a copy of `data` on logical channel `pipe`
    ///
    /// Returns [`Err(Error::PayloadTooLong)`](Error::PayloadTooLong) if
    /// `data` does not fit in a single frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use nrf_esb_bench::esb::payload::Payload;
    ///
    /// let payload = Payload::new(&[0x01, 0x02, 0x03], 0, false).unwrap();
    /// assert_eq!(payload.len(), 3);
    /// assert_eq!(payload[2], 0x03);
    /// ```
    pub fn new(data: &[u8], pipe: u8, ack: bool) -> Result<Self, Error> {
        if data.len() > MAX_PAYLOAD_LENGTH {
            return Err(Error::PayloadTooLong);
        }

        let mut payload = Self {
            data: [0; MAX_PAYLOAD_LENGTH],
            length: data.len(),
            pipe,
            ack,
        };
        payload.data[..data.len()].copy_from_slice(data);
        Ok(payload)
    }

    /// Creates a payload of `length` bytes all set to `value`
    ///
    /// Returns [`Err(Error::PayloadTooLong)`](Error::PayloadTooLong) if
    /// `length` exceeds [`MAX_PAYLOAD_LENGTH`]. The payload does not request
    /// an acknowledgement; use [`set_ack`](Payload::set_ack) to change that.
    pub fn filled(value: u8, length: usize, pipe: u8) -> Result<Self, Error> {
        if length > MAX_PAYLOAD_LENGTH {
            return Err(Error::PayloadTooLong);
        }

        Ok(Self {
            data: [value; MAX_PAYLOAD_LENGTH],
            length,
            pipe,
            ack: false,
        })
    }

    /// Logical channel this payload is transmitted on
    pub fn pipe(&self) -> u8 {
        self.pipe
    }

    /// Whether the transmitter requests an acknowledgement for this frame
    pub fn ack_requested(&self) -> bool {
        self.ack
    }

    /// Requests or waives the acknowledgement for this frame
    pub fn set_ack(&mut self, ack: bool) {
        self.ack = ack;
    }

    /// Advances the rolling marker byte
    ///
    /// Called between sends so consecutive frames are distinguishable on air.
    /// Payloads shorter than two bytes have no marker and are left unchanged.
    pub fn bump_marker(&mut self) {
        if self.length > MARKER_INDEX {
            self.data[MARKER_INDEX] = self.data[MARKER_INDEX].wrapping_add(1);
        }
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        f.debug_struct("Payload")
            .field("data", &&self.data[..self.length])
            .field("pipe", &self.pipe)
            .field("ack", &self.ack)
            .finish()
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data[..self.length]
    }
}

impl DerefMut for Payload {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data[..self.length]
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.pipe == other.pipe && self.ack == other.ack && self[..] == other[..]
    }
}

impl Eq for Payload {}

#[cfg(feature = "defmt")]
impl defmt::Format for Payload {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Payload({:x})", &self[..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_copies_data_and_metadata() {
        let payload = Payload::new(&[1, 2, 3, 4], 5, true).unwrap();

        assert_eq!(&payload[..], &[1, 2, 3, 4]);
        assert_eq!(payload.len(), 4);
        assert_eq!(payload.pipe(), 5);
        assert!(payload.ack_requested());
    }

    #[test]
    fn test_new_rejects_too_long_data() {
        let data = [0u8; MAX_PAYLOAD_LENGTH + 1];
        assert_eq!(Payload::new(&data, 0, false), Err(Error::PayloadTooLong));
    }

    #[test]
    fn test_filled_builds_uniform_payload() {
        let payload = Payload::filled(1, MAX_PAYLOAD_LENGTH, 0).unwrap();

        assert_eq!(payload.len(), MAX_PAYLOAD_LENGTH);
        assert!(payload.iter().all(|byte| *byte == 1));
        assert!(!payload.ack_requested());
    }

    #[test]
    fn test_filled_rejects_too_long_payload() {
        assert_eq!(
            Payload::filled(0, MAX_PAYLOAD_LENGTH + 1, 0),
            Err(Error::PayloadTooLong)
        );
    }

    #[test]
    fn test_bump_marker_advances_second_byte_only() {
        let mut payload = Payload::filled(7, 4, 0).unwrap();

        payload.bump_marker();

        assert_eq!(&payload[..], &[7, 8, 7, 7]);
    }

    #[test]
    fn test_bump_marker_wraps_around() {
        let mut payload = Payload::new(&[0, 0xFF], 0, false).unwrap();

        payload.bump_marker();

        assert_eq!(payload[MARKER_INDEX], 0);
    }

    #[test]
    fn test_bump_marker_ignores_single_byte_payload() {
        let mut payload = Payload::new(&[9], 0, false).unwrap();

        payload.bump_marker();

        assert_eq!(&payload[..], &[9]);
    }

    #[test]
    fn test_equality_considers_live_bytes_only() {
        let short = Payload::new(&[1, 2], 0, false).unwrap();
        let mut long = Payload::filled(0xAA, 2, 0).unwrap();
        long[0] = 1;
        long[1] = 2;

        assert_eq!(short, long);
        assert_ne!(short, Payload::new(&[1, 2], 1, false).unwrap());
        assert_ne!(short, Payload::new(&[1, 2], 0, true).unwrap());
    }
}
