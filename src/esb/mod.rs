//! Enhanced ShockBurst link facade
//!
//! The benchmark core does not drive radio hardware itself. It reaches the
//! ESB engine through the [`EsbLink`](link::EsbLink) capability trait and
//! receives completion events through the handler registered in
//! [`Config`](config::Config). This module defines that contract and the
//! value types crossing it.

/// Address table of an ESB node
pub mod addresses;
/// Link configuration applied before a benchmark run
pub mod config;
/// Capability trait and completion events of an ESB engine
pub mod link;
#[cfg(feature = "mocked_platform")]
pub mod mock_link;
/// Fixed-capacity radio frame payloads
pub mod payload;
