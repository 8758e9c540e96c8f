//! Transport layer for thermolink
//!
//! Provides serial communication with instruments, plus a simulated
//! stand-in for running without hardware.

pub mod serial;
pub mod sim;
pub mod error;

pub use error::{Error, Result};
pub use serial::SerialTransport;
pub use sim::{SIMULATION_PORT, SimTransport};

use std::fmt;
use std::time::Duration;

use bytes::BytesMut;

/// How a transport reaches the instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Backed by a real serial port
    Real,

    /// In-process stub, no hardware involved
    Simulated,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => f.write_str("real"),
            Self::Simulated => f.write_str("simulated"),
        }
    }
}

/// Transport trait for different communication channels
pub trait Transport: Send {
    /// Send raw bytes
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive raw bytes, waiting at most `wait`
    ///
    /// Returns whatever arrived, which is empty when nothing came in
    /// before the wait elapsed. An empty result is not an error.
    fn recv(&mut self, wait: Duration) -> Result<BytesMut>;

    /// Close the channel; repeat calls are no-ops
    fn disconnect(&mut self);

    /// Check if the channel is open
    fn is_connected(&self) -> bool;

    /// Real or simulated
    fn mode(&self) -> TransportMode;

    /// Human-readable port identifier
    fn port_name(&self) -> String;
}
