//! # thermolink-core
//!
//! Core protocol implementation for line-framed thermocouple instruments.
//!
//! This crate provides the low-level protocol primitives:
//! - Command catalogue and request text
//! - Line framing (end marker out, terminator in)
//! - Reply accumulation and decoding
//! - Protocol constants

use std::time::Duration;

pub mod command;
pub mod error;
pub mod frame;

pub use command::Command;
pub use error::{Error, Result};
pub use frame::{END_MARKER, ReplyAccumulator, TERMINATOR};

/// Default serial port name
pub const DEFAULT_PORT: &str = "COM5";

/// Default baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default reply timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Default wait after opening a port (the instrument resets on connect)
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);
