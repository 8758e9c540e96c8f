//! # thermolink
//!
//! Serial command/response driver for Arduino based thermocouple
//! instruments.
//!
//! ## Features
//!
//! - Line-framed text protocol (`\n` out, `\r\n` back)
//! - Typed temperature replies with a raw-text fallback
//! - Simulation mode when no hardware is reachable
//! - Blocking, single-threaded API
//!
//! ## Quick Start
//!
//! ```no_run
//! use thermolink::{Driver, DriverConfig};
//!
//! fn main() -> thermolink::Result<()> {
//!     // Falls back to simulation if the port cannot be opened
//!     let mut driver = Driver::open(DriverConfig::new("/dev/ttyUSB0"));
//!
//!     let idn = driver.identify()?;
//!     println!("Instrument: {}", idn);
//!
//!     let temp = driver.temperature()?;
//!     println!("Temperature: {}", temp);
//!
//!     driver.disconnect();
//!     Ok(())
//! }
//! ```

pub mod driver;
pub mod error;

// Re-exports
pub use driver::{Driver, DriverConfig};
pub use error::{Error, Result};

// Re-export protocol types
pub use thermolink_core::Command;
pub use thermolink_transport::{SIMULATION_PORT, SimTransport, Transport, TransportMode};
pub use thermolink_types::Temperature;
