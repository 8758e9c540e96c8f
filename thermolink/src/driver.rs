//! High-level instrument driver

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use thermolink_core::{
    frame, Command, DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_READ_TIMEOUT, DEFAULT_SETTLE_DELAY,
};
use thermolink_transport::{
    SerialTransport, SimTransport, Transport, TransportMode, SIMULATION_PORT,
};
use thermolink_types::Temperature;

use crate::error::Result;

/// Driver configuration
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use thermolink::DriverConfig;
///
/// let config = DriverConfig::new("/dev/ttyUSB0")
///     .with_baud_rate(9_600)
///     .with_timeout(Duration::from_secs(1));
/// ```
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Port name (`COM5`, `/dev/ttyUSB0`, or the reserved `Simulation`)
    pub port: String,

    /// Baud rate
    pub baud_rate: u32,

    /// How long to wait for a reply before giving up
    pub timeout: Duration,

    /// Wait after opening the port; Arduino-style instruments reset on
    /// connect and drop bytes until their firmware is up
    pub settle_delay: Duration,
}

impl DriverConfig {
    /// Configuration for the given port, defaults for everything else
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }

    /// Configuration that selects the simulated instrument
    pub fn simulation() -> Self {
        Self::new(SIMULATION_PORT)
    }

    /// Set the baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the reply timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the post-open settle delay
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_READ_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Thermocouple instrument driver
///
/// High-level interface for one instrument over one serial channel. Every
/// command method writes a single framed request and, for queries, collects
/// the single framed reply; there is never more than one command in flight.
///
/// # Examples
///
/// ```no_run
/// use thermolink::{Driver, DriverConfig};
///
/// fn main() -> thermolink::Result<()> {
///     let mut driver = Driver::open(DriverConfig::new("/dev/ttyUSB0"));
///
///     if driver.is_simulated() {
///         println!("No instrument found, running simulated");
///     }
///
///     println!("{}", driver.identify()?);
///     println!("{}", driver.temperature()?);
///
///     driver.disconnect();
///     Ok(())
/// }
/// ```
pub struct Driver {
    transport: Box<dyn Transport>,
    timeout: Duration,
}

impl Driver {
    /// Open a connection to the instrument
    ///
    /// Tries the configured serial port. When the port is the reserved
    /// [`SIMULATION_PORT`] name, or when opening fails for any reason, the
    /// driver comes up against the simulated instrument instead; opening
    /// never fails. [`is_simulated`](Self::is_simulated) tells which way it
    /// went.
    ///
    /// Both modes wait out `settle_delay` before returning.
    pub fn open(config: DriverConfig) -> Self {
        let transport: Box<dyn Transport> = if config.port == SIMULATION_PORT {
            info!("Simulation port requested");
            Box::new(SimTransport::new())
        } else {
            match SerialTransport::open(&config.port, config.baud_rate, config.timeout) {
                Ok(serial) => Box::new(serial),
                Err(e) => {
                    warn!(
                        "Failed to open {} at {} baud ({}), falling back to simulation",
                        config.port, config.baud_rate, e
                    );
                    Box::new(SimTransport::new())
                }
            }
        };

        let driver = Self {
            transport,
            timeout: config.timeout,
        };

        if !config.settle_delay.is_zero() {
            debug!("Settling for {:?} after open", config.settle_delay);
            thread::sleep(config.settle_delay);
        }

        info!(
            "Instrument ready on {} ({} mode)",
            driver.transport.port_name(),
            driver.transport.mode()
        );

        driver
    }

    /// Wrap an existing transport
    ///
    /// No settle delay is applied; the transport is taken as ready.
    pub fn from_transport(transport: Box<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Check if the driver runs against the simulated instrument
    pub fn is_simulated(&self) -> bool {
        self.transport.mode() == TransportMode::Simulated
    }

    /// Real or simulated
    pub fn transport_mode(&self) -> TransportMode {
        self.transport.mode()
    }

    /// Check if the channel is open
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Port the driver is attached to
    pub fn port_name(&self) -> String {
        self.transport.port_name()
    }

    /// Query the instrument identification string
    pub fn identify(&mut self) -> Result<String> {
        self.run(Command::Identify)
    }

    /// Read the current thermocouple temperature
    ///
    /// Returns [`Temperature::Numeric`] when the instrument answers with a
    /// number and [`Temperature::Raw`] otherwise (error text, partial
    /// reply).
    pub fn temperature(&mut self) -> Result<Temperature> {
        let reply = self.run(Command::GetTemperature)?;
        Ok(Temperature::parse(&reply))
    }

    /// Trigger a single conversion
    ///
    /// The instrument sends no reply; pair with
    /// [`conversion_status`](Self::conversion_status) to poll completion.
    pub fn trigger_one_shot(&mut self) -> Result<()> {
        self.run(Command::OneShot)?;
        Ok(())
    }

    /// Query the conversion status
    pub fn conversion_status(&mut self) -> Result<String> {
        self.run(Command::GetConversionStatus)
    }

    /// Query the configured thermocouple type
    pub fn thermocouple_type(&mut self) -> Result<String> {
        self.run(Command::GetThermocoupleType)
    }

    /// Set the thermocouple type (e.g. `K`, `J`, `T`)
    pub fn set_thermocouple_type(&mut self, value: &str) -> Result<()> {
        self.run(Command::SetThermocoupleType(value.to_string()))?;
        Ok(())
    }

    /// Query the conversion mode
    pub fn mode(&mut self) -> Result<String> {
        self.run(Command::GetMode)
    }

    /// Set the conversion mode (e.g. `AUTO`, `ONESHOT`)
    pub fn set_mode(&mut self, value: &str) -> Result<()> {
        self.run(Command::SetMode(value.to_string()))?;
        Ok(())
    }

    /// Read the cold-junction reference temperature
    pub fn cold_junction_temperature(&mut self) -> Result<String> {
        self.run(Command::GetColdJunction)
    }

    /// Disconnect from the instrument
    ///
    /// Safe to call repeatedly; disconnecting the simulated instrument is
    /// a no-op.
    pub fn disconnect(&mut self) {
        if self.transport.mode() == TransportMode::Real && self.transport.is_connected() {
            info!("Disconnecting from {}", self.transport.port_name());
        }
        self.transport.disconnect();
    }

    // Helper methods

    /// Send one command and collect its reply, if it has one
    fn run(&mut self, command: Command) -> Result<String> {
        debug!("Running {}", command);

        let request = frame::encode(&command.text())?;
        self.transport.send(&request)?;

        if !command.expects_reply() {
            return Ok(String::new());
        }

        self.read_reply()
    }

    /// Collect one terminated reply, or whatever arrived by the deadline
    fn read_reply(&mut self) -> Result<String> {
        let deadline = Instant::now() + self.timeout;
        let mut acc = frame::ReplyAccumulator::new();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                let partial = acc.into_partial();
                warn!(
                    "Reply timed out after {:?}, returning {} unterminated byte(s)",
                    self.timeout,
                    partial.len()
                );
                return Ok(partial);
            }

            let chunk = self.transport.recv(remaining)?;
            if let Some(reply) = acc.push(&chunk) {
                trace!("Reply: {:?}", reply);
                return Ok(reply);
            }
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.disconnect();
    }
}
