//! Serial port transport

use std::io::{self, Read, Write};
use std::time::Duration;

use bytes::BytesMut;
use serialport::SerialPort;
use tracing::{debug, trace, warn};

use crate::{error::*, Transport, TransportMode};

/// Serial transport backed by a real port
pub struct SerialTransport {
    port_name: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Open a serial port
    ///
    /// The timeout set here is the initial read timeout; each
    /// [`recv`](Transport::recv) adjusts it to the remaining wait.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] when the port does not exist, is in use,
    /// or cannot be configured.
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        debug!("Opening {} at {} baud...", port_name, baud_rate);

        let port = serialport::new(port_name, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|source| Error::Open {
                port: port_name.to_string(),
                source,
            })?;

        debug!("Opened {}", port_name);

        Ok(Self {
            port_name: port_name.to_string(),
            port: Some(port),
        })
    }
}

impl Transport for SerialTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        trace!(
            "Sending {} bytes: {:02X?}",
            data.len(),
            &data[..data.len().min(16)]
        );

        // write_all without flush: flush maps to tcdrain on posix and can
        // block for seconds
        port.write_all(data)?;

        Ok(())
    }

    fn recv(&mut self, wait: Duration) -> Result<BytesMut> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        port.set_timeout(wait)?;

        let mut chunk = [0u8; 256];
        let mut buf = BytesMut::new();

        match port.read(&mut chunk) {
            Ok(n) => {
                trace!("Received {} bytes: {:02X?}", n, &chunk[..n.min(16)]);
                buf.extend_from_slice(&chunk[..n]);
            }
            // Nothing arrived within the wait
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
            Err(e) => return Err(Error::Io(e)),
        }

        Ok(buf)
    }

    fn disconnect(&mut self) {
        if let Some(port) = self.port.take() {
            debug!("Closing {}...", self.port_name);
            drop(port);
        }
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    fn mode(&self) -> TransportMode {
        TransportMode::Real
    }

    fn port_name(&self) -> String {
        self.port_name.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("Serial transport dropped while still open");
        }
    }
}
