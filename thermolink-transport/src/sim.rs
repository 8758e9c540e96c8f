//! Simulated instrument transport
//!
//! Stands in for the serial channel when no hardware is present. Each
//! received command line is parsed and answered with a canned, terminated
//! reply, so the layers above run unchanged.

use std::thread;
use std::time::Duration;

use bytes::{BufMut, BytesMut};
use tracing::{debug, trace};

use thermolink_core::{END_MARKER, TERMINATOR};

use crate::{error::Result, Transport, TransportMode};

/// Reserved port name that selects the simulated transport
pub const SIMULATION_PORT: &str = "Simulation";

/// Simulated thermocouple instrument
///
/// Holds a small instrument model: a fixed identity, fixed temperature
/// readings, and the thermocouple type and conversion mode last written to
/// it. Queries read the model back; unknown queries answer `ERR`; unknown
/// writes are dropped so no stale bytes linger for the next read.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use thermolink_transport::{SimTransport, Transport};
///
/// let mut sim = SimTransport::new();
/// sim.send(b"*IDN?\n").unwrap();
///
/// let reply = sim.recv(Duration::ZERO).unwrap();
/// assert!(reply.ends_with(b"\r\n"));
/// ```
pub struct SimTransport {
    identity: String,
    temperature: f64,
    cold_junction: f64,
    tc_type: String,
    mode: String,
    /// Inbound bytes not yet terminated by an end marker
    pending: BytesMut,
    /// Reply bytes waiting to be read
    rx: BytesMut,
}

impl SimTransport {
    /// Create a simulated instrument with default readings
    pub fn new() -> Self {
        Self {
            identity: "THERMOLINK,SIM-TC,0,1.0".to_string(),
            temperature: 25.0,
            cold_junction: 22.5,
            tc_type: "K".to_string(),
            mode: "AUTO".to_string(),
            pending: BytesMut::new(),
            rx: BytesMut::new(),
        }
    }

    /// Set the simulated thermocouple temperature
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = celsius;
        self
    }

    /// Set the simulated cold-junction temperature
    pub fn with_cold_junction(mut self, celsius: f64) -> Self {
        self.cold_junction = celsius;
        self
    }

    /// Set the identification string
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    fn handle_line(&mut self, line: &str) {
        trace!("Sim handling {:?}", line);

        let reply = match line {
            "*IDN?" => Some(self.identity.clone()),
            "THERMO:TEMP?" => Some(format!("{:.2}", self.temperature)),
            "COLDJ:TEMP?" => Some(format!("{:.2}", self.cold_junction)),
            "THERMO:STATUS?" => Some("READY".to_string()),
            "THERMO:TYPE?" => Some(self.tc_type.clone()),
            "THERMO:MODE?" => Some(self.mode.clone()),
            "ONESHOT" => None,
            _ => self.handle_other(line),
        };

        if let Some(reply) = reply {
            self.rx.put_slice(reply.as_bytes());
            self.rx.put_slice(TERMINATOR);
        }
    }

    fn handle_other(&mut self, line: &str) -> Option<String> {
        if let Some(value) = line.strip_prefix("THERMO:TYPE ") {
            self.tc_type = value.to_string();
            None
        } else if let Some(value) = line.strip_prefix("THERMO:MODE ") {
            self.mode = value.to_string();
            None
        } else if line.ends_with('?') {
            debug!("Sim rejecting unknown query {:?}", line);
            Some("ERR".to_string())
        } else {
            debug!("Sim ignoring unknown command {:?}", line);
            None
        }
    }
}

impl Default for SimTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SimTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        trace!(
            "Sim received {} bytes: {:02X?}",
            data.len(),
            &data[..data.len().min(16)]
        );

        self.pending.extend_from_slice(data);

        while let Some(pos) = self.pending.iter().position(|&b| b == END_MARKER) {
            let line = self.pending.split_to(pos + 1);
            let text = String::from_utf8_lossy(&line[..pos]).into_owned();
            self.handle_line(&text);
        }

        Ok(())
    }

    fn recv(&mut self, wait: Duration) -> Result<BytesMut> {
        if self.rx.is_empty() {
            // Emulate a quiet line: nothing shows up within the wait
            thread::sleep(wait);
            return Ok(BytesMut::new());
        }

        let out = self.rx.split();
        trace!(
            "Sim replying {} bytes: {:02X?}",
            out.len(),
            &out[..out.len().min(16)]
        );

        Ok(out)
    }

    fn disconnect(&mut self) {
        trace!("Sim disconnect is a no-op");
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn mode(&self) -> TransportMode {
        TransportMode::Simulated
    }

    fn port_name(&self) -> String {
        SIMULATION_PORT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(sim: &mut SimTransport) -> String {
        let bytes = sim.recv(Duration::ZERO).unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_sim_identify() {
        let mut sim = SimTransport::new();
        sim.send(b"*IDN?\n").unwrap();

        let reply = drain(&mut sim);
        assert!(reply.starts_with("THERMOLINK"));
        assert!(reply.ends_with("\r\n"));
    }

    #[test]
    fn test_sim_temperature_format() {
        let mut sim = SimTransport::new().with_temperature(23.5);
        sim.send(b"THERMO:TEMP?\n").unwrap();

        assert_eq!(drain(&mut sim), "23.50\r\n");
    }

    #[test]
    fn test_sim_cold_junction_format() {
        let mut sim = SimTransport::new().with_cold_junction(21.0);
        sim.send(b"COLDJ:TEMP?\n").unwrap();

        assert_eq!(drain(&mut sim), "21.00\r\n");
    }

    #[test]
    fn test_sim_type_read_back() {
        let mut sim = SimTransport::new();
        sim.send(b"THERMO:TYPE J\n").unwrap();
        sim.send(b"THERMO:TYPE?\n").unwrap();

        assert_eq!(drain(&mut sim), "J\r\n");
    }

    #[test]
    fn test_sim_mode_read_back() {
        let mut sim = SimTransport::new();
        sim.send(b"THERMO:MODE ONESHOT\n").unwrap();
        sim.send(b"THERMO:MODE?\n").unwrap();

        assert_eq!(drain(&mut sim), "ONESHOT\r\n");
    }

    #[test]
    fn test_sim_unknown_query_errs() {
        let mut sim = SimTransport::new();
        sim.send(b"BOGUS:VOLT?\n").unwrap();

        assert_eq!(drain(&mut sim), "ERR\r\n");
    }

    #[test]
    fn test_sim_write_only_leaves_no_bytes() {
        let mut sim = SimTransport::new();
        sim.send(b"ONESHOT\n").unwrap();
        sim.send(b"THERMO:MODE AUTO\n").unwrap();

        assert!(sim.recv(Duration::ZERO).unwrap().is_empty());
    }

    #[test]
    fn test_sim_frame_split_across_sends() {
        let mut sim = SimTransport::new();
        sim.send(b"*ID").unwrap();
        sim.send(b"N?\n").unwrap();

        assert!(drain(&mut sim).starts_with("THERMOLINK"));
    }

    #[test]
    fn test_sim_disconnect_keeps_running() {
        let mut sim = SimTransport::new();
        sim.disconnect();

        assert!(sim.is_connected());
        sim.send(b"THERMO:STATUS?\n").unwrap();
        assert_eq!(drain(&mut sim), "READY\r\n");
    }

    #[test]
    fn test_sim_reports_simulated_mode() {
        let sim = SimTransport::new();
        assert_eq!(sim.mode(), TransportMode::Simulated);
        assert_eq!(sim.port_name(), SIMULATION_PORT);
    }
}
