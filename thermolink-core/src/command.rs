//! Instrument command definitions

use std::fmt;

/// Commands understood by the instrument
///
/// The wire vocabulary is fixed. Each variant produces its exact request
/// text via [`text`](Self::text); set commands carry their value and append
/// it after a single space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Identification query (`*IDN?`)
    Identify,

    /// Thermocouple temperature query (`THERMO:TEMP?`)
    GetTemperature,

    /// Trigger a single conversion (`ONESHOT`, no reply)
    OneShot,

    /// Conversion status query (`THERMO:STATUS?`)
    GetConversionStatus,

    /// Thermocouple type query (`THERMO:TYPE?`)
    GetThermocoupleType,

    /// Set the thermocouple type (`THERMO:TYPE <value>`, no reply)
    SetThermocoupleType(String),

    /// Conversion mode query (`THERMO:MODE?`)
    GetMode,

    /// Set the conversion mode (`THERMO:MODE <value>`, no reply)
    SetMode(String),

    /// Cold-junction temperature query (`COLDJ:TEMP?`)
    GetColdJunction,
}

impl Command {
    /// Build the request text for this command
    ///
    /// # Examples
    ///
    /// ```
    /// use thermolink_core::Command;
    ///
    /// assert_eq!(Command::Identify.text(), "*IDN?");
    /// assert_eq!(Command::SetMode("AUTO".into()).text(), "THERMO:MODE AUTO");
    /// ```
    pub fn text(&self) -> String {
        match self {
            Self::Identify => "*IDN?".to_string(),
            Self::GetTemperature => "THERMO:TEMP?".to_string(),
            Self::OneShot => "ONESHOT".to_string(),
            Self::GetConversionStatus => "THERMO:STATUS?".to_string(),
            Self::GetThermocoupleType => "THERMO:TYPE?".to_string(),
            Self::SetThermocoupleType(value) => format!("THERMO:TYPE {}", value),
            Self::GetMode => "THERMO:MODE?".to_string(),
            Self::SetMode(value) => format!("THERMO:MODE {}", value),
            Self::GetColdJunction => "COLDJ:TEMP?".to_string(),
        }
    }

    /// Check if the instrument answers this command
    ///
    /// Set commands and `ONESHOT` are fire-and-forget; reading after them
    /// would only run into the timeout.
    pub fn expects_reply(&self) -> bool {
        !matches!(
            self,
            Self::OneShot | Self::SetThermocoupleType(_) | Self::SetMode(_)
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text() {
        assert_eq!(Command::Identify.text(), "*IDN?");
        assert_eq!(Command::GetTemperature.text(), "THERMO:TEMP?");
        assert_eq!(Command::GetConversionStatus.text(), "THERMO:STATUS?");
        assert_eq!(Command::GetThermocoupleType.text(), "THERMO:TYPE?");
        assert_eq!(Command::GetMode.text(), "THERMO:MODE?");
        assert_eq!(Command::GetColdJunction.text(), "COLDJ:TEMP?");
    }

    #[test]
    fn test_set_text() {
        assert_eq!(
            Command::SetThermocoupleType("K".into()).text(),
            "THERMO:TYPE K"
        );
        assert_eq!(Command::SetMode("AUTO".into()).text(), "THERMO:MODE AUTO");
        assert_eq!(Command::OneShot.text(), "ONESHOT");
    }

    #[test]
    fn test_expects_reply() {
        assert!(Command::Identify.expects_reply());
        assert!(Command::GetTemperature.expects_reply());
        assert!(Command::GetColdJunction.expects_reply());
        assert!(!Command::OneShot.expects_reply());
        assert!(!Command::SetMode("AUTO".into()).expects_reply());
        assert!(!Command::SetThermocoupleType("J".into()).expects_reply());
    }

    #[test]
    fn test_display_is_request_text() {
        assert_eq!(Command::Identify.to_string(), "*IDN?");
        assert_eq!(
            Command::SetMode("ONESHOT".into()).to_string(),
            "THERMO:MODE ONESHOT"
        );
    }
}
