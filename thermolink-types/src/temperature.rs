//! Temperature readings returned by the instrument

use std::fmt;

/// A temperature reply
///
/// Instruments answer temperature queries with plain text. When the text
/// parses as a number the reading is carried in degrees celsius; otherwise
/// the original text is preserved as-is (error markers like `ERR`, or a
/// partial reply cut off by a timeout).
///
/// # Examples
///
/// ```
/// use thermolink_types::Temperature;
///
/// assert_eq!(Temperature::parse("23.5"), Temperature::Numeric(23.5));
/// assert_eq!(Temperature::parse("ERR"), Temperature::Raw("ERR".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Temperature {
    /// Reading in degrees celsius
    Numeric(f64),

    /// Reply text that did not parse as a number
    Raw(String),
}

impl Temperature {
    /// Parse reply text, falling back to `Raw` when it is not a number
    ///
    /// Surrounding whitespace is tolerated for the numeric case; the raw
    /// case keeps the text untouched.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) => Self::Numeric(value),
            Err(_) => Self::Raw(text.to_string()),
        }
    }

    /// Numeric value, if the reply was a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Raw(_) => None,
        }
    }

    /// Check if the reply was numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{} °C", value),
            Self::Raw(text) => write!(f, "{:?}", text),
        }
    }
}
