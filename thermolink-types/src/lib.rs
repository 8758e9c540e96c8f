//! Type definitions for thermolink

pub mod temperature;

pub use temperature::Temperature;
