//! Read temperatures from an instrument
//!
//! Falls back to the simulated instrument when the port cannot be opened.

use thermolink::{Driver, DriverConfig};

fn main() -> thermolink::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Change to your instrument port
    let port = std::env::var("THERMOLINK_PORT").unwrap_or_else(|_| "COM5".to_string());

    println!("Opening {}...", port);
    let mut driver = Driver::open(DriverConfig::new(port));

    if driver.is_simulated() {
        println!("! No instrument found, running simulated");
    }

    let idn = driver.identify()?;
    println!("✓ Instrument: {}", idn);

    let temp = driver.temperature()?;
    println!("✓ Thermocouple: {}", temp);

    let cj = driver.cold_junction_temperature()?;
    println!("✓ Cold junction: {} °C", cj);

    driver.disconnect();
    println!("✓ Disconnected");

    Ok(())
}
