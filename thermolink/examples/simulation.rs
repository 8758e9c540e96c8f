//! Drive the simulated instrument
//!
//! No hardware required: the reserved "Simulation" port always opens.

use std::time::Duration;

use thermolink::{Driver, DriverConfig};

fn main() -> thermolink::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut driver = Driver::open(
        DriverConfig::simulation().with_settle_delay(Duration::from_millis(100)),
    );

    println!("Mode: {}", driver.transport_mode());
    println!("IDN: {}", driver.identify()?);

    driver.set_thermocouple_type("J")?;
    println!("Type: {}", driver.thermocouple_type()?);

    driver.set_mode("ONESHOT")?;
    driver.trigger_one_shot()?;
    println!("Status: {}", driver.conversion_status()?);
    println!("Temperature: {}", driver.temperature()?);

    driver.disconnect();

    Ok(())
}
