//! Basic dispatcher usage example
//!
//! Demonstrates building a chain from configuration and logging at each
//! severity.
//!
//! Run with: cargo run --example basic_usage

use rust_log_dispatcher::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatcher - Basic Usage Example ===\n");

    // Console at DEBUG, UDP collector for warnings and worse
    init_with_config(&[
        LogConfig::new("console", "debug"),
        LogConfig::new("udp", "warn"),
    ])?;

    println!("1. Logging at different severities:");
    debugf!("This is a debug message");
    infof!("Processing {} items", 100);
    warnf!("disk at {}%", 90);
    errorf!("Error code: {}", 500);

    println!("\n2. Re-initializing with a stricter console:");
    init([new_logger(&LogConfig::new("console", "warn"))?]);
    infof!("Info message (hidden)");
    warnf!("Warning message (visible)");

    println!("\n3. Rejected configuration leaves the chain untouched:");
    if let Err(e) = init_with_config(&[LogConfig::new("carrier-pigeon", "info")]) {
        println!("   {}", e);
    }
    warnf!("Still logging through {:?}", global());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
