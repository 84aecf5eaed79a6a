//! Basic usage example for the Hubmon library.
//!
//! This example demonstrates the high-level API for collecting Docker Hub
//! image metrics.
//!
//! Run with: cargo run --example basic_usage

use libhubmon::{Exporter, Metric};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Hubmon Library - Basic Usage Example\n");

    // Configure an exporter for one well-known public image
    let exporter = Exporter::builder()
        .images(vec!["library/nginx".to_string()])
        .timeout_seconds(10)
        .build()?;
    println!("✓ Exporter configured\n");

    // Collect the raw samples first
    println!("Collecting samples...");
    let samples = exporter.collect().await;
    if samples.is_empty() {
        eprintln!("✗ No samples collected");
        eprintln!("  Docker Hub may be unreachable from this machine");
        return Ok(());
    }

    println!("✓ Collected {} samples:\n", samples.len());
    for sample in &samples {
        println!(
            "  - {:?} {{image={}, user={}}} = {}",
            sample.metric, sample.image, sample.user, sample.value
        );
        if sample.metric == Metric::PullsTotal {
            println!("    (that's a lot of pulls)");
        }
    }
    println!();

    // A full scrape renders the same data as Prometheus text exposition
    println!("Rendering exposition...");
    let text = exporter.scrape().await?;
    print!("{}", text);

    println!("\nExample completed!");
    Ok(())
}
