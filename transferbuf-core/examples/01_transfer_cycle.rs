//! Example 01: Transfer Cycle
//!
//! This example demonstrates how to:
//! - Share a source buffer between an acquisition thread and a transmitter
//! - Configure a channel with duplicate suppression
//! - Run append / send / discard cycles
//! - Retry after a failed send without losing or duplicating readings

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use transferbuf_core::{
    time::SystemTime, Reading, ReadingSource, SourceBuffer, TransferBuffer, TransferConfig,
};

const CYCLES: usize = 6;

fn main() {
    println!("=== Transferbuf Transfer Cycle Example ===\n");

    let config = match TransferConfig::default()
        .with_channel("boiler/flow-temp")
        .map(|c| c.with_target_capacity(64).with_min_ms_between_duplicates(200))
    {
        Ok(config) => config,
        Err(e) => {
            println!("Invalid configuration: {}", e);
            return;
        }
    };

    let mut transfer = match TransferBuffer::from_config(&config) {
        Ok(buffer) => buffer,
        Err(e) => {
            println!("Invalid configuration: {}", e);
            return;
        }
    };

    let source = Arc::new(SourceBuffer::new());
    let producer = spawn_producer(Arc::clone(&source));

    for cycle in 0..CYCLES {
        thread::sleep(Duration::from_millis(120));

        let added = transfer.append_configured(source.as_ref(), &config);
        println!(
            "cycle {}: {} new, {} pending",
            cycle,
            added,
            transfer.len()
        );

        // every third send fails; the readings stay live for the next cycle
        if cycle % 3 == 2 {
            println!("  send failed, keeping {} readings", transfer.len());
            continue;
        }

        for r in &transfer {
            println!("  -> {:.1} @ {}", r.value(), r.time_ms());
        }
        transfer.discard_configured(transfer.len(), &config);
        source.clean();
    }

    if producer.join().is_err() {
        println!("producer thread panicked");
    }

    let stats = transfer.stats();
    println!("\nStatistics:");
    println!("  Appended:            {}", stats.appended);
    println!("  Rejected (stale):    {}", stats.rejected_stale);
    println!("  Rejected (duplicate):{}", stats.rejected_duplicate);
    println!("  Discarded:           {}", stats.discarded);
    println!("  Left in source:      {}", source.pending());
}

/// Simulated sensor: 20 samples, value changes every 5th sample
fn spawn_producer(source: Arc<SourceBuffer>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let clock = SystemTime;
        for i in 0..20 {
            let value = 55.0 + (i / 5) as f64 * 0.5;
            source.push(Reading::stamped(value, &clock));
            thread::sleep(Duration::from_millis(25));
        }
    })
}
