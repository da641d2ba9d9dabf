//! Example: Feeding the dashboard through a channel
//!
//! This example shows how to embed uptime-bar in your own poller by
//! pushing incident state through a channel instead of a file.
//!
//! A synthetic "api" monitor flaps every few seconds; every received
//! snapshot is turned into hourly buckets and printed.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_source
//! ```

use std::thread;
use std::time::Duration;

use chrono::{Local, Utc};
use uptime_bar::{compute_buckets, ChannelSource, DataSource, Incident, MonitorState};

fn main() {
    println!("Channel source example");
    println!("Generating synthetic incident state...\n");

    // Create a channel source - this returns both a sender and the source
    let (tx, mut source) = ChannelSource::create("synthetic-poller");

    // Spawn a thread that plays the role of the poller
    thread::spawn(move || {
        let started = Utc::now().timestamp() - 6 * 3600;
        let mut state = MonitorState::default();
        state.incident.insert(
            "api".to_string(),
            vec![Incident {
                start: vec![started],
                error: vec!["initial check".to_string()],
                end: Some(started),
            }],
        );

        let mut counter = 0u64;
        loop {
            counter += 1;
            let now = Utc::now().timestamp();
            let incidents = state.incident.entry("api".to_string()).or_default();

            // Open an incident every fourth tick, resolve it on the next
            let ongoing = incidents.last().is_some_and(Incident::is_ongoing);
            if ongoing {
                if let Some(last) = incidents.last_mut() {
                    last.end = Some(now);
                }
            } else if counter % 4 == 0 {
                incidents.push(Incident {
                    start: vec![now],
                    error: vec![format!("HTTP 503 (check #{})", counter)],
                    end: None,
                });
            }
            state.last_update = Some(now);

            if tx.send(state.clone()).is_err() {
                break; // Receiver dropped
            }

            thread::sleep(Duration::from_secs(1));
        }
    });

    println!("Receiving snapshots (press Ctrl+C to stop):\n");

    loop {
        if let Some(state) = source.poll() {
            let now = Local::now().timestamp();
            let buckets =
                compute_buckets(now, state.monitor_start("api"), state.incidents("api"), &Local);
            let current = &buckets[buckets.len() - 1];

            println!(
                "api: {} | {}% this hour, down {}s{}",
                if state.is_down("api") { "DOWN" } else { "up" },
                current.uptime_label().unwrap_or_else(|| "-".to_string()),
                current.down_secs,
                if current.reasons.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", current.reasons.join("; "))
                }
            );
        }

        thread::sleep(Duration::from_millis(100));
    }
}
