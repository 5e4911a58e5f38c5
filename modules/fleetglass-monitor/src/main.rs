//! FleetGlass monitor — terminal front-end for the console core.
//!
//! Runs the console against the in-process feed with a simulated fleet on
//! the publishing side; swap the transport for a channel client to watch a
//! live deployment.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tokio::time::{sleep, Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleetglass_common::Config;
use fleetglass_console::{ConsoleSession, FeedPublisher, LocalFeed, LogEntry, LogSink, MemoryLog};

/// Prints each entry as it lands and keeps the newest-first backlog.
struct TermLog {
    backlog: MemoryLog,
}

impl LogSink for TermLog {
    fn prepend(&mut self, entry: LogEntry) {
        print!("{entry}");
        self.backlog.prepend(entry);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fleetglass_console=info".parse()?)
                .add_directive("fleetglass_monitor=info".parse()?),
        )
        .init();

    info!("FleetGlass monitor starting...");

    let config = Config::from_env();
    config.log_redacted();

    let (feed, publisher) = LocalFeed::accepting();
    let fleet = tokio::spawn(simulate_fleet(publisher));

    let mut session = ConsoleSession::new(feed, TermLog { backlog: MemoryLog::new() });
    session.run().await?;
    fleet.await?;

    info!(entries = session.log().backlog.len(), "Session ended");
    Ok(())
}

/// A small scripted fleet: registration, heartbeats with occasional
/// observation level changes, a summary snapshot, then de-registration.
async fn simulate_fleet(publisher: FeedPublisher) {
    let sensor = json!({
        "address": "10.0.0.5",
        "sensor_name": "lsof-sensor-1",
        "sensor_os": "linux",
    });

    publisher.publish(json!({
        "kind": "sensor-registration",
        "timestamp": now(),
        "sensor": sensor.clone(),
    }));

    let mut level = 1i64;
    for _ in 0..5 {
        sleep(Duration::from_millis(400)).await;
        publisher.publish(json!({"kind": "heartbeat", "timestamp": now()}));

        if rand::random_bool(0.4) {
            let next = rand::random_range(1..=4i64);
            if next != level {
                publisher.publish(json!({
                    "kind": "sensor-observe",
                    "timestamp": now(),
                    "old_level": level,
                    "new_level": next,
                    "sensor": sensor.clone(),
                }));
                level = next;
            }
        }
    }

    publisher.publish(json!({
        "kind": "sensors-status",
        "hosts": 1,
        "sensor_type": {"lsof": 1},
        "sensor_os": {"linux": 1},
    }));
    publisher.publish(json!({
        "kind": "sensor-deregistration",
        "timestamp": now(),
        "sensor": sensor,
    }));
}

fn now() -> String {
    Utc::now().to_rfc3339()
}
