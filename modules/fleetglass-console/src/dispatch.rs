//! Envelope dispatch — one envelope in, at most one feed entry out.
//!
//! Known kinds decode and render into the operator feed. Unknown kinds go
//! to the diagnostic channel only; schema drift is an operator-debug
//! concern, not feed noise.

use tracing::{debug, warn};

use fleetglass_common::{EventEnvelope, FeedEvent};

use crate::entry::LogEntry;
use crate::render;
use crate::sink::LogSink;

/// Result of dispatching a single envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Rendered into the operator feed.
    Rendered,
    /// The kind has no renderer; recorded on the diagnostic channel only.
    Unrecognized,
    /// A known kind whose payload would not decode.
    Malformed(String),
}

/// Route one envelope to its renderer and prepend the result.
///
/// Total over the input alphabet: every envelope ends up as exactly one
/// feed entry or exactly one diagnostic record. Nothing here panics or
/// returns an error.
pub fn dispatch(envelope: &EventEnvelope, sink: &mut dyn LogSink) -> DispatchOutcome {
    if !envelope.is_known_kind() {
        debug!(
            kind = envelope.kind.as_str(),
            payload = %envelope.payload,
            "Unrecognized event kind"
        );
        return DispatchOutcome::Unrecognized;
    }

    match FeedEvent::from_envelope(envelope) {
        Ok(event) => {
            sink.prepend(entry_for(&event));
            DispatchOutcome::Rendered
        }
        Err(e) => {
            warn!(
                kind = envelope.kind.as_str(),
                error = %e,
                "Failed to decode event payload"
            );
            DispatchOutcome::Malformed(e.to_string())
        }
    }
}

/// The kind-to-renderer table, exhaustive over the known kinds.
fn entry_for(event: &FeedEvent) -> LogEntry {
    match event {
        FeedEvent::Heartbeat { timestamp } => render::heartbeat(timestamp),
        FeedEvent::SensorRegistration { timestamp, sensor } => {
            render::sensor_registered(timestamp, sensor)
        }
        FeedEvent::SensorDeregistration { timestamp, sensor } => {
            render::sensor_deregistered(timestamp, sensor)
        }
        FeedEvent::SensorsStatus {
            host_count,
            sensor_type_counts,
            os_counts,
        } => render::sensor_summary(*host_count, sensor_type_counts, os_counts),
        FeedEvent::SensorObserve {
            timestamp,
            old_level,
            new_level,
            sensor,
        } => render::observation_level_changed(timestamp, *old_level, *new_level, sensor),
    }
}
