//! Feed events — the vocabulary of the monitoring stream.
//!
//! Every inbound message is a flat JSON object carrying a `kind` tag.
//! Known kinds decode into [`FeedEvent`]; anything else stays raw in the
//! envelope so dispatch can route it to the diagnostic channel instead of
//! the operator feed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SensorDescriptor;

// ---------------------------------------------------------------------------
// EventEnvelope
// ---------------------------------------------------------------------------

/// One inbound message exactly as delivered by the transport: the `kind`
/// tag, pulled out for classification, plus the untouched payload object.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub kind: String,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wrap a raw feed message. A missing or non-string `kind` yields an
    /// empty tag, which dispatch treats as unrecognized.
    pub fn from_value(payload: serde_json::Value) -> Self {
        let kind = payload
            .get("kind")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Self { kind, payload }
    }

    /// Whether this envelope's kind has a renderer bound to it.
    pub fn is_known_kind(&self) -> bool {
        KNOWN_KINDS.contains(&self.kind.as_str())
    }
}

/// The kinds the console renders into the operator feed. Everything else
/// is surfaced through the diagnostic channel only.
pub const KNOWN_KINDS: &[&str] = &[
    "heartbeat",
    "sensor-registration",
    "sensor-deregistration",
    "sensors-status",
    "sensor-observe",
];

// ---------------------------------------------------------------------------
// FeedEvent
// ---------------------------------------------------------------------------

/// A decoded feed event. The `kind` tag selects the variant.
///
/// Every field is optional: a publisher that omits a field degrades that
/// field at render time, it does not lose the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FeedEvent {
    Heartbeat {
        #[serde(default)]
        timestamp: Option<String>,
    },

    SensorRegistration {
        #[serde(default)]
        timestamp: Option<String>,
        #[serde(default)]
        sensor: Option<SensorDescriptor>,
    },

    SensorDeregistration {
        #[serde(default)]
        timestamp: Option<String>,
        #[serde(default)]
        sensor: Option<SensorDescriptor>,
    },

    /// Point-in-time fleet aggregate. The publisher owns aggregation; the
    /// console only displays the snapshot.
    SensorsStatus {
        #[serde(default, rename = "hosts")]
        host_count: Option<u64>,
        #[serde(default, rename = "sensor_type")]
        sensor_type_counts: BTreeMap<String, u64>,
        #[serde(default, rename = "sensor_os")]
        os_counts: BTreeMap<String, u64>,
    },

    SensorObserve {
        #[serde(default)]
        timestamp: Option<String>,
        #[serde(default)]
        old_level: Option<i64>,
        #[serde(default)]
        new_level: Option<i64>,
        #[serde(default)]
        sensor: Option<SensorDescriptor>,
    },
}

impl FeedEvent {
    /// The kebab-case kind string for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedEvent::Heartbeat { .. } => "heartbeat",
            FeedEvent::SensorRegistration { .. } => "sensor-registration",
            FeedEvent::SensorDeregistration { .. } => "sensor-deregistration",
            FeedEvent::SensorsStatus { .. } => "sensors-status",
            FeedEvent::SensorObserve { .. } => "sensor-observe",
        }
    }

    /// Decode a known envelope. Fails on type-mismatched fields, never on
    /// merely missing ones.
    pub fn from_envelope(envelope: &EventEnvelope) -> Result<Self, serde_json::Error> {
        serde_json::from_value(envelope.payload.clone())
    }

    /// Serialize back to the wire shape (the flat tagged object).
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("FeedEvent serialization should never fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_matches_serde_tag() {
        let event = FeedEvent::Heartbeat {
            timestamp: Some("2024-01-01T00:00:00Z".into()),
        };
        assert_eq!(event.kind(), "heartbeat");

        let json = event.to_payload();
        assert_eq!(json["kind"].as_str().unwrap(), "heartbeat");
    }

    #[test]
    fn every_known_kind_has_a_variant() {
        // The dispatch table and the serde tag set must agree.
        let events = [
            FeedEvent::Heartbeat { timestamp: None },
            FeedEvent::SensorRegistration {
                timestamp: None,
                sensor: None,
            },
            FeedEvent::SensorDeregistration {
                timestamp: None,
                sensor: None,
            },
            FeedEvent::SensorsStatus {
                host_count: None,
                sensor_type_counts: BTreeMap::new(),
                os_counts: BTreeMap::new(),
            },
            FeedEvent::SensorObserve {
                timestamp: None,
                old_level: None,
                new_level: None,
                sensor: None,
            },
        ];
        for event in &events {
            assert!(KNOWN_KINDS.contains(&event.kind()));
            let envelope = EventEnvelope::from_value(event.to_payload());
            assert!(envelope.is_known_kind());
            FeedEvent::from_envelope(&envelope).unwrap();
        }
        assert_eq!(events.len(), KNOWN_KINDS.len());
    }

    #[test]
    fn observe_roundtrip() {
        let event = FeedEvent::SensorObserve {
            timestamp: Some("2024-01-01T00:00:00Z".into()),
            old_level: Some(1),
            new_level: Some(3),
            sensor: Some(SensorDescriptor::new("10.0.0.5", "s1", "linux")),
        };

        let payload = event.to_payload();
        assert_eq!(payload["kind"], "sensor-observe");
        assert_eq!(payload["sensor"]["sensor_name"], "s1");

        match FeedEvent::from_envelope(&EventEnvelope::from_value(payload)).unwrap() {
            FeedEvent::SensorObserve {
                old_level,
                new_level,
                sensor,
                ..
            } => {
                assert_eq!(old_level, Some(1));
                assert_eq!(new_level, Some(3));
                assert_eq!(sensor.unwrap().address.as_deref(), Some("10.0.0.5"));
            }
            other => panic!("Expected SensorObserve, got {other:?}"),
        }
    }

    #[test]
    fn summary_uses_wire_field_names() {
        let envelope = EventEnvelope::from_value(json!({
            "kind": "sensors-status",
            "hosts": 12,
            "sensor_type": {"lsof": 3, "ps": 9},
            "sensor_os": {"linux": 10, "windows": 2},
        }));

        match FeedEvent::from_envelope(&envelope).unwrap() {
            FeedEvent::SensorsStatus {
                host_count,
                sensor_type_counts,
                os_counts,
            } => {
                assert_eq!(host_count, Some(12));
                assert_eq!(sensor_type_counts.get("lsof"), Some(&3));
                assert_eq!(os_counts.get("windows"), Some(&2));
            }
            other => panic!("Expected SensorsStatus, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_decode_to_none() {
        // Schema drift on a known kind degrades field-by-field.
        let envelope = EventEnvelope::from_value(json!({"kind": "sensor-registration"}));
        match FeedEvent::from_envelope(&envelope).unwrap() {
            FeedEvent::SensorRegistration { timestamp, sensor } => {
                assert!(timestamp.is_none());
                assert!(sensor.is_none());
            }
            other => panic!("Expected SensorRegistration, got {other:?}"),
        }
    }

    #[test]
    fn unknown_and_untagged_kinds_are_not_known() {
        let drifted = EventEnvelope::from_value(json!({"kind": "sensor-upgrade"}));
        assert_eq!(drifted.kind, "sensor-upgrade");
        assert!(!drifted.is_known_kind());

        let untagged = EventEnvelope::from_value(json!({"timestamp": "T"}));
        assert_eq!(untagged.kind, "");
        assert!(!untagged.is_known_kind());
    }
}
