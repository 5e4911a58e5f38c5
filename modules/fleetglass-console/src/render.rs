//! Event renderers — pure payload-to-entry transformations.
//!
//! One renderer per feed kind, plus the control-plane notice. A missing
//! field renders as `undefined` rather than failing the entry; losing one
//! line is acceptable, losing the console is not.

use std::collections::BTreeMap;

use fleetglass_common::SensorDescriptor;

use crate::entry::{EntryCategory, LogEntry};

/// Fixed confirmation notice for a successful topic join.
pub const JOIN_OK_TITLE: &str = "Subscribed to C2";
pub const JOIN_OK_MESSAGE: &str =
    "Successfully subscribed to Sensing API Command and Control Monitoring stream.";

const UNDEFINED: &str = "undefined";

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNDEFINED)
}

fn number<N: ToString>(value: Option<N>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| v.to_string())
}

fn sensor_fields(sensor: &Option<SensorDescriptor>) -> (&str, &str, &str) {
    match sensor {
        Some(s) => (text(&s.address), text(&s.sensor_name), text(&s.sensor_os)),
        None => (UNDEFINED, UNDEFINED, UNDEFINED),
    }
}

fn detail_lines(timestamp: &Option<String>, sensor: &Option<SensorDescriptor>) -> String {
    let (address, name, os) = sensor_fields(sensor);
    format!(
        "timestamp: {}\naddress: {address}\nsensor: {name}\nos: {os}",
        text(timestamp)
    )
}

fn pretty_counts(counts: &BTreeMap<String, u64>) -> String {
    serde_json::to_string_pretty(counts).unwrap_or_else(|_| "{}".to_string())
}

pub fn heartbeat(timestamp: &Option<String>) -> LogEntry {
    LogEntry {
        category: EntryCategory::Heartbeat,
        title: "Heartbeat".to_string(),
        body: text(timestamp).to_string(),
    }
}

pub fn sensor_registered(
    timestamp: &Option<String>,
    sensor: &Option<SensorDescriptor>,
) -> LogEntry {
    LogEntry {
        category: EntryCategory::Registration,
        title: "Sensor Registration".to_string(),
        body: detail_lines(timestamp, sensor),
    }
}

pub fn sensor_deregistered(
    timestamp: &Option<String>,
    sensor: &Option<SensorDescriptor>,
) -> LogEntry {
    LogEntry {
        category: EntryCategory::Deregistration,
        title: "Sensor De-registration".to_string(),
        body: detail_lines(timestamp, sensor),
    }
}

/// The levels appear in the title and again in the detail list. The
/// duplication is intentional: the title scans, the list lines up with
/// the other fields.
pub fn observation_level_changed(
    timestamp: &Option<String>,
    old_level: Option<i64>,
    new_level: Option<i64>,
    sensor: &Option<SensorDescriptor>,
) -> LogEntry {
    let old = number(old_level);
    let new = number(new_level);
    LogEntry {
        category: EntryCategory::Observation,
        title: format!("Sensor Observation Level Change ({old} → {new})"),
        body: format!(
            "{}\nold level: {old}\nnew level: {new}",
            detail_lines(timestamp, sensor)
        ),
    }
}

pub fn sensor_summary(
    host_count: Option<u64>,
    sensor_type_counts: &BTreeMap<String, u64>,
    os_counts: &BTreeMap<String, u64>,
) -> LogEntry {
    LogEntry {
        category: EntryCategory::Summary,
        title: "Sensor Summary".to_string(),
        body: format!(
            "{} sensor hosts\nSensor Types\n{}\nOSes\n{}",
            number(host_count),
            pretty_counts(sensor_type_counts),
            pretty_counts(os_counts),
        ),
    }
}

/// Control-plane notice, used by the session itself rather than the feed.
pub fn info_notice(title: &str, message: &str) -> LogEntry {
    LogEntry {
        category: EntryCategory::Info,
        title: title.to_string(),
        body: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_title_and_body_both_carry_levels() {
        let entry = observation_level_changed(
            &Some("T".into()),
            Some(1),
            Some(3),
            &Some(SensorDescriptor::new("10.0.0.5", "s1", "linux")),
        );
        assert!(entry.title.contains('1') && entry.title.contains('3'));
        assert!(entry.body.contains("old level: 1"));
        assert!(entry.body.contains("new level: 3"));
        assert!(entry.body.contains("address: 10.0.0.5"));
    }

    #[test]
    fn missing_fields_render_as_undefined() {
        let entry = sensor_registered(&None, &None);
        assert_eq!(
            entry.body,
            "timestamp: undefined\naddress: undefined\nsensor: undefined\nos: undefined"
        );

        let partial = sensor_registered(
            &Some("T".into()),
            &Some(SensorDescriptor {
                address: Some("10.0.0.9".into()),
                sensor_name: None,
                sensor_os: None,
            }),
        );
        assert!(partial.body.contains("sensor: undefined"));
        assert!(partial.body.contains("address: 10.0.0.9"));
    }

    #[test]
    fn summary_serializes_both_count_maps() {
        let types = BTreeMap::from([("lsof".to_string(), 3u64)]);
        let oses = BTreeMap::from([("linux".to_string(), 10u64)]);
        let entry = sensor_summary(Some(12), &types, &oses);
        assert!(entry.body.starts_with("12 sensor hosts"));
        assert!(entry.body.contains("\"lsof\": 3"));
        assert!(entry.body.contains("\"linux\": 10"));
    }

    #[test]
    fn heartbeat_is_minimal() {
        let entry = heartbeat(&Some("2024-01-01T00:00:00Z".into()));
        assert_eq!(entry.category, EntryCategory::Heartbeat);
        assert_eq!(entry.body, "2024-01-01T00:00:00Z");
    }
}
