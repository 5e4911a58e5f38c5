//! Shared vocabulary for the sensor fleet.

use serde::{Deserialize, Serialize};

/// Identity of one remote sensor agent, as embedded in registration,
/// de-registration, and observation-change events. Carried inside an
/// envelope; it has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDescriptor {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sensor_name: Option<String>,
    #[serde(default)]
    pub sensor_os: Option<String>,
}

impl SensorDescriptor {
    pub fn new(
        address: impl Into<String>,
        sensor_name: impl Into<String>,
        sensor_os: impl Into<String>,
    ) -> Self {
        Self {
            address: Some(address.into()),
            sensor_name: Some(sensor_name.into()),
            sensor_os: Some(sensor_os.into()),
        }
    }
}
