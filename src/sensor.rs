// MIT License

use std::fmt;

use serde::{Deserialize, Serialize};

/// The physical kind of sensor input.
///
/// Opaque to the alarm logic: every kind trips the same transitions. It is
/// carried so stores and UIs can label sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl SensorType {
    /// The persisted string representation (e.g., "DOOR").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Door => "DOOR",
            Self::Window => "WINDOW",
            Self::Motion => "MOTION",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Door => "Door",
            Self::Window => "Window",
            Self::Motion => "Motion",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single door, window, or motion sensor known to the panel.
///
/// Identity is the caller-assigned `id` string; the store keys sensors by
/// it and the coordinator never invents or validates ids. The `active` flag
/// is mutated only by the coordinator's activation operations, which always
/// write the change back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    pub kind: SensorType,
    pub active: bool,
}

impl Sensor {
    /// Create an inactive sensor.
    pub fn new(id: impl Into<String>, kind: SensorType) -> Self {
        Self {
            id: id.into(),
            kind,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
