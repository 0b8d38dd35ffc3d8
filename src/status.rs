// MIT License

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arming mode of the panel.
///
/// Persisted by the [`StatusStore`](crate::store::StatusStore) and changed
/// only through [`AlarmCoordinator::set_arming_status`](crate::AlarmCoordinator::set_arming_status),
/// which applies the side effects an arming change carries (alarm reset on
/// disarm, sensor reset on arm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    /// Panel is off. Sensor activity never escalates the alarm.
    Disarmed,
    /// Armed with occupants at home. A detected cat trips the alarm.
    ArmedHome,
    /// Armed with the home empty.
    ArmedAway,
}

impl ArmingStatus {
    /// The persisted string representation (e.g., "ARMED_HOME").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disarmed => "DISARMED",
            Self::ArmedHome => "ARMED_HOME",
            Self::ArmedAway => "ARMED_AWAY",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }

    /// True for either armed mode.
    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}

impl Default for ArmingStatus {
    fn default() -> Self {
        Self::Disarmed
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escalation state of the alarm.
///
/// The coordinator is the sole writer: every change is persisted to the
/// store first and then broadcast to listeners, so observers never see a
/// notification for a status that is not already durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    /// Quiet. Nothing has tripped.
    NoAlarm,
    /// A sensor tripped while armed; one more activation escalates.
    PendingAlarm,
    /// Full alarm.
    Alarm,
}

impl AlarmStatus {
    /// The persisted string representation (e.g., "PENDING_ALARM").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAlarm => "NO_ALARM",
            Self::PendingAlarm => "PENDING_ALARM",
            Self::Alarm => "ALARM",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoAlarm => "No alarm",
            Self::PendingAlarm => "Pending alarm",
            Self::Alarm => "Alarm active",
        }
    }
}

impl Default for AlarmStatus {
    fn default() -> Self {
        Self::NoAlarm
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arming_is_armed() {
        assert!(!ArmingStatus::Disarmed.is_armed());
        assert!(ArmingStatus::ArmedHome.is_armed());
        assert!(ArmingStatus::ArmedAway.is_armed());
    }

    #[test]
    fn test_arming_display_matches_as_str() {
        for status in [
            ArmingStatus::Disarmed,
            ArmingStatus::ArmedHome,
            ArmingStatus::ArmedAway,
        ] {
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_alarm_display_matches_as_str() {
        for status in [
            AlarmStatus::NoAlarm,
            AlarmStatus::PendingAlarm,
            AlarmStatus::Alarm,
        ] {
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ArmingStatus::default(), ArmingStatus::Disarmed);
        assert_eq!(AlarmStatus::default(), AlarmStatus::NoAlarm);
    }
}
