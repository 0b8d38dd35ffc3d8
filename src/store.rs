// MIT License

//! The status store contract and its in-memory reference implementation.
//!
//! The store is a passive collaborator: it holds the arming status, the
//! alarm status, and the sensor inventory, and never makes decisions. All
//! transition logic lives in the coordinator, which is the only writer of
//! the two status fields.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::sensor::Sensor;
use crate::status::{AlarmStatus, ArmingStatus};

/// Durable holder of panel statuses and the sensor inventory.
///
/// Implementations must be safe for concurrent access; the coordinator
/// serializes its own calls but a backend may also be shared with other
/// components (a settings UI, an exporter).
pub trait StatusStore: Send + Sync {
    /// Current arming status.
    fn arming_status(&self) -> Result<ArmingStatus>;

    /// Persist a new arming status.
    fn set_arming_status(&self, status: ArmingStatus) -> Result<()>;

    /// Current alarm status.
    fn alarm_status(&self) -> Result<AlarmStatus>;

    /// Persist a new alarm status.
    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()>;

    /// Snapshot of every registered sensor.
    fn sensors(&self) -> Result<Vec<Sensor>>;

    /// Register a sensor. Re-adding an id replaces the stored entry.
    fn add_sensor(&self, sensor: Sensor) -> Result<()>;

    /// Remove a sensor by id. Removing an unknown id is a no-op.
    fn remove_sensor(&self, id: &str) -> Result<()>;

    /// Persist the current field values of a registered sensor, keyed by
    /// its id. Fails with [`Error::UnknownSensor`] if the id was never
    /// added; sensors are not created implicitly.
    fn update_sensor(&self, sensor: &Sensor) -> Result<()>;
}

fn lock_err(context: &'static str) -> Error {
    Error::Store {
        reason: format!("poisoned lock: {context}"),
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    arming: ArmingStatus,
    alarm: AlarmStatus,
    sensors: BTreeMap<String, Sensor>,
}

/// Thread-safe in-memory [`StatusStore`].
///
/// Intended for tests, demos, and embedded use. Starts disarmed with no
/// alarm and an empty sensor inventory; sensors iterate in id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusStore for MemoryStore {
    fn arming_status(&self) -> Result<ArmingStatus> {
        let state = self.state.read().map_err(|_| lock_err("arming_status"))?;
        Ok(state.arming)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("set_arming_status"))?;
        state.arming = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus> {
        let state = self.state.read().map_err(|_| lock_err("alarm_status"))?;
        Ok(state.alarm)
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("set_alarm_status"))?;
        state.alarm = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>> {
        let state = self.state.read().map_err(|_| lock_err("sensors"))?;
        Ok(state.sensors.values().cloned().collect())
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        let mut state = self.state.write().map_err(|_| lock_err("add_sensor"))?;
        state.sensors.insert(sensor.id.clone(), sensor);
        Ok(())
    }

    fn remove_sensor(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().map_err(|_| lock_err("remove_sensor"))?;
        state.sensors.remove(id);
        Ok(())
    }

    fn update_sensor(&self, sensor: &Sensor) -> Result<()> {
        let mut state = self.state.write().map_err(|_| lock_err("update_sensor"))?;
        match state.sensors.get_mut(&sensor.id) {
            Some(existing) => {
                *existing = sensor.clone();
                Ok(())
            }
            None => Err(Error::UnknownSensor {
                id: sensor.id.clone(),
            }),
        }
    }
}
