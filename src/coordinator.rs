// MIT License

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::detect::{CameraImage, CatDetector, CAT_SENSITIVITY};
use crate::error::{Error, Result};
use crate::listener::{ListenerRegistry, StatusListener};
use crate::sensor::Sensor;
use crate::status::{AlarmStatus, ArmingStatus};
use crate::store::StatusStore;

/// The main public API: owns the alarm decision logic for one panel.
///
/// The coordinator combines arming status, sensor activity, and camera
/// frames into one of three alarm states, persists every decision through
/// its [`StatusStore`], and broadcasts changes to registered
/// [`StatusListener`]s. Each operation runs under a single internal mutex,
/// so a full read-decide-persist-notify sequence is atomic with respect to
/// every other operation; share one instance across threads with `Arc`.
///
/// # Example
///
/// ```
/// use housecat::{
///     AlarmCoordinator, AlarmStatus, ArmingStatus, FixedCatDetector, MemoryStore, Sensor,
///     SensorType,
/// };
///
/// fn main() -> housecat::Result<()> {
///     let panel = AlarmCoordinator::new(MemoryStore::new(), FixedCatDetector::always(false));
///
///     panel.add_sensor(Sensor::new("front-door", SensorType::Door))?;
///     panel.set_arming_status(ArmingStatus::ArmedAway)?;
///
///     // A tripped sensor puts the panel on notice.
///     panel.change_sensor_activation_status("front-door", true)?;
///     assert_eq!(panel.alarm_status()?, AlarmStatus::PendingAlarm);
///
///     // Disarming stands it down.
///     panel.set_arming_status(ArmingStatus::Disarmed)?;
///     assert_eq!(panel.alarm_status()?, AlarmStatus::NoAlarm);
///     Ok(())
/// }
/// ```
pub struct AlarmCoordinator {
    inner: Mutex<Inner>,
}

struct Inner {
    store: Box<dyn StatusStore>,
    detector: Box<dyn CatDetector>,
    listeners: ListenerRegistry,
    cat_detected: bool,
}

impl AlarmCoordinator {
    /// Create a coordinator over the given store and detector.
    ///
    /// The store's current contents are taken as-is; a fresh panel usually
    /// starts from a store holding `Disarmed` / `NoAlarm`.
    pub fn new(store: impl StatusStore + 'static, detector: impl CatDetector + 'static) -> Self {
        Self {
            inner: Mutex::new(Inner {
                store: Box::new(store),
                detector: Box::new(detector),
                listeners: ListenerRegistry::new(),
                cat_detected: false,
            }),
        }
    }

    /// Lock the interior, recovering the guard if a collaborator panicked
    /// mid-operation; everything already persisted stays valid.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Alarm decisions ---

    /// Set the arming status, applying the side effects an arming change
    /// carries: disarming stands the alarm down to `NoAlarm`; arming resets
    /// every sensor to inactive through the normal per-sensor transition
    /// path; arming to `ArmedHome` while a cat is on camera trips the
    /// alarm immediately. Listeners receive `on_sensor_status_changed`
    /// after the new status is persisted.
    pub fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.lock().set_arming_status(status)
    }

    /// Analyze a camera frame for a cat and fold the result into the alarm
    /// state: a cat while `ArmedHome` trips the alarm; no cat with every
    /// sensor inactive stands the panel down to `NoAlarm`. Listeners
    /// receive `on_cat_detected` with the result, which is also returned.
    ///
    /// Fails with [`Error::EmptyImage`] before anything else happens if
    /// the frame carries no pixel data.
    pub fn process_image(&self, image: &CameraImage) -> Result<bool> {
        self.lock().process_image(image)
    }

    /// Record a sensor's new activation state and run the alarm transition
    /// it calls for: activation escalates `NoAlarm` to `PendingAlarm` and
    /// `PendingAlarm` to `Alarm` (never while disarmed); deactivation of an
    /// active sensor steps `PendingAlarm` back to `NoAlarm` and `Alarm`
    /// back to `PendingAlarm`. While the alarm is already sounding, sensor
    /// changes are recorded without touching the alarm. The sensor's flag
    /// is always persisted, even when no transition fires.
    pub fn change_sensor_activation_status(&self, sensor_id: &str, active: bool) -> Result<()> {
        self.lock().change_sensor_activation_status(sensor_id, active)
    }

    /// Alternate deactivation entry point for sensors that drop out
    /// without a normal activation change: steps the alarm down when the
    /// sensor is already inactive during `PendingAlarm`, or when the panel
    /// is disarmed with the alarm still sounding. The sensor is
    /// re-persisted as-is.
    pub fn deactivate_sensor(&self, sensor_id: &str) -> Result<()> {
        self.lock().deactivate_sensor(sensor_id)
    }

    /// Set the alarm status directly: persist it, then notify listeners.
    /// Every internal transition routes through this same primitive.
    pub fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.lock().set_alarm_status(status)
    }

    // --- Status and inventory pass-throughs ---

    /// Current alarm status.
    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.lock().store.alarm_status()
    }

    /// Current arming status.
    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.lock().store.arming_status()
    }

    /// Snapshot of every registered sensor, in store order.
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.lock().store.sensors()
    }

    /// Register a sensor. No alarm transition fires.
    pub fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        debug!("Adding sensor {} ({})", sensor.id, sensor.kind);
        self.lock().store.add_sensor(sensor)
    }

    /// Remove a sensor by id. No alarm transition fires.
    pub fn remove_sensor(&self, sensor_id: &str) -> Result<()> {
        debug!("Removing sensor {}", sensor_id);
        self.lock().store.remove_sensor(sensor_id)
    }

    // --- Listeners ---

    /// Register a listener for status updates. Adding the same `Arc`
    /// twice keeps a single registration.
    pub fn add_status_listener(&self, listener: Arc<dyn StatusListener>) {
        self.lock().listeners.add(listener);
    }

    /// Drop a listener. Removing one that was never added is a no-op.
    pub fn remove_status_listener(&self, listener: &Arc<dyn StatusListener>) {
        self.lock().listeners.remove(listener);
    }
}

impl Inner {
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        debug!("Arming status change requested: {}", status);
        if status == ArmingStatus::ArmedHome && self.cat_detected {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        }
        if status == ArmingStatus::Disarmed {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        } else {
            self.reset_all_sensors()?;
        }
        self.store.set_arming_status(status)?;
        info!("Arming status set to {}", status);
        self.listeners.notify_sensor_status_changed();
        Ok(())
    }

    /// Arming resets the whole inventory to inactive, one sensor at a
    /// time through the same path a normal activation change takes, so
    /// each reset may also step the alarm down.
    fn reset_all_sensors(&mut self) -> Result<()> {
        let sensors = self.store.sensors()?;
        for sensor in &sensors {
            debug!("Resetting sensor {} (active {} -> false)", sensor.id, sensor.active);
            self.apply_activation_change(sensor, false)?;
        }
        Ok(())
    }

    fn process_image(&mut self, image: &CameraImage) -> Result<bool> {
        if image.is_empty() {
            return Err(Error::EmptyImage);
        }
        let cat = self.detector.contains_cat(image, CAT_SENSITIVITY)?;
        self.handle_cat_detected(cat)?;
        Ok(cat)
    }

    /// Fold a fresh detection result into the alarm state and remember it
    /// for later arming changes.
    fn handle_cat_detected(&mut self, cat: bool) -> Result<()> {
        debug!("Image processed: cat_detected={}", cat);
        self.cat_detected = cat;
        if self.store.arming_status()? == ArmingStatus::ArmedHome && cat {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        } else if !cat && self.all_sensors_inactive()? {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }
        self.listeners.notify_cat_detected(cat);
        Ok(())
    }

    fn all_sensors_inactive(&self) -> Result<bool> {
        Ok(self.store.sensors()?.iter().all(|s| !s.active))
    }

    fn change_sensor_activation_status(&mut self, sensor_id: &str, active: bool) -> Result<()> {
        let sensor = self.find_sensor(sensor_id)?;
        debug!(
            "Sensor {} activation change: {} -> {}",
            sensor_id, sensor.active, active
        );
        self.apply_activation_change(&sensor, active)
    }

    /// Shared core of every activation change: run the alarm transition
    /// the current statuses call for, then persist the sensor's new flag
    /// exactly once.
    fn apply_activation_change(&mut self, sensor: &Sensor, active: bool) -> Result<()> {
        if self.store.alarm_status()? != AlarmStatus::Alarm {
            if active {
                self.handle_sensor_activated()?;
            } else if sensor.active {
                self.handle_sensor_deactivated()?;
            }
        }
        let mut updated = sensor.clone();
        updated.active = active;
        self.store.update_sensor(&updated)
    }

    fn deactivate_sensor(&mut self, sensor_id: &str) -> Result<()> {
        let sensor = self.find_sensor(sensor_id)?;
        let alarm = self.store.alarm_status()?;
        let arming = self.store.arming_status()?;
        debug!(
            "Sensor {} deactivation (active={}, alarm={}, arming={})",
            sensor_id, sensor.active, alarm, arming
        );
        if !sensor.active && alarm == AlarmStatus::PendingAlarm {
            self.handle_sensor_deactivated()?;
        } else if arming == ArmingStatus::Disarmed && alarm == AlarmStatus::Alarm {
            self.handle_sensor_deactivated()?;
        }
        self.store.update_sensor(&sensor)
    }

    fn handle_sensor_activated(&mut self) -> Result<()> {
        if self.store.arming_status()? == ArmingStatus::Disarmed {
            // Activity on a disarmed panel is not a problem.
            return Ok(());
        }
        match self.store.alarm_status()? {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => Ok(()),
        }
    }

    fn handle_sensor_deactivated(&mut self) -> Result<()> {
        match self.store.alarm_status()? {
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::NoAlarm),
            AlarmStatus::Alarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::NoAlarm => Ok(()),
        }
    }

    /// Persist a new alarm status, then notify listeners. Persisting first
    /// means a listener that reads the store from its callback already
    /// sees the value it was told about.
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.store.set_alarm_status(status)?;
        info!("Alarm status set to {}", status);
        self.listeners.notify_alarm_status_changed(status);
        Ok(())
    }

    fn find_sensor(&self, id: &str) -> Result<Sensor> {
        self.store
            .sensors()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownSensor { id: id.to_string() })
    }
}
