// MIT License
//
//! # housecat
//!
//! Alarm state coordination for a home security panel: arming modes,
//! door/window/motion sensors, and camera-based cat detection combine into
//! a three-level alarm state, with every change persisted through a
//! pluggable store and broadcast to registered listeners.
//!
//! The crate owns the decisions only. Persistence lives behind the
//! [`StatusStore`] trait and image analysis behind [`CatDetector`];
//! thread-safe reference implementations of both ship with the crate. No
//! external dependencies beyond serde, thiserror, and tracing.
//!
//! ## Quick Start
//!
//! ```
//! use housecat::{
//!     AlarmCoordinator, AlarmStatus, ArmingStatus, FixedCatDetector, MemoryStore, Sensor,
//!     SensorType,
//! };
//!
//! fn main() -> housecat::Result<()> {
//!     let panel = AlarmCoordinator::new(MemoryStore::new(), FixedCatDetector::always(false));
//!
//!     panel.add_sensor(Sensor::new("front-door", SensorType::Door))?;
//!     panel.add_sensor(Sensor::new("kitchen-window", SensorType::Window))?;
//!
//!     panel.set_arming_status(ArmingStatus::ArmedAway)?;
//!     panel.change_sensor_activation_status("front-door", true)?;
//!     assert_eq!(panel.alarm_status()?, AlarmStatus::PendingAlarm);
//!
//!     panel.change_sensor_activation_status("kitchen-window", true)?;
//!     assert_eq!(panel.alarm_status()?, AlarmStatus::Alarm);
//!     Ok(())
//! }
//! ```

pub mod coordinator;
pub mod detect;
pub mod error;
pub mod listener;
pub mod sensor;
pub mod status;
pub mod store;

// Re-exports for convenience
pub use coordinator::AlarmCoordinator;
pub use detect::{CameraImage, CatDetector, FixedCatDetector, CAT_SENSITIVITY};
pub use error::{Error, Result};
pub use listener::StatusListener;
pub use sensor::{Sensor, SensorType};
pub use status::{AlarmStatus, ArmingStatus};
pub use store::{MemoryStore, StatusStore};
