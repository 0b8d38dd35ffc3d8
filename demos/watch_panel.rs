//! Example: Subscribe to panel status events and print changes.

use std::sync::Arc;

use housecat::{
    AlarmCoordinator, AlarmStatus, ArmingStatus, FixedCatDetector, MemoryStore, Sensor, SensorType,
    StatusListener,
};

struct PrintingListener;

impl StatusListener for PrintingListener {
    fn on_alarm_status_changed(&self, status: AlarmStatus) {
        println!("  [event] alarm -> {} ({})", status, status.description());
    }

    fn on_cat_detected(&self, cat_detected: bool) {
        println!("  [event] cat detected: {}", cat_detected);
    }

    fn on_sensor_status_changed(&self) {
        println!("  [event] sensor inventory changed");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let panel = AlarmCoordinator::new(MemoryStore::new(), FixedCatDetector::always(false));
    panel.add_status_listener(Arc::new(PrintingListener));

    panel.add_sensor(Sensor::new("front-door", SensorType::Door))?;
    panel.add_sensor(Sensor::new("kitchen-window", SensorType::Window))?;
    panel.add_sensor(Sensor::new("hall", SensorType::Motion))?;

    // Show the inventory
    let sensors = panel.sensors()?;
    println!("--- Sensors ({}) ---", sensors.len());
    for sensor in &sensors {
        println!(
            "  {:16} type={:8} active={}",
            sensor.id,
            sensor.kind.description(),
            sensor.active,
        );
    }

    println!("\nArming away...");
    panel.set_arming_status(ArmingStatus::ArmedAway)?;

    println!("\nFront door opens...");
    panel.change_sensor_activation_status("front-door", true)?;
    println!("Alarm status: {}", panel.alarm_status()?);

    println!("\nKitchen window opens...");
    panel.change_sensor_activation_status("kitchen-window", true)?;
    println!("Alarm status: {}", panel.alarm_status()?);

    println!("\nDisarming...");
    panel.set_arming_status(ArmingStatus::Disarmed)?;
    println!("Alarm status: {}", panel.alarm_status()?);

    Ok(())
}
