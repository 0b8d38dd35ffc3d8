//! Example: Walk the arming modes with a cat on camera.

use housecat::{
    AlarmCoordinator, ArmingStatus, CameraImage, FixedCatDetector, MemoryStore, Sensor, SensorType,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // The scripted detector sees a cat on the first frame only.
    let panel = AlarmCoordinator::new(
        MemoryStore::new(),
        FixedCatDetector::scripted([true, false]),
    );
    panel.add_sensor(Sensor::new("hall", SensorType::Motion))?;
    let frame = CameraImage::new(640, 480, vec![0; 640 * 480 * 3]);

    // A cat wanders past while the panel is disarmed: remembered, harmless.
    let cat = panel.process_image(&frame)?;
    println!(
        "Disarmed, cat={}: alarm={}",
        cat,
        panel.alarm_status()?
    );

    // Arming away ignores the cat.
    panel.set_arming_status(ArmingStatus::ArmedAway)?;
    println!("Armed away: alarm={}", panel.alarm_status()?);

    // Arming home while the last frame had a cat trips the alarm.
    panel.set_arming_status(ArmingStatus::ArmedHome)?;
    println!("Armed home: alarm={}", panel.alarm_status()?);

    // A fresh cat-free frame with quiet sensors stands the panel down.
    let cat = panel.process_image(&frame)?;
    println!(
        "Armed home, cat={}: alarm={}",
        cat,
        panel.alarm_status()?
    );

    panel.set_arming_status(ArmingStatus::Disarmed)?;
    println!("Disarmed: alarm={}", panel.alarm_status()?);

    Ok(())
}
