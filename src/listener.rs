// MIT License

//! Observer registration and notification fan-out.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use crate::status::AlarmStatus;

/// Observer notified of panel state changes.
///
/// Callbacks run synchronously on the thread driving the coordinator, after
/// the corresponding state is already persisted. A slow listener delays the
/// operation that triggered it; a panicking listener is caught and logged
/// and never affects persisted state or the remaining listeners.
pub trait StatusListener: Send + Sync {
    /// The alarm status changed to `status`.
    fn on_alarm_status_changed(&self, status: AlarmStatus);

    /// An image was processed; `cat_detected` is the detection result.
    fn on_cat_detected(&self, cat_detected: bool);

    /// Sensor activation state may have changed.
    fn on_sensor_status_changed(&self);
}

/// Registered listeners, deduplicated by `Arc` pointer identity.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Vec<Arc<dyn StatusListener>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Adding the same `Arc` twice keeps one entry.
    pub(crate) fn add(&mut self, listener: Arc<dyn StatusListener>) {
        if !self.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    /// Drop a listener. Removing one that was never added is a no-op.
    pub(crate) fn remove(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
    }

    pub(crate) fn notify_alarm_status_changed(&self, status: AlarmStatus) {
        for listener in &self.listeners {
            isolate("on_alarm_status_changed", || {
                listener.on_alarm_status_changed(status)
            });
        }
    }

    pub(crate) fn notify_cat_detected(&self, cat_detected: bool) {
        for listener in &self.listeners {
            isolate("on_cat_detected", || listener.on_cat_detected(cat_detected));
        }
    }

    pub(crate) fn notify_sensor_status_changed(&self) {
        for listener in &self.listeners {
            isolate("on_sensor_status_changed", || {
                listener.on_sensor_status_changed()
            });
        }
    }
}

/// Run one listener callback, catching panics so a misbehaving listener
/// cannot poison the coordinator lock or starve the listeners after it.
fn isolate(event: &'static str, call: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(call)).is_err() {
        warn!("Listener panicked during {}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingListener {
        alarm_events: AtomicUsize,
        cat_events: AtomicUsize,
        sensor_events: AtomicUsize,
    }

    impl StatusListener for CountingListener {
        fn on_alarm_status_changed(&self, _status: AlarmStatus) {
            self.alarm_events.fetch_add(1, Ordering::SeqCst);
        }
        fn on_cat_detected(&self, _cat_detected: bool) {
            self.cat_events.fetch_add(1, Ordering::SeqCst);
        }
        fn on_sensor_status_changed(&self) {
            self.sensor_events.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct PanickingListener;

    impl StatusListener for PanickingListener {
        fn on_alarm_status_changed(&self, _status: AlarmStatus) {
            panic!("listener bug");
        }
        fn on_cat_detected(&self, _cat_detected: bool) {}
        fn on_sensor_status_changed(&self) {}
    }

    #[test]
    fn test_same_arc_registers_once() {
        let mut registry = ListenerRegistry::new();
        let listener = Arc::new(CountingListener::default());
        registry.add(listener.clone());
        registry.add(listener.clone());

        registry.notify_alarm_status_changed(AlarmStatus::Alarm);
        assert_eq!(listener.alarm_events.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distinct_instances_both_fire() {
        let mut registry = ListenerRegistry::new();
        let first = Arc::new(CountingListener::default());
        let second = Arc::new(CountingListener::default());
        registry.add(first.clone());
        registry.add(second.clone());

        registry.notify_cat_detected(true);
        registry.notify_sensor_status_changed();
        assert_eq!(first.cat_events.load(Ordering::SeqCst), 1);
        assert_eq!(second.cat_events.load(Ordering::SeqCst), 1);
        assert_eq!(first.sensor_events.load(Ordering::SeqCst), 1);
        assert_eq!(second.sensor_events.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_silences_a_listener() {
        let mut registry = ListenerRegistry::new();
        let listener = Arc::new(CountingListener::default());
        registry.add(listener.clone());
        let as_dyn: Arc<dyn StatusListener> = listener.clone();
        registry.remove(&as_dyn);

        registry.notify_alarm_status_changed(AlarmStatus::NoAlarm);
        assert_eq!(listener.alarm_events.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_unknown_is_a_noop() {
        let mut registry = ListenerRegistry::new();
        let kept = Arc::new(CountingListener::default());
        registry.add(kept.clone());

        let stranger: Arc<dyn StatusListener> = Arc::new(CountingListener::default());
        registry.remove(&stranger);

        registry.notify_alarm_status_changed(AlarmStatus::Alarm);
        assert_eq!(kept.alarm_events.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_listener_does_not_starve_the_rest() {
        let mut registry = ListenerRegistry::new();
        let survivor = Arc::new(CountingListener::default());
        registry.add(Arc::new(PanickingListener));
        registry.add(survivor.clone());

        registry.notify_alarm_status_changed(AlarmStatus::PendingAlarm);
        assert_eq!(survivor.alarm_events.load(Ordering::SeqCst), 1);
    }
}
