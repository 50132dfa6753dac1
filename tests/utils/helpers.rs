/// Test helper functions and service builders
use pulsewatch::modules::display::{DisplayLabel, UiContext};
use pulsewatch::modules::health::infrastructure::SimulatedHealthStore;
use pulsewatch::modules::health::HealthStore;
use pulsewatch::modules::monitor::{HeartRateMonitor, MonitorPhase};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use std::time::Duration;

/// Label that records every update together with the thread that applied it
#[derive(Clone, Default)]
pub struct RecordingLabel {
    updates: Arc<Mutex<Vec<(ThreadId, String)>>>,
}

impl RecordingLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<(ThreadId, String)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.updates
            .lock()
            .unwrap()
            .last()
            .map(|(_, text)| text.clone())
    }
}

impl DisplayLabel for RecordingLabel {
    fn set_text(&mut self, text: &str) {
        self.updates
            .lock()
            .unwrap()
            .push((std::thread::current().id(), text.to_string()));
    }
}

/// Store, UI loop and monitor wired the way the binary wires them
pub struct TestRig {
    pub store: Arc<SimulatedHealthStore>,
    pub monitor: HeartRateMonitor,
    pub label: RecordingLabel,
    pub ui: UiContext,
}

/// Build the full pipeline against the in-memory store
pub fn build_test_rig() -> TestRig {
    let store = Arc::new(SimulatedHealthStore::new());
    let label = RecordingLabel::new();
    let ui = UiContext::spawn(Box::new(label.clone())).expect("UI loop failed to start");

    let health_store: Arc<dyn HealthStore> = store.clone();
    let monitor = HeartRateMonitor::new(health_store, ui.handle());

    TestRig {
        store,
        monitor,
        label,
        ui,
    }
}

/// Poll until `condition` holds, failing the test on timeout
pub async fn wait_until<F>(condition: F, timeout: Duration, what: &str)
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while !condition() {
        if tokio::time::Instant::now() >= deadline {
            panic!("timed out waiting for {}", what);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Poll until the label's newest text equals `expected`
pub async fn wait_for_label(label: &RecordingLabel, expected: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if label.last_text().as_deref() == Some(expected) {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            panic!(
                "timed out waiting for label {:?}, last was {:?}",
                expected,
                label.last_text()
            );
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Poll until the monitor settles in `phase`
pub async fn wait_for_phase(monitor: &HeartRateMonitor, phase: MonitorPhase) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if monitor.phase().await == phase {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            panic!(
                "timed out waiting for phase {}, currently {}",
                phase,
                monitor.phase().await
            );
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
