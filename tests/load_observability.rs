use std::sync::{Arc, Mutex};

use source_tasks::loader::{
    load_from_path, CompositeObserver, LoadContext, LoadObserver, LoadOptions, LoadSeverity,
    LoadStats, SourceFormat,
};
use source_tasks::LoadError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: Arc<RecordingObserver>, threshold: LoadSeverity) -> LoadOptions {
    LoadOptions {
        observer: Some(obs),
        alert_at_or_above: threshold,
        ..Default::default()
    }
}

#[test]
fn observer_receives_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    load_from_path("tests/fixtures/staff.csv", &options(obs.clone(), LoadSeverity::Critical))
        .unwrap();
    load_from_path("tests/fixtures/notes.txt", &options(obs.clone(), LoadSeverity::Critical))
        .unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![
            LoadStats {
                rows: 3,
                columns: 3,
                chars: 0
            },
            LoadStats {
                rows: 0,
                columns: 0,
                chars: 34
            },
        ]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_from_path(
        "tests/fixtures/does_not_exist.csv",
        &options(obs.clone(), LoadSeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_decode_error() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_from_path(
        "tests/fixtures/broken.pdf",
        &options(obs.clone(), LoadSeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn alert_threshold_can_be_lowered() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_from_path(
        "tests/fixtures/unknown.dat",
        &options(obs.clone(), LoadSeverity::Error),
    )
    .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn LoadObserver>> = vec![a.clone(), b.clone()];
    let composite = CompositeObserver::new(observers);
    let opts = LoadOptions {
        format: Some(SourceFormat::Json),
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let _ = load_from_path("tests/fixtures/staff.csv", &opts).unwrap_err();

    assert_eq!(a.failures.lock().unwrap().len(), 1);
    assert_eq!(b.failures.lock().unwrap().len(), 1);
}
