//! Integration tests for the button manager lifecycle and dispatch
//!
//! The GPIO backend is replaced by a scripted fake so the full
//! start → poll → dispatch → stop path runs on any machine.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use inky_buttons::{
    ButtonError, ButtonHandler, ButtonId, ButtonManager, ButtonsConfig, EdgeEvent, LineInterface,
    LineRequest,
};

type Batch = Result<Vec<EdgeEvent>, ButtonError>;

/// Scripted stand-in for the GPIO backend
///
/// Each batch is returned by one `read_edge_events` call, in order. When
/// the script runs dry the request behaves like an idle line set: it
/// sleeps out the timeout and returns no events.
#[derive(Default)]
struct FakeLines {
    script: Mutex<VecDeque<Batch>>,
    fail_acquire: bool,
    acquisitions: AtomicUsize,
}

impl FakeLines {
    fn scripted(batches: Vec<Batch>) -> Self {
        Self {
            script: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    fn idle() -> Self {
        Self::scripted(Vec::new())
    }

    fn failing() -> Self {
        Self {
            fail_acquire: true,
            ..Self::default()
        }
    }

    fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl LineInterface for FakeLines {
    fn request_lines(&self, pins: &[u8]) -> Result<Box<dyn LineRequest>, ButtonError> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        if self.fail_acquire {
            return Err(ButtonError::HardwareUnavailable {
                reason: "gpiochip not found".to_string(),
            });
        }
        Ok(Box::new(FakeRequest {
            offsets: pins.iter().map(|&p| u32::from(p)).collect(),
            script: std::mem::take(&mut *self.script.lock().unwrap()),
        }))
    }
}

struct FakeRequest {
    offsets: Vec<u32>,
    script: VecDeque<Batch>,
}

impl LineRequest for FakeRequest {
    fn offsets(&self) -> Vec<u32> {
        self.offsets.clone()
    }

    fn read_edge_events(&mut self, timeout: Duration) -> Result<Vec<EdgeEvent>, ButtonError> {
        match self.script.pop_front() {
            Some(batch) => batch,
            None => {
                thread::sleep(timeout);
                Ok(Vec::new())
            }
        }
    }
}

fn test_config() -> ButtonsConfig {
    ButtonsConfig {
        enabled: true,
        poll_timeout_ms: 5,
        stop_grace_ms: 500,
    }
}

fn manager_with(lines: &Arc<FakeLines>) -> ButtonManager {
    ButtonManager::new(&test_config(), Arc::clone(lines) as Arc<dyn LineInterface>)
}

fn press(pin: u8) -> EdgeEvent {
    EdgeEvent {
        line_offset: u32::from(pin),
    }
}

/// Handler that appends `tag:label` to the shared log when invoked
fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> ButtonHandler {
    let log = Arc::clone(log);
    let tag = tag.to_string();
    Arc::new(move |button: ButtonId| {
        log.lock().unwrap().push(format!("{}:{}", tag, button));
    })
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_start_reports_running_and_stop_is_idempotent() {
    let lines = Arc::new(FakeLines::idle());
    let manager = manager_with(&lines);

    assert!(manager.start());
    let status = manager.status();
    assert!(status.enabled);
    assert!(status.running);
    assert_eq!(status.buttons, vec!["A", "B", "C", "D"]);

    manager.stop();
    assert!(!manager.status().running);
    assert!(manager.status().enabled);

    // Calling stop again must be harmless
    manager.stop();
    assert!(!manager.status().running);
}

#[test]
fn test_stop_without_start_is_a_no_op() {
    let lines = Arc::new(FakeLines::idle());
    let manager = manager_with(&lines);

    manager.stop();
    assert!(!manager.status().running);
    assert_eq!(lines.acquisitions(), 0);
}

#[test]
fn test_double_start_returns_false() {
    let lines = Arc::new(FakeLines::idle());
    let manager = manager_with(&lines);

    assert!(manager.start());
    assert!(!manager.start());
    assert_eq!(lines.acquisitions(), 1);

    manager.stop();
}

#[test]
fn test_two_events_invoke_both_handlers_twice_in_order() {
    let lines = Arc::new(FakeLines::scripted(vec![
        Ok(vec![press(5)]),
        Ok(vec![press(5)]),
    ]));
    let manager = manager_with(&lines);

    let log = Arc::new(Mutex::new(Vec::new()));
    manager.registry().register("A", recorder(&log, "f")).unwrap();
    manager.registry().register("A", recorder(&log, "g")).unwrap();

    assert!(manager.start());
    assert!(wait_until(|| log.lock().unwrap().len() == 4));
    manager.stop();

    assert_eq!(*log.lock().unwrap(), vec!["f:A", "g:A", "f:A", "g:A"]);
}

#[test]
fn test_unknown_offset_is_dropped_and_loop_continues() {
    // Offset 99 maps to no button; the valid press in the same batch and
    // the one in the next batch must both still dispatch
    let lines = Arc::new(FakeLines::scripted(vec![
        Ok(vec![press(99), press(6)]),
        Ok(vec![press(6)]),
    ]));
    let manager = manager_with(&lines);

    let log = Arc::new(Mutex::new(Vec::new()));
    manager.registry().register("B", recorder(&log, "h")).unwrap();

    assert!(manager.start());
    assert!(wait_until(|| log.lock().unwrap().len() == 2));
    assert!(manager.status().running);
    manager.stop();

    assert_eq!(*log.lock().unwrap(), vec!["h:B", "h:B"]);
}

#[test]
fn test_panicking_handler_does_not_block_siblings_or_later_events() {
    let lines = Arc::new(FakeLines::scripted(vec![
        Ok(vec![press(16)]),
        Ok(vec![press(16)]),
    ]));
    let manager = manager_with(&lines);

    let log = Arc::new(Mutex::new(Vec::new()));
    let panicker: ButtonHandler = Arc::new(|_| panic!("handler blew up"));
    manager.registry().register("C", panicker).unwrap();
    manager.registry().register("C", recorder(&log, "after")).unwrap();

    assert!(manager.start());
    assert!(wait_until(|| log.lock().unwrap().len() == 2));
    assert!(manager.status().running);
    manager.stop();

    assert_eq!(*log.lock().unwrap(), vec!["after:C", "after:C"]);
}

#[test]
fn test_acquisition_failure_disables_permanently() {
    let lines = Arc::new(FakeLines::failing());
    let manager = manager_with(&lines);

    assert!(!manager.start());
    let status = manager.status();
    assert!(!status.enabled);
    assert!(!status.running);

    // A second start must not retry hardware acquisition
    assert!(!manager.start());
    assert_eq!(lines.acquisitions(), 1);
}

#[test]
fn test_read_error_stops_loop_silently() {
    let lines = Arc::new(FakeLines::scripted(vec![
        Ok(vec![press(24)]),
        Err(ButtonError::HardwareUnavailable {
            reason: "line handle revoked".to_string(),
        }),
    ]));
    let manager = manager_with(&lines);

    let log = Arc::new(Mutex::new(Vec::new()));
    manager.registry().register("D", recorder(&log, "d")).unwrap();

    assert!(manager.start());
    assert!(wait_until(|| !manager.status().running));
    assert_eq!(*log.lock().unwrap(), vec!["d:D"]);

    // The loop died on its own; stop() afterwards must still be safe
    manager.stop();
    assert!(!manager.status().running);
}

#[test]
fn test_config_disabled_never_touches_hardware() {
    let lines = Arc::new(FakeLines::idle());
    let config = ButtonsConfig {
        enabled: false,
        ..test_config()
    };
    let manager = ButtonManager::new(&config, Arc::clone(&lines) as Arc<dyn LineInterface>);

    assert!(!manager.start());
    assert!(!manager.status().enabled);
    assert_eq!(lines.acquisitions(), 0);
}

#[test]
fn test_disabled_manager_reports_disabled_status() {
    let manager = ButtonManager::disabled();

    assert!(!manager.start());
    let status = manager.status();
    assert!(!status.enabled);
    assert!(!status.running);
    assert_eq!(status.buttons, vec!["A", "B", "C", "D"]);

    manager.stop();
}

#[test]
fn test_registrations_before_start_reach_first_dispatch() {
    let lines = Arc::new(FakeLines::scripted(vec![Ok(vec![press(5)])]));
    let manager = manager_with(&lines);

    let log = Arc::new(Mutex::new(Vec::new()));
    manager.registry().register("A", recorder(&log, "wired")).unwrap();

    assert!(manager.start());
    assert!(wait_until(|| !log.lock().unwrap().is_empty()));
    manager.stop();

    assert_eq!(*log.lock().unwrap(), vec!["wired:A"]);
}
