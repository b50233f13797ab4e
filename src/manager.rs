//! Poll-loop controller
//!
//! Owns the button subsystem lifecycle: acquires the GPIO lines, runs the
//! poll loop on a dedicated thread, dispatches edge events to registered
//! handlers and tears everything down again on stop.
//!
//! ```text
//! GPIO lines ──► LineRequest ──► poll loop (dedicated thread)
//!                                      │            │
//!                   running: AtomicBool┘            ▼
//!                   (cooperative stop)       HandlerRegistry
//!                                            snapshot + invoke
//! ```
//!
//! Exactly two threads touch this type: the application thread (start,
//! stop, registration, status reads) and the poll thread it spawns. The
//! poll thread only ever reads the `running` flag and the registry.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::ButtonsConfig;
use crate::identity::{BCM_PINS, ButtonId};
use crate::lines::{EdgeEvent, LineInterface, LineRequest};
use crate::registry::HandlerRegistry;
use crate::status::ButtonStatus;

/// How often stop() re-checks whether the poll thread has exited
const JOIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lifecycle controller for the button poll loop
pub struct ButtonManager {
    registry: Arc<HandlerRegistry>,
    lines: Option<Arc<dyn LineInterface>>,
    /// Cleared permanently when hardware acquisition fails
    enabled: AtomicBool,
    /// Cleared to request a cooperative shutdown of the poll thread
    running: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
    poll_timeout: Duration,
    stop_grace: Duration,
}

impl ButtonManager {
    /// Creates a manager over the given line interface
    pub fn new(config: &ButtonsConfig, lines: Arc<dyn LineInterface>) -> Self {
        Self {
            registry: Arc::new(HandlerRegistry::new()),
            lines: Some(lines),
            enabled: AtomicBool::new(config.enabled),
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
            poll_timeout: config.poll_timeout(),
            stop_grace: config.stop_grace(),
        }
    }

    /// Creates a permanently disabled manager
    ///
    /// Used when the GPIO driver is absent. Status reports
    /// `enabled = false` and [`start`](Self::start) is a no-op.
    pub fn disabled() -> Self {
        let defaults = ButtonsConfig::default();
        Self {
            registry: Arc::new(HandlerRegistry::new()),
            lines: None,
            enabled: AtomicBool::new(false),
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
            poll_timeout: defaults.poll_timeout(),
            stop_grace: defaults.stop_grace(),
        }
    }

    /// The registry handlers are registered with
    ///
    /// Registrations made before [`start`](Self::start) are visible to the
    /// first dispatch.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Starts listening for button presses
    ///
    /// Acquires the GPIO lines, resolves the line offset table and spawns
    /// the poll thread. Returns false without side effects when the
    /// subsystem is disabled or already running. Any acquisition failure
    /// logs, disables the subsystem for the rest of the process lifetime
    /// and returns false.
    pub fn start(&self) -> bool {
        if !self.enabled.load(Ordering::SeqCst) {
            warn!("button input is disabled, ignoring start");
            return false;
        }
        if self.running.load(Ordering::SeqCst) {
            warn!("button poll loop is already running");
            return false;
        }
        let Some(lines) = &self.lines else {
            return false;
        };

        let request = match lines.request_lines(&BCM_PINS) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "failed to acquire GPIO lines, disabling button input");
                self.enabled.store(false, Ordering::SeqCst);
                return false;
            }
        };
        let offsets = request.offsets();
        debug!(?offsets, "resolved GPIO line offsets");

        self.running.store(true, Ordering::SeqCst);

        let registry = Arc::clone(&self.registry);
        let running = Arc::clone(&self.running);
        let poll_timeout = self.poll_timeout;
        let spawned = thread::Builder::new()
            .name("button-poll".to_string())
            .spawn(move || poll_loop(request, offsets, registry, running, poll_timeout));

        match spawned {
            Ok(handle) => {
                *self.lock_worker() = Some(handle);
                info!("button input started");
                true
            }
            Err(e) => {
                // The request was moved into the closure that never ran,
                // so the lines are already released again
                error!(error = %e, "failed to spawn button poll thread, disabling button input");
                self.running.store(false, Ordering::SeqCst);
                self.enabled.store(false, Ordering::SeqCst);
                false
            }
        }
    }

    /// Stops the poll loop and releases the GPIO lines
    ///
    /// Waits up to the configured grace period for the poll thread to
    /// observe the cleared flag and exit. Idempotent: safe to call twice,
    /// or without any prior [`start`](Self::start). A thread that overruns
    /// the grace period is tolerated; it exits at its next bounded-timeout
    /// read and releases the lines then.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);

        let Some(handle) = self.lock_worker().take() else {
            return;
        };

        let deadline = Instant::now() + self.stop_grace;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(JOIN_POLL_INTERVAL);
        }

        if handle.is_finished() {
            if handle.join().is_err() {
                error!("button poll thread panicked");
            }
            info!("button input stopped");
        } else {
            warn!("button poll thread did not exit within the grace period");
        }
    }

    /// Whether the poll loop is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Whether the subsystem is enabled (hardware present, no fatal failure)
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Read-only snapshot for the monitoring endpoint
    pub fn status(&self) -> ButtonStatus {
        ButtonStatus::snapshot(self.is_enabled(), self.is_running())
    }

    fn lock_worker(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ButtonManager {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the dedicated poll thread
///
/// Runs until a stop is requested or the edge-event read fails. Owns the
/// line request for its whole lifetime; dropping it on exit releases the
/// GPIO lines. Never propagates an error to the application thread: a
/// fatal read failure clears the running flag, leaving the subsystem
/// silently stopped and observable only through the status snapshot.
fn poll_loop(
    mut request: Box<dyn LineRequest>,
    offsets: Vec<u32>,
    registry: Arc<HandlerRegistry>,
    running: Arc<AtomicBool>,
    poll_timeout: Duration,
) {
    while running.load(Ordering::SeqCst) {
        let events = match request.read_edge_events(poll_timeout) {
            Ok(events) => events,
            Err(e) => {
                error!(error = %e, "edge event read failed, stopping button poll loop");
                running.store(false, Ordering::SeqCst);
                break;
            }
        };

        for event in events {
            // Abandon the rest of the batch once a stop is requested
            if !running.load(Ordering::SeqCst) {
                break;
            }
            dispatch_event(&registry, &offsets, event);
        }
    }
    debug!("button poll loop exited");
}

/// One dispatch pass: offset resolution, snapshot, sequential invocation
fn dispatch_event(registry: &HandlerRegistry, offsets: &[u32], event: EdgeEvent) {
    let Some(index) = offsets.iter().position(|&o| o == event.line_offset) else {
        // Spurious or foreign line offsets must not stop the pipeline
        debug!(offset = event.line_offset, "edge event on unwatched line, dropping");
        return;
    };
    let Some(button) = ButtonId::from_index(index) else {
        return;
    };

    info!(button = %button, pin = button.bcm_pin(), "button press detected");

    for handler in registry.snapshot(button) {
        if panic::catch_unwind(AssertUnwindSafe(|| handler(button))).is_err() {
            error!(button = %button, "button handler panicked");
        }
    }
}
