//! Shared dashboard state and the three user commands.
//!
//! All mutation goes through one mutex that is never held across an await,
//! so each update is applied whole and console appends keep call order.
//! Every mutation bumps a revision published on a `watch` channel; the view
//! redraws when it changes.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::config::Config;
use crate::console::{LogBuffer, LogEntry};
use crate::logging::{self, log, obj, v_num, v_str, Domain, Level};
use crate::report::{self, ReportRequest, TextGenerator};
use crate::sectors::SectorBoard;
use crate::simulator::{self, SimulatorHandle};
use crate::stress;

#[derive(Debug)]
struct DashboardState {
    revision: u64,
    sectors: SectorBoard,
    console: LogBuffer,
    report: Option<String>,
    auditing: bool,
    stress_testing: bool,
}

/// Read-only copy handed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub revision: u64,
    pub sectors: SectorBoard,
    pub console: Vec<LogEntry>,
    pub report: Option<String>,
    pub auditing: bool,
    pub stress_testing: bool,
}

/// Result of a command that may be refused while a run is in flight.
#[derive(Debug)]
pub enum Trigger {
    Started(JoinHandle<()>),
    Busy,
}

impl Trigger {
    pub fn is_started(&self) -> bool {
        matches!(self, Trigger::Started(_))
    }

    /// Wait for the spawned run, if any.
    pub async fn finish(self) {
        if let Trigger::Started(handle) = self {
            if let Err(err) = handle.await {
                logging::log_run_failure(&err);
            }
        }
    }
}

struct Inner {
    state: Mutex<DashboardState>,
    revision: watch::Sender<u64>,
    generator: Box<dyn TextGenerator>,
    model: String,
    tick: Duration,
    stress_step: Duration,
}

#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

impl Dashboard {
    pub fn new(cfg: &Config, generator: Box<dyn TextGenerator>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(DashboardState {
                    revision: 0,
                    sectors: SectorBoard::boot(),
                    console: LogBuffer::with_boot_lines(cfg.log_capacity),
                    report: None,
                    auditing: false,
                    stress_testing: false,
                }),
                revision,
                generator,
                model: cfg.model.clone(),
                tick: cfg.tick(),
                stress_step: cfg.stress_step(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply `f` under the lock and publish a new revision, which is returned
    /// alongside `f`'s output.
    fn mutate<T>(&self, f: impl FnOnce(&mut DashboardState) -> T) -> (T, u64) {
        let (out, rev) = {
            let mut state = self.lock();
            let out = f(&mut state);
            state.revision += 1;
            (out, state.revision)
        };
        self.inner.revision.send_replace(rev);
        (out, rev)
    }

    /// Like `mutate`, but only publishes a revision when `f` reports a change.
    fn try_mutate(&self, f: impl FnOnce(&mut DashboardState) -> bool) -> bool {
        let rev = {
            let mut state = self.lock();
            if !f(&mut state) {
                return false;
            }
            state.revision += 1;
            state.revision
        };
        self.inner.revision.send_replace(rev);
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot {
            revision: state.revision,
            sectors: state.sectors.clone(),
            console: state.console.to_vec(),
            report: state.report.clone(),
            auditing: state.auditing,
            stress_testing: state.stress_testing,
        }
    }

    /// Change notifications; the value is the latest revision.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    fn append(state: &mut DashboardState, text: impl Into<String>) {
        let evicted = state.console.append(text);
        if evicted > 0 {
            log(
                Level::Trace,
                Domain::Console,
                "evicted",
                obj(&[("count", v_num(evicted as f64))]),
            );
        }
    }

    pub(crate) fn append_log(&self, text: impl Into<String>) {
        self.mutate(|s| Self::append(s, text));
    }

    /// Replace every sector reading at once.
    pub(crate) fn apply_readings(&self, board: SectorBoard) -> u64 {
        let min = board.min_integrity();
        let ((), rev) = self.mutate(|s| s.sectors = board);
        logging::log_tick(rev, min);
        rev
    }

    pub fn start_simulator(&self) -> SimulatorHandle {
        simulator::spawn(self.clone(), self.inner.tick)
    }

    // ------------------------------------------------------------------
    // Stress test
    // ------------------------------------------------------------------

    fn begin_stress(&self) -> bool {
        let begun = self.try_mutate(|s| {
            if s.stress_testing {
                return false;
            }
            s.stress_testing = true;
            Self::append(s, stress::START_LINE);
            true
        });
        if begun {
            log(Level::Info, Domain::Stress, "started", obj(&[("steps", v_num(stress::STEPS as f64))]));
        } else {
            logging::log_rejected(Domain::Stress, "stress_test");
        }
        begun
    }

    async fn stress_steps(&self) {
        stress::run_steps(self.inner.stress_step, |line| self.append_log(line)).await;
        self.mutate(|s| {
            Self::append(s, stress::COMPLETE_LINE);
            s.stress_testing = false;
        });
        log(Level::Info, Domain::Stress, "completed", obj(&[]));
    }

    /// Run the stress sequence in place. Returns `false` if one was already running.
    pub async fn run_stress_test(&self) -> bool {
        if !self.begin_stress() {
            return false;
        }
        self.stress_steps().await;
        true
    }

    /// Start the stress sequence on a background task.
    pub fn trigger_stress_test(&self) -> Trigger {
        if !self.begin_stress() {
            return Trigger::Busy;
        }
        let this = self.clone();
        Trigger::Started(tokio::spawn(async move { this.stress_steps().await }))
    }

    // ------------------------------------------------------------------
    // Audit report
    // ------------------------------------------------------------------

    fn begin_audit(&self) -> bool {
        let begun = self.try_mutate(|s| {
            if s.auditing {
                return false;
            }
            s.auditing = true;
            Self::append(s, report::START_LINE);
            true
        });
        if begun {
            log(Level::Info, Domain::Audit, "started", obj(&[("model", v_str(&self.inner.model))]));
        } else {
            logging::log_rejected(Domain::Audit, "audit");
        }
        begun
    }

    async fn audit_request(&self) {
        let req = ReportRequest::resonance_audit(&self.inner.model);
        match self.inner.generator.generate(&req).await {
            Ok(text) => {
                let text = report::report_text(text);
                let len = text.len();
                self.mutate(|s| {
                    s.report = Some(text);
                    Self::append(s, report::SUCCESS_LINE);
                    s.auditing = false;
                });
                log(Level::Info, Domain::Audit, "resolved", obj(&[("chars", v_num(len as f64))]));
            }
            Err(err) => {
                logging::log_audit_failure(&self.inner.model, &err);
                self.mutate(|s| {
                    Self::append(s, report::ERROR_LINE);
                    s.auditing = false;
                });
            }
        }
    }

    /// Run one audit request in place. Returns `false` if one was already in flight.
    pub async fn run_audit(&self) -> bool {
        if !self.begin_audit() {
            return false;
        }
        self.audit_request().await;
        true
    }

    /// Start an audit request on a background task.
    pub fn trigger_audit(&self) -> Trigger {
        if !self.begin_audit() {
            return Trigger::Busy;
        }
        let this = self.clone();
        Trigger::Started(tokio::spawn(async move { this.audit_request().await }))
    }

    /// Clear the stored report. Returns whether there was one.
    pub fn dismiss_report(&self) -> bool {
        self.try_mutate(|s| s.report.take().is_some())
    }
}
