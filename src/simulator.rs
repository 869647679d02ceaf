//! Periodic sector redraw, owned by the view through `SimulatorHandle`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::dashboard::Dashboard;
use crate::logging::{log, obj, v_num, Domain, Level};
use crate::sectors::SectorBoard;

/// Owned timer; stopping or dropping it cancels the redraw task.
#[derive(Debug)]
pub struct SimulatorHandle {
    task: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log(Level::Info, Domain::Simulator, "stopped", obj(&[]));
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// First redraw happens one full period after start.
pub fn spawn(dashboard: Dashboard, period: Duration) -> SimulatorHandle {
    log(
        Level::Info,
        Domain::Simulator,
        "started",
        obj(&[("period_ms", v_num(period.as_millis() as f64))]),
    );
    let task = tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            dashboard.apply_readings(SectorBoard::draw(&mut rng));
        }
    });
    SimulatorHandle { task: Some(task) }
}
