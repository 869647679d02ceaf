//! Stress-test sequence: a fixed run of timed load-factor steps.

use tokio::time::{sleep, Duration};

pub const STEPS: u32 = 5;

pub const START_LINE: &str = "> INITIATING 70M-X GRID YIELD STRESS TEST SEQUENCE...";
pub const COMPLETE_LINE: &str = "> STRESS TEST COMPLETE. 70.0M-X GRID YIELD SUSTAINED WITHOUT DRIFT.";

/// Percentage reported at `step` (1-based).
pub fn load_factor(step: u32) -> u32 {
    step * 100 / STEPS
}

pub fn step_line(step: u32) -> String {
    format!("> LOAD FACTOR: {}% - SYNTROPIC RECURSION NOMINAL.", load_factor(step))
}

/// Run every step strictly in sequence, waiting `step_delay` before each.
pub async fn run_steps<F>(step_delay: Duration, mut emit: F)
where
    F: FnMut(String),
{
    for step in 1..=STEPS {
        sleep(step_delay).await;
        emit(step_line(step));
    }
}
