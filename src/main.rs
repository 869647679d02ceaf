use anyhow::Result;
use sovereign_gsp::commands::{next_command, Command};
use sovereign_gsp::config::Config;
use sovereign_gsp::dashboard::Dashboard;
use sovereign_gsp::logging::{log, obj, v_num, v_str, Domain, Level};
use sovereign_gsp::{genai, view};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

fn draw(dashboard: &Dashboard) {
    let frame = view::render(&dashboard.snapshot());
    let mut out = std::io::stdout().lock();
    let _ = write!(out, "\x1b[2J\x1b[H{}", frame);
    let _ = out.flush();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    cfg.validate()?;

    let generator = genai::from_config(&cfg)?;
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("model", v_str(&cfg.model)),
            ("generator", v_str(if cfg.api_key.is_some() { "live" } else { "offline" })),
            ("tick_ms", v_num(cfg.tick_ms as f64)),
        ]),
    );

    let dashboard = Dashboard::new(&cfg, generator);
    let simulator = dashboard.start_simulator();
    let mut changes = dashboard.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    draw(&dashboard);
    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(&dashboard);
            }
            command = next_command(&mut lines) => match command {
                Some(Command::Audit) => {
                    let _ = dashboard.trigger_audit();
                }
                Some(Command::Stress) => {
                    let _ = dashboard.trigger_stress_test();
                }
                Some(Command::Dismiss) => {
                    dashboard.dismiss_report();
                }
                Some(Command::Quit) | None => break,
                Some(Command::Redraw) => draw(&dashboard),
            },
        }
    }

    simulator.stop();
    log(Level::Info, Domain::System, "shutdown", obj(&[]));
    Ok(())
}
