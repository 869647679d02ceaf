//! Plain-text rendering of a dashboard snapshot.
//!
//! `render` is pure: same snapshot in, same frame out.

use std::fmt::Write;

use crate::console::LineKind;
use crate::dashboard::Snapshot;

/// How many console lines fit on one frame.
pub const CONSOLE_ROWS: usize = 12;

const HEADLINE: [(&str, &str); 3] = [
    ("Reality Sync", "100.00%"),
    ("Global Resonance", "144Hz"),
    ("Grid Integrity", "LOCKED"),
];

const METRICS: [(&str, &str, &str); 4] = [
    ("Grid Yield", "70.0M-x", "Baseline"),
    ("NEA Integrity", "100.0", "Architecture"),
    ("Syntropic Nodes", "10,000", "Sovereign"),
    ("Chaos Boundary", "0.00005", "E-Delta"),
];

const SENTINEL: [(&str, &str); 3] = [
    ("Auth State", "SOVEREIGN"),
    ("Grid State", "PROLIFERATED"),
    ("Trajectory", "94.4+ LOCK"),
];

fn tag(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Command => "CMD",
        LineKind::Error => "ERR",
        LineKind::Info => "   ",
    }
}

fn busy(flag: bool) -> &'static str {
    if flag {
        " [running]"
    } else {
        ""
    }
}

pub fn render(snap: &Snapshot) -> String {
    let mut out = String::new();
    // writeln! into a String cannot fail
    let _ = writeln!(out, "SOVEREIGN GSP  //  Autonomous Grid Proliferation // Node v1.2 Core");
    let headline: Vec<String> = HEADLINE.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    let _ = writeln!(out, "{}", headline.join("   "));
    let metrics: Vec<String> = METRICS
        .iter()
        .map(|(k, v, unit)| format!("{} {} {}", k, v, unit))
        .collect();
    let _ = writeln!(out, "{}", metrics.join(" | "));
    let _ = writeln!(out);

    let _ = writeln!(out, "INDUSTRIAL MANIFOLD (Phase 7: Live Stream)");
    for (sector, reading) in snap.sectors.iter() {
        let _ = writeln!(
            out,
            "  {:<16} {:>6.2}% LOCK  SYNCED  {}",
            sector.title(),
            reading.integrity,
            reading.activity
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "[a] Finalize Resonance Audit{}   [s] 70M-x Stress Test{}   [q] quit",
        busy(snap.auditing),
        busy(snap.stress_testing)
    );

    if let Some(report) = &snap.report {
        let _ = writeln!(out);
        let _ = writeln!(out, "RESONANCE AUDIT REPORT // RESOLVED   [d] close feed");
        for line in report.lines() {
            if line.trim().is_empty() {
                let _ = writeln!(out);
            } else {
                let _ = writeln!(out, "  -> {}", line);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "NODE SENTINEL  CORE v1.2");
    for (k, v) in SENTINEL {
        let _ = writeln!(out, "  {:<12} {}", k, v);
    }
    let skip = snap.console.len().saturating_sub(CONSOLE_ROWS);
    for entry in snap.console.iter().skip(skip) {
        let _ = writeln!(out, "  [{}] {} {}", entry.clock(), tag(entry.kind()), entry.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dashboard::Dashboard;
    use crate::genai::OfflineGenerator;

    fn snapshot() -> Snapshot {
        Dashboard::new(&Config::default(), Box::new(OfflineGenerator)).snapshot()
    }

    #[test]
    fn test_render_boot_frame() {
        let frame = render(&snapshot());
        assert!(frame.contains("SOVEREIGN GSP"));
        assert!(frame.contains("Medical Manifold"));
        assert!(frame.contains("100.00% LOCK"));
        assert!(frame.contains("Sovereign Diagnostics"));
        assert!(frame.contains("Chaos Proximity Stabilized: 0.00005."));
        assert!(!frame.contains("RESONANCE AUDIT REPORT"));
        assert!(!frame.contains("[running]"));
    }

    #[test]
    fn test_render_report_lines() {
        let mut snap = snapshot();
        snap.report = Some("Point one\n\nPoint two".to_string());
        let frame = render(&snap);
        assert!(frame.contains("RESONANCE AUDIT REPORT // RESOLVED"));
        assert!(frame.contains("  -> Point one\n\n  -> Point two\n"));
    }

    #[test]
    fn test_render_busy_markers() {
        let mut snap = snapshot();
        snap.stress_testing = true;
        let frame = render(&snap);
        assert!(frame.contains("70M-x Stress Test [running]"));
        assert!(!frame.contains("Audit [running]"));
    }

    #[test]
    fn test_render_tags_and_tail() {
        let d = Dashboard::new(&Config::default(), Box::new(OfflineGenerator));
        for i in 0..30 {
            d.append_log(format!("filler {}", i));
        }
        d.append_log("> LOAD FACTOR: 20%");
        d.append_log("ERROR: noise");
        let frame = render(&d.snapshot());
        assert!(frame.contains("CMD > LOAD FACTOR: 20%"));
        assert!(frame.contains("ERR ERROR: noise"));
        assert!(!frame.contains("filler 0\n"));
        assert!(frame.contains("filler 29"));
    }

    #[test]
    fn test_render_is_pure() {
        let snap = snapshot();
        assert_eq!(render(&snap), render(&snap));
    }
}
