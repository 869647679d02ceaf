//! Structured diagnostics for the dashboard process.
//!
//! These are operator logs, separate from the on-screen console buffer.
//! Every record is one JSON line on stderr so the terminal view on stdout
//! stays clean.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_LEVEL").as_deref().unwrap_or("info"))
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "fatal" => Level::Fatal,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Simulator, // Sector draws, timer lifecycle
    Console,   // Console buffer evictions
    Audit,     // Report requests and outcomes
    Stress,    // Stress-test sequencing
    System,    // Startup, shutdown, config
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Simulator => "simulator",
            Domain::Console => "console",
            Domain::Audit => "audit",
            Domain::Stress => "stress",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS is a comma-separated list or "all"
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Sequence counter for ordering
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

fn sanitize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    let redacted = Value::String("[REDACTED]".to_string());
    for key in ["api_key", "x-goog-api-key", "authorization", "Authorization"] {
        if fields.contains_key(key) {
            fields.insert(key.to_string(), redacted.clone());
        }
    }
    fields
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    let line = render_record(level, domain, event, fields);
    let mut err = std::io::stderr().lock();
    let _ = writeln!(err, "{}", line);
}

fn render_record(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) -> String {
    let mut data = sanitize_fields(fields);
    let msg = data.remove("msg").unwrap_or(Value::String(String::new()));

    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    entry.insert("data".to_string(), Value::Object(data));
    Value::Object(entry).to_string()
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_tick(revision: u64, min_integrity: f64) {
    log(
        Level::Trace,
        Domain::Simulator,
        "tick",
        obj(&[
            ("revision", json!(revision)),
            ("min_integrity", v_num(min_integrity)),
        ]),
    );
}

pub fn log_rejected(domain: Domain, command: &str) {
    log(
        Level::Debug,
        domain,
        "trigger_rejected",
        obj(&[("command", v_str(command)), ("reason", v_str("busy"))]),
    );
}

pub fn log_audit_failure(model: &str, err: &anyhow::Error) {
    log(
        Level::Error,
        Domain::Audit,
        "request_failed",
        obj(&[
            ("model", v_str(model)),
            ("error", v_str(&format!("{:#}", err))),
        ]),
    );
}

pub fn log_run_failure(err: &tokio::task::JoinError) {
    log(
        Level::Error,
        Domain::System,
        "run_failed",
        obj(&[
            ("panicked", json!(err.is_panic())),
            ("error", v_str(&err.to_string())),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}
