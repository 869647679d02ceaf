//! Sovereign GSP: a simulated operations dashboard.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Simulator   │────►│              │────►│     View     │
//! │  (2s timer)  │     │  Dashboard   │     │ (pure render)│
//! ├──────────────┤     │  (shared     │     └──────────────┘
//! │ Stress test  │────►│   state +    │            ▲
//! ├──────────────┤     │   console)   │            │
//! │ Audit report │────►│              │── revision ┘
//! └──────────────┘     └──────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod genai;
pub mod logging;
pub mod report;
pub mod sectors;
pub mod simulator;
pub mod stress;
pub mod view;
