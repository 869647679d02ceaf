use anyhow::{bail, Context, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_GENAI_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Clone, Debug)]
pub struct Config {
    pub tick_ms: u64,
    pub stress_step_ms: u64,
    pub log_capacity: usize,
    pub api_key: Option<String>,
    pub genai_base: String,
    pub model: String,
    pub report_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 2000,
            stress_step_ms: 500,
            log_capacity: 101,
            api_key: None,
            genai_base: DEFAULT_GENAI_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            report_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let d = Self::default();
        Self {
            tick_ms: var("SIM_TICK_MS").and_then(|v| v.parse().ok()).unwrap_or(d.tick_ms),
            stress_step_ms: var("STRESS_STEP_MS").and_then(|v| v.parse().ok()).unwrap_or(d.stress_step_ms),
            log_capacity: var("LOG_CAPACITY").and_then(|v| v.parse().ok()).unwrap_or(d.log_capacity),
            api_key: var("API_KEY").or_else(|| var("GEMINI_API_KEY")),
            genai_base: var("GENAI_BASE").unwrap_or(d.genai_base),
            model: var("GENAI_MODEL").unwrap_or(d.model),
            report_timeout_secs: var("REPORT_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(d.report_timeout_secs),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("SIM_TICK_MS must be greater than zero");
        }
        if self.log_capacity == 0 {
            bail!("LOG_CAPACITY must be greater than zero");
        }
        if self.model.trim().is_empty() {
            bail!("GENAI_MODEL must not be empty");
        }
        Url::parse(&self.genai_base)
            .with_context(|| format!("GENAI_BASE is not a valid URL: {}", self.genai_base))?;
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn stress_step(&self) -> Duration {
        Duration::from_millis(self.stress_step_ms)
    }

    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("SIM_TICK_MS", "250"),
            ("STRESS_STEP_MS", "10"),
            ("LOG_CAPACITY", "20"),
            ("API_KEY", "k-1"),
            ("GENAI_BASE", "https://proxy.example/gemini"),
            ("GENAI_MODEL", "other-model"),
            ("REPORT_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(cfg.tick_ms, 250);
        assert_eq!(cfg.stress_step_ms, 10);
        assert_eq!(cfg.log_capacity, 20);
        assert_eq!(cfg.api_key.as_deref(), Some("k-1"));
        assert_eq!(cfg.genai_base, "https://proxy.example/gemini");
        assert_eq!(cfg.model, "other-model");
        assert_eq!(cfg.report_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_lookup_uses_defaults() {
        let cfg = Config::from_lookup(lookup(&[("SIM_TICK_MS", "not-a-number")]));
        assert_eq!(cfg.tick_ms, 2000);
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.genai_base, DEFAULT_GENAI_BASE);
        assert_eq!(cfg.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_blank_api_key_falls_through_to_gemini_key() {
        let cfg = Config::from_lookup(lookup(&[("API_KEY", "  "), ("GEMINI_API_KEY", "g-2")]));
        assert_eq!(cfg.api_key.as_deref(), Some("g-2"));

        let cfg = Config::from_lookup(lookup(&[("API_KEY", "a-1"), ("GEMINI_API_KEY", "g-2")]));
        assert_eq!(cfg.api_key.as_deref(), Some("a-1"));

        let cfg = Config::from_lookup(lookup(&[("API_KEY", ""), ("GEMINI_API_KEY", "")]));
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_defaults_validate() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tick(), Duration::from_millis(2000));
        assert_eq!(cfg.stress_step(), Duration::from_millis(500));
        assert_eq!(cfg.log_capacity, 101);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let cfg = Config { tick_ms: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let cfg = Config { log_capacity: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let cfg = Config { genai_base: "not a url".to_string(), ..Default::default() };
        let err = cfg.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("GENAI_BASE"));
    }
}
