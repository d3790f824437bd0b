//! Centralized configuration for the browsing engine.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - BrowseConfig::from_env() reads the same env vars the original tool used.
//! - Invalid or non-positive values fall back to documented defaults with a warn.

use std::fmt;

use log::warn;

use crate::consts::{
    DEFAULT_MAX_KEYS_PER_PREFIX, DEFAULT_MAX_KEYS_TOTAL, ENV_MAX_KEYS_PER_PREFIX,
    ENV_MAX_KEYS_TOTAL,
};

/// Caps for the bounded full-listing scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Max keys inspected per scan before the walk stops.
    /// Env: KVSCOPE_MAX_KEYS_TOTAL (default 5000)
    pub max_keys_total: usize,

    /// Max keys stored per prefix bucket; extra keys are counted as dropped.
    /// Env: KVSCOPE_MAX_KEYS_PER_PREFIX (default 500)
    pub max_keys_per_prefix: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            max_keys_total: DEFAULT_MAX_KEYS_TOTAL,
            max_keys_per_prefix: DEFAULT_MAX_KEYS_PER_PREFIX,
        }
    }
}

impl BrowseConfig {
    /// Load caps from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_keys_total: env_cap(ENV_MAX_KEYS_TOTAL, DEFAULT_MAX_KEYS_TOTAL),
            max_keys_per_prefix: env_cap(ENV_MAX_KEYS_PER_PREFIX, DEFAULT_MAX_KEYS_PER_PREFIX),
        }
    }

    /// Fluent overrides (non-positive values are normalized at use sites).

    pub fn with_max_keys_total(mut self, n: usize) -> Self {
        self.max_keys_total = n;
        self
    }

    pub fn with_max_keys_per_prefix(mut self, n: usize) -> Self {
        self.max_keys_per_prefix = n;
        self
    }

    /// Replace zero caps with the defaults. Called before every scan.
    pub fn normalized(mut self) -> Self {
        if self.max_keys_total == 0 {
            self.max_keys_total = DEFAULT_MAX_KEYS_TOTAL;
        }
        if self.max_keys_per_prefix == 0 {
            self.max_keys_per_prefix = DEFAULT_MAX_KEYS_PER_PREFIX;
        }
        self
    }
}

impl fmt::Display for BrowseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BrowseConfig {{ max_keys_total: {}, max_keys_per_prefix: {} }}",
            self.max_keys_total, self.max_keys_per_prefix
        )
    }
}

/// Прочитать положительный cap из ENV; пусто/мусор/<=0 — дефолт с warn.
fn env_cap(var: &str, default: usize) -> usize {
    let raw = match std::env::var(var) {
        Ok(v) => v,
        Err(_) => return default,
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => n as usize,
        _ => {
            warn!("invalid {} value {:?}, using default {}", var, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = BrowseConfig::default();
        assert_eq!(cfg.max_keys_total, DEFAULT_MAX_KEYS_TOTAL);
        assert_eq!(cfg.max_keys_per_prefix, DEFAULT_MAX_KEYS_PER_PREFIX);
    }

    #[test]
    fn fluent_overrides_and_normalize() {
        let cfg = BrowseConfig::default()
            .with_max_keys_total(10)
            .with_max_keys_per_prefix(0)
            .normalized();
        assert_eq!(cfg.max_keys_total, 10);
        assert_eq!(cfg.max_keys_per_prefix, DEFAULT_MAX_KEYS_PER_PREFIX);
    }

    #[test]
    fn env_roundtrip() {
        // Оба варианта за один тест, чтобы не конфликтовать с параллельными тестами.
        std::env::set_var(ENV_MAX_KEYS_TOTAL, "123");
        std::env::set_var(ENV_MAX_KEYS_PER_PREFIX, "-5");
        let cfg = BrowseConfig::from_env();
        assert_eq!(cfg.max_keys_total, 123);
        assert_eq!(cfg.max_keys_per_prefix, DEFAULT_MAX_KEYS_PER_PREFIX);
        std::env::remove_var(ENV_MAX_KEYS_TOTAL);
        std::env::remove_var(ENV_MAX_KEYS_PER_PREFIX);
    }
}
