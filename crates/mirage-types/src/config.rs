//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable session parameters.
///
/// The defaults match the seeded VFS (home directory `/home/user`); a UI
/// host may override them from an embedded TOML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Login name reported by `whoami`, `id`, prompts.
    pub user: String,
    /// Host name reported by `hostname`, `uname`.
    pub hostname: String,
    /// Absolute path `cd` and `~` resolve to.
    pub home_dir: String,
    /// Lower bound of the simulated processing delay, in milliseconds.
    pub latency_min_ms: u64,
    /// Upper bound of the simulated processing delay, in milliseconds.
    pub latency_max_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            hostname: "webserver".to_string(),
            home_dir: "/home/user".to_string(),
            latency_min_ms: 200,
            latency_max_ms: 700,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from a TOML document. Missing keys keep
    /// their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_seed_tree() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.home_dir, "/home/user");
        assert_eq!(cfg.user, "user");
        assert!(cfg.latency_min_ms <= cfg.latency_max_ms);
    }

    #[test]
    fn parse_partial_toml() {
        let cfg = SessionConfig::from_toml_str("user = \"alice\"\nlatency_min_ms = 0").unwrap();
        assert_eq!(cfg.user, "alice");
        assert_eq!(cfg.latency_min_ms, 0);
        // Unspecified keys fall back to defaults.
        assert_eq!(cfg.hostname, "webserver");
    }

    #[test]
    fn parse_invalid_toml_is_config_error() {
        let err = SessionConfig::from_toml_str("user = [[[").unwrap_err();
        assert!(format!("{err}").contains("config error"));
    }

    #[test]
    fn toml_round_trip() {
        let cfg = SessionConfig::default();
        let text = toml::to_string(&cfg).unwrap();
        let back = SessionConfig::from_toml_str(&text).unwrap();
        assert_eq!(cfg, back);
    }
}
