//! Host configuration. Values can be overridden at build time:
//! `KEZE_API_URL`, `KEZE_OFFLINE=1` and `KEZE_LOG` (an `EnvFilter` directive).

pub const DEFAULT_API_URL: &str = "https://keze.bissols.com/api";
pub const DEFAULT_STORAGE_KEY: &str = "telegram-tap-game";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Backend base URL, no trailing slash. `None` disables remote sync.
    pub api_base_url: Option<String>,
    /// localStorage key holding the serialized snapshot.
    pub storage_key: String,
    pub energy_regen_interval_ms: i32,
    pub boost_sweep_interval_ms: i32,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_base_url: Some(DEFAULT_API_URL.to_string()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            energy_regen_interval_ms: 60_000,
            boost_sweep_interval_ms: 1_000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Defaults with the build-time overrides applied.
    pub fn from_build_env() -> Self {
        Self::with_overrides(
            option_env!("KEZE_API_URL"),
            option_env!("KEZE_OFFLINE"),
            option_env!("KEZE_LOG"),
        )
    }

    fn with_overrides(api_url: Option<&str>, offline: Option<&str>, log: Option<&str>) -> Self {
        let mut cfg = Self::default();
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            cfg.api_base_url = Some(url.trim_end_matches('/').to_string());
        }
        if matches!(offline, Some("1") | Some("true")) {
            cfg.api_base_url = None;
        }
        if let Some(filter) = log.filter(|l| !l.is_empty()) {
            cfg.log_filter = filter.to_string();
        }
        cfg
    }

    pub fn remote_enabled(&self) -> bool {
        self.api_base_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_timers() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.energy_regen_interval_ms, 60_000);
        assert_eq!(cfg.boost_sweep_interval_ms, 1_000);
        assert_eq!(cfg.storage_key, "telegram-tap-game");
        assert!(cfg.remote_enabled());
    }

    #[test]
    fn api_override_strips_trailing_slash() {
        let cfg = GameConfig::with_overrides(Some("http://localhost:3001/api/"), None, None);
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://localhost:3001/api"));
    }

    #[test]
    fn offline_flag_disables_remote_sync() {
        let cfg = GameConfig::with_overrides(Some("http://x"), Some("1"), Some("debug"));
        assert!(!cfg.remote_enabled());
        assert_eq!(cfg.log_filter, "debug");
    }
}
