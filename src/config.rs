use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhishScoutConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for PhishScoutConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl PhishScoutConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with_paths(global_config_path(), project_config_path())
    }

    #[cfg(test)]
    fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        Self::load_with_paths(Some(path.to_path_buf()), None)
    }

    fn load_with_paths(global: Option<PathBuf>, project: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(path) = global {
            config.merge_from_path(&path)?;
        }
        if let Some(path) = project {
            config.merge_from_path(&path)?;
        }
        Ok(config)
    }

    fn merge_from_path(&mut self, path: &Path) -> anyhow::Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        let overlay: ConfigOverlay = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file at {}", path.display()))?;
        self.apply_overlay(overlay);
        Ok(())
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(value) = overlay.api_base_url {
            self.api_base_url = value;
        }
        if let Some(value) = overlay.request_timeout_secs {
            self.request_timeout_secs =
                sanitize_positive_u64(value, DEFAULT_REQUEST_TIMEOUT_SECS);
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os("PHISH_SCOUT_CONFIG_PATH") {
        return Some(PathBuf::from(explicit));
    }

    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)?;

    Some(home.join(".config").join("phish-scout").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os("PHISH_SCOUT_PROJECT_CONFIG_PATH") {
        return Some(PathBuf::from(explicit));
    }

    let cwd = env::current_dir().ok()?;
    Some(cwd.join(".phish-scout.toml"))
}

fn sanitize_positive_u64(value: u64, fallback: u64) -> u64 {
    if value == 0 { fallback } else { value }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigOverlay {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        std::env::temp_dir().join(format!("phish-scout-{nanos}-{file_name}"))
    }

    #[test]
    fn missing_config_uses_defaults() {
        let path = unique_temp_path("missing-config.toml");
        let config = PhishScoutConfig::load_from_path(&path).expect("default config");

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn parses_config_values() {
        let path = unique_temp_path("config.toml");
        let raw = r#"
api_base_url = "http://10.0.0.5:9100"
request_timeout_secs = 30
"#;
        fs::write(&path, raw).expect("write config");

        let config = PhishScoutConfig::load_from_path(&path).expect("parsed config");
        let _ = fs::remove_file(path);

        assert_eq!(config.api_base_url, "http://10.0.0.5:9100");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let path = unique_temp_path("zero-timeout.toml");
        fs::write(&path, "request_timeout_secs = 0\n").expect("write config");

        let config = PhishScoutConfig::load_from_path(&path).expect("parsed config");
        let _ = fs::remove_file(path);

        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn project_overrides_global_config() {
        let global_path = unique_temp_path("global-config.toml");
        let project_path = unique_temp_path("project-config.toml");
        fs::write(
            &global_path,
            "api_base_url = \"http://global.internal:8000\"\nrequest_timeout_secs = 20\n",
        )
        .expect("write global config");
        fs::write(&project_path, "api_base_url = \"http://project.internal:8000\"\n")
            .expect("write project config");

        let config =
            PhishScoutConfig::load_with_paths(Some(global_path.clone()), Some(project_path.clone()))
                .expect("merged config");

        let _ = fs::remove_file(global_path);
        let _ = fs::remove_file(project_path);

        assert_eq!(config.api_base_url, "http://project.internal:8000");
        assert_eq!(config.request_timeout_secs, 20);
    }
}
