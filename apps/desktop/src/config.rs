use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use client_core::HttpOptions;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: Option<u64>,
    pub player_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: None,
            player_command: None,
        }
    }
}

impl Settings {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

/// Defaults, then the TOML file at `path` if it exists, then environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => parse_settings(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn parse_settings(raw: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(raw)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("VIDEO_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(err) => warn!(value = %v, "ignoring APP__REQUEST_TIMEOUT_SECS: {err}"),
        }
    }

    if let Some(v) = lookup("APP__PLAYER_COMMAND") {
        let v = v.trim();
        settings.player_command = (!v.is_empty()).then(|| v.to_string());
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
