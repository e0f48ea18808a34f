use std::{fs, path::Path};

use anyhow::Context;
use hdp_shared::protocol::{SUBMIT_BATCH_QUERY_PATH, UPLOAD_PROGRAM_PATH};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "hdp.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub registry_url: String,
    pub batch_query_url: String,
    pub max_input_entries: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_url: "http://program-registery.api.herodotus.cloud".into(),
            batch_query_url: "https://hdp.api.herodotus.cloud".into(),
            max_input_entries: None,
        }
    }
}

/// Fully resolved service endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub upload_program: Url,
    pub submit_batch_query: Url,
}

impl Endpoints {
    pub fn from_bases(registry_url: &str, batch_query_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            upload_program: endpoint_url(registry_url, UPLOAD_PROGRAM_PATH)?,
            submit_batch_query: endpoint_url(batch_query_url, SUBMIT_BATCH_QUERY_PATH)?,
        })
    }
}

impl Settings {
    pub fn endpoints(&self) -> anyhow::Result<Endpoints> {
        Endpoints::from_bases(&self.registry_url, &self.batch_query_url)
    }
}

/// Defaults, then `hdp.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match raw.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            tracing::warn!("ignoring unreadable settings file: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.get("registry_url").and_then(toml::Value::as_str) {
        settings.registry_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("batch_query_url").and_then(toml::Value::as_str) {
        settings.batch_query_url = v.to_string();
    }
    match file_cfg.get("max_input_entries") {
        Some(toml::Value::Integer(n)) => match usize::try_from(*n) {
            Ok(parsed) => settings.max_input_entries = Some(parsed),
            Err(_) => tracing::warn!(value = *n, "ignoring negative max_input_entries"),
        },
        Some(toml::Value::String(v)) => {
            if let Ok(parsed) = v.parse::<usize>() {
                settings.max_input_entries = Some(parsed);
            }
        }
        Some(other) => tracing::warn!(kind = other.type_str(), "ignoring max_input_entries"),
        None => {}
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("HDP_REGISTRY_URL") {
        settings.registry_url = v;
    }
    if let Some(v) = var("APP__REGISTRY_URL") {
        settings.registry_url = v;
    }

    if let Some(v) = var("HDP_BATCH_QUERY_URL") {
        settings.batch_query_url = v;
    }
    if let Some(v) = var("APP__BATCH_QUERY_URL") {
        settings.batch_query_url = v;
    }

    if let Some(v) = var("APP__MAX_INPUT_ENTRIES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_input_entries = Some(parsed);
        }
    }
}

fn endpoint_url(base: &str, path: &str) -> anyhow::Result<Url> {
    let base = base.trim();
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };

    Url::parse(&base)
        .and_then(|url| url.join(path))
        .with_context(|| format!("invalid service base url '{base}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
