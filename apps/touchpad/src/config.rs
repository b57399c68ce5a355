use std::{collections::HashMap, fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "touchpad.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Control size; zero until the surface reports a layout.
    pub width: f32,
    pub height: f32,
    pub queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "192.168.1.202".into(),
            port: 1234,
            width: 0.0,
            height: 0.0,
            queue_capacity: client_core::DEFAULT_QUEUE_CAPACITY,
        }
    }
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = parse_settings_file(&raw)
                .with_context(|| format!("invalid settings file '{}'", path.display()))?;
            apply_overrides(&mut settings, |key| file_cfg.get(key).cloned())
                .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    }

    apply_overrides(&mut settings, |key| {
        env(&format!("APP__{}", key.to_ascii_uppercase()))
            .or_else(|| env(&format!("HEXAPOD_{}", key.to_ascii_uppercase())))
    })?;
    Ok(settings)
}

/// Flattens the file into strings so file and env values share one parser.
fn parse_settings_file(raw: &str) -> anyhow::Result<HashMap<String, String>> {
    toml::from_str::<HashMap<String, toml::Value>>(raw)?
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(v) => v,
                toml::Value::Integer(v) => v.to_string(),
                toml::Value::Float(v) => v.to_string(),
                other => anyhow::bail!("{key} has unsupported type {}", other.type_str()),
            };
            Ok((key, value))
        })
        .collect()
}

fn apply_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("host") {
        settings.host = v;
    }
    if let Some(v) = lookup("port") {
        settings.port = v.parse().with_context(|| format!("port is not valid: {v}"))?;
    }
    if let Some(v) = lookup("width") {
        settings.width = v.parse().with_context(|| format!("width is not valid: {v}"))?;
    }
    if let Some(v) = lookup("height") {
        settings.height = v
            .parse()
            .with_context(|| format!("height is not valid: {v}"))?;
    }
    if let Some(v) = lookup("queue_capacity") {
        settings.queue_capacity = v
            .parse()
            .with_context(|| format!("queue_capacity is not valid: {v}"))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
