use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use client_core::DEFAULT_CHUNK_SIZE;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "uploader.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub chunk_size: usize,
    pub max_file_size: u64,
    pub create_short_id: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/".into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_file_size: 128 * 1024 * 1024,
            create_short_id: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    chunk_size: Option<usize>,
    max_file_size: Option<u64>,
    create_short_id: Option<bool>,
}

impl Settings {
    pub fn server_url(&self) -> Result<Url> {
        Url::parse(&self.server_url)
            .with_context(|| format!("invalid server url '{}'", self.server_url))
    }
}

/// Defaults, then the TOML file, then environment variables. An explicitly
/// named file must exist; the default one is optional.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if required || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.chunk_size {
        settings.chunk_size = v;
    }
    if let Some(v) = file_cfg.max_file_size {
        settings.max_file_size = v;
    }
    if let Some(v) = file_cfg.create_short_id {
        settings.create_short_id = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(v) = lookup("UPLOADER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = parse_env(&lookup, "APP__CHUNK_SIZE")? {
        settings.chunk_size = v;
    }
    if let Some(v) = parse_env(&lookup, "APP__MAX_FILE_SIZE")? {
        settings.max_file_size = v;
    }
    if let Some(v) = parse_env(&lookup, "APP__CREATE_SHORT_ID")? {
        settings.create_short_id = v;
    }
    Ok(())
}

fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value '{raw}' for {key}"))
        })
        .transpose()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
