use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use gittime_engine::FetchSettings;
use gittime_logging::gittime_info;
use log::LevelFilter;
use serde::Deserialize;

use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./gittime.ron";

/// Settings read from the RON config file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub user: Option<String>,
    pub trial: bool,
    pub api_base_url: String,
    pub graph_base_url: String,
    pub fallback_base_url: Option<String>,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub state_dir: PathBuf,
    /// Upper bound on pages fetched in one run, including the first.
    pub max_pages: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            user: None,
            trial: false,
            api_base_url: fetch.api_base_url,
            graph_base_url: fetch.graph_base_url,
            fallback_base_url: fetch.fallback_base_url,
            request_timeout_secs: fetch.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            state_dir: PathBuf::from(".gittime"),
            max_pages: 1,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or the default location when `None`.
    ///
    /// A missing file at the default location yields defaults; an explicitly named
    /// file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        match fs::read_to_string(&path) {
            Ok(text) => {
                let config = Self::parse(&text)
                    .with_context(|| format!("invalid config file {}", path.display()))?;
                gittime_info!("loaded config from {:?}", path);
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(err) => {
                Err(err).with_context(|| format!("cannot read config file {}", path.display()))
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn level(&self) -> LevelFilter {
        gittime_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            api_base_url: self.api_base_url.clone(),
            graph_base_url: self.graph_base_url.clone(),
            fallback_base_url: self.fallback_base_url.clone(),
            request_timeout: self.request_timeout(),
            ..FetchSettings::default()
        }
    }
}
