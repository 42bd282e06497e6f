//! Optional `book_finder.ron` configuration in the working directory.
//!
//! Every field may be omitted; missing fields take the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use finder_core::{
    CatalogLinks, CoverSize, SearchSettings, Suggestion, DEFAULT_COVERS_BASE, DEFAULT_WEB_BASE,
};
use finder_engine::FetchSettings;
use finder_logging::finder_warn;
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "book_finder.ron";
const LOG_FILENAME: &str = "book_finder.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CoverSizeSetting {
    Small,
    Medium,
    #[default]
    Large,
}

impl From<CoverSizeSetting> for CoverSize {
    fn from(value: CoverSizeSetting) -> Self {
        match value {
            CoverSizeSetting::Small => CoverSize::Small,
            CoverSizeSetting::Medium => CoverSize::Medium,
            CoverSizeSetting::Large => CoverSize::Large,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestionSetting {
    pub label: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search_endpoint: String,
    pub web_base: String,
    pub covers_base: String,
    pub cover_size: CoverSizeSetting,
    pub result_limit: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub redirect_limit: usize,
    pub suggestions: Option<Vec<SuggestionSetting>>,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let search = SearchSettings::default();
        Self {
            search_endpoint: fetch.search_endpoint,
            web_base: DEFAULT_WEB_BASE.to_string(),
            covers_base: DEFAULT_COVERS_BASE.to_string(),
            cover_size: CoverSizeSetting::default(),
            result_limit: search.result_limit,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            redirect_limit: fetch.redirect_limit,
            suggestions: None,
            log_file: PathBuf::from(LOG_FILENAME),
            verbose: false,
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            search_endpoint: self.search_endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    /// Invalid link bases fall back to the defaults with a warning.
    pub fn search_settings(&self) -> SearchSettings {
        let defaults = SearchSettings::default();
        let links = CatalogLinks::new(&self.web_base, &self.covers_base, self.cover_size.into())
            .unwrap_or_else(|err| {
                finder_warn!(
                    "Invalid catalog link bases {:?} / {:?}: {}",
                    self.web_base,
                    self.covers_base,
                    err
                );
                defaults.links.clone()
            });
        let suggestions = match &self.suggestions {
            Some(list) => list
                .iter()
                .map(|s| Suggestion::new(s.label.clone(), s.query.clone()))
                .collect(),
            None => defaults.suggestions,
        };

        SearchSettings {
            result_limit: self.result_limit.max(1),
            suggestions,
            links,
        }
    }
}

/// Reads `book_finder.ron` from `dir`. A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path,
        message: err.to_string(),
    })
}
