use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::registry::{reference_cases, Case, CaseRegistry};

/// File looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "fluoro-cursors.json";

// ---------------------------------------------------------------------------
// AppConfig – the on-disk shape
// ---------------------------------------------------------------------------

/// Start-up configuration. Every field is optional in the file.
///
/// ```json
/// {
///   "data_dir": "data",
///   "cases": [
///     { "id": "Blank", "file": "t-white-blank.txt", "color": "black", "description": "Blank" }
///   ],
///   "default_selection": ["Blank"],
///   "cache_spectra": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base directory for relative case file references.
    pub data_dir: PathBuf,
    pub cases: Vec<Case>,
    /// Cases checked when the dashboard opens.
    pub default_selection: Vec<String>,
    /// Keep parsed spectra in memory between redraws.
    pub cache_spectra: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cases: reference_cases(),
            default_selection: vec!["Blank".to_string()],
            cache_spectra: false,
        }
    }
}

impl AppConfig {
    /// Read and validate a configuration file.
    ///
    /// A relative `data_dir` is taken relative to the file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;

        if config.data_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_dir = parent.join(&config.data_dir);
            }
        }
        config.registry()?;
        Ok(config)
    }

    /// `CONFIG_FILE` from the working directory if present, defaults
    /// otherwise. A broken file is logged and replaced by the defaults.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            log::info!("No {CONFIG_FILE} found, using the built-in case registry");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded {} cases from {CONFIG_FILE}", config.cases.len());
                config
            }
            Err(e) => {
                log::error!("Ignoring {CONFIG_FILE}: {e:#}");
                Self::default()
            }
        }
    }

    pub fn registry(&self) -> Result<CaseRegistry> {
        CaseRegistry::new(self.cases.clone()).context("invalid case registry")
    }

    /// Default selection restricted to known cases, without repeats.
    pub fn initial_selection(&self) -> Vec<String> {
        let mut selection: Vec<String> = Vec::new();
        for id in &self.default_selection {
            if self.cases.iter().any(|c| &c.id == id) && !selection.contains(id) {
                selection.push(id.clone());
            }
        }
        selection
    }
}
