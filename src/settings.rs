//! User preferences which apply to every run, read from `settings.toml` in the config directory.
use crate::get_agrisim_config_dir;
use crate::input::{input_err_msg, read_toml};
use crate::log::{DEFAULT_LOG_LEVEL, parse_log_level};
use anyhow::{Context, Result};
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Where results go when neither the command line nor the settings file says otherwise
const DEFAULT_RESULTS_DIR: &str = "agrisim_results";

const DEFAULT_SETTINGS_FILE_HEADER: &str = "# AgriSim settings
#
# Every setting is shown commented out at its default value. Uncomment a line to change it.
";

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    get_agrisim_config_dir().join(SETTINGS_FILE_NAME)
}

/// Program settings from config file
#[derive(Debug, Clone, PartialEq, DocumentedFields, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// How much detail to log: off, error, warn, info, debug or trace
    pub log_level: String,
    /// Whether results already saved in an output folder may be replaced
    pub overwrite: bool,
    /// Folder holding one subfolder of results per scenario file
    pub results_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.into(),
            overwrite: false,
            results_dir: DEFAULT_RESULTS_DIR.into(),
        }
    }
}

impl Settings {
    /// Read the settings file, using the defaults if there isn't one
    pub fn load() -> Result<Self> {
        Self::load_from_path(&get_settings_file_path())
    }

    /// Read settings from `file_path`, using the defaults if the file doesn't exist.
    ///
    /// An error is returned if the file can't be parsed, has unknown keys or names an unknown log
    /// level.
    pub fn load_from_path(file_path: &Path) -> Result<Self> {
        if !file_path.is_file() {
            return Ok(Self::default());
        }

        let settings: Self = read_toml(file_path)?;
        parse_log_level(&settings.log_level).with_context(|| input_err_msg(file_path))?;

        Ok(settings)
    }

    /// A settings file in which every setting is commented out and documented
    pub fn default_file_contents() -> Result<String> {
        let defaults: toml::Table = toml::from_str(&toml::to_string(&Self::default())?)?;

        let mut out = DEFAULT_SETTINGS_FILE_HEADER.to_string();
        for (key, value) in defaults {
            let docs = Self::get_field_docs(&key)
                .ok()
                .with_context(|| format!("No description for setting {key}"))?;
            write!(out, "\n# {}\n# {key} = {value}\n", docs.trim())?;
        }

        Ok(out)
    }
}
