use crate::error::CliError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Defaults read from `$HOME/.xmrlock/config.yml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between lock creation and the refund time.
    pub lock_duration_secs: u64,
    /// Directory the simulated locks are saved to.
    pub store_path: PathBuf,
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self { lock_duration_secs: 3600, store_path: default_store_path(), output_format: OutputFormat::Text }
    }
}

impl Settings {
    /// Load the settings at `path` (or the default path). A missing file gives the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, CliError> {
        let path = path.map(|p| p.as_ref().to_path_buf()).unwrap_or_else(default_config_path);
        match std::fs::File::open(&path) {
            Ok(file) => {
                let reader = std::io::BufReader::new(file);
                Ok(serde_yml::from_reader(reader)?)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}

fn xmrlock_home() -> PathBuf {
    let mut home = std::env::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.push(".xmrlock");
    home
}

pub fn default_config_path() -> PathBuf {
    xmrlock_home().join("config.yml")
}

pub fn default_store_path() -> PathBuf {
    xmrlock_home().join("locks")
}
