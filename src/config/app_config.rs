use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

fn default_source_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_dest_dir() -> PathBuf {
    PathBuf::from("processed")
}

fn default_split_ratio() -> f32 {
    0.8
}

/// Application configuration containing all run parameters
///
/// Every field has a default, so the utility runs without a config file
/// and a partial file only overrides the fields it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory holding one capture folder per session
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Destination root for the train/test layout
    #[serde(default = "default_dest_dir")]
    pub dest_dir: PathBuf,

    /// Fraction of each class assigned to the train split
    #[serde(default = "default_split_ratio")]
    pub split_ratio: f32,

    /// Fixed shuffle seed for reproducible runs; omitted means a fresh
    /// random shuffle every run
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            dest_dir: default_dest_dir(),
            split_ratio: default_split_ratio(),
            shuffle_seed: None,
        }
    }
}

impl AppConfig {
    /// Get the path to the config file (in the working directory)
    pub fn config_path() -> PathBuf {
        PathBuf::from("split-config.json")
    }

    /// Load configuration from disk, or return defaults if the file doesn't
    /// exist or is corrupted
    pub fn load() -> Self {
        let config_path = Self::config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from: {:?}", config_path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(e) => {
                // It's normal for the file not to exist
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read config file: {}. Using defaults.", e);
                } else {
                    info!("No config file found. Using defaults.");
                }
                Self::default()
            }
        }
    }
}
