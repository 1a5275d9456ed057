use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".asset-renamer";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub weapons: WeaponsConfig,

    #[serde(default)]
    pub midi: MidiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format: "summary" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Append a timestamped apply log here when set
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponsConfig {
    /// Directory holding one subdirectory per weapon
    #[serde(default = "default_weapons_root")]
    pub root: PathBuf,
}

impl Default for WeaponsConfig {
    fn default() -> Self {
        Self {
            root: default_weapons_root(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidiConfig {
    /// Directory holding the MIDI tracks
    #[serde(default = "default_midi_root")]
    pub root: PathBuf,
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            root: default_midi_root(),
        }
    }
}

fn default_output() -> String {
    "summary".to_string()
}

fn default_weapons_root() -> PathBuf {
    PathBuf::from("Assets/Images/Weapons")
}

fn default_midi_root() -> PathBuf {
    PathBuf::from("Assets/Sounds/MIDI")
}

impl Config {
    /// Load config from .asset-renamer/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }
}
