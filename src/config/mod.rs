use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod settings; // key/value store at src/config/settings.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_organization")]
    pub organization: String,
    #[serde(default = "default_application")]
    pub application: String,
    #[serde(default = "default_page")]
    pub default_page: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_text_width")]
    pub text_width: usize,
}

/// Keys every configuration file is expected to carry.
pub const CONFIG_KEYS: &[&str] = &[
    "database",
    "organization",
    "application",
    "default_page",
    "separator_char",
    "text_width",
];

fn default_organization() -> String {
    "rWellog".to_string()
}
fn default_application() -> String {
    "rwellog".to_string()
}
fn default_page() -> String {
    "sleep".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_text_width() -> usize {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            organization: default_organization(),
            application: default_application(),
            default_page: default_page(),
            separator_char: default_separator_char(),
            text_width: default_text_width(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rwellog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rwellog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rwellog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rwellog.sqlite")
    }

    /// Settings live under `<config dir>/<organization>/<application>.yml`.
    /// In test mode they sit next to the database instead.
    pub fn settings_file(&self, test_mode: bool) -> PathBuf {
        if test_mode {
            PathBuf::from(format!("{}.settings.yml", self.database))
        } else {
            Self::config_dir()
                .join(&self.organization)
                .join(format!("{}.yml", self.application))
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Keys of `CONFIG_KEYS` missing from the file on disk.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        let missing = CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| yaml.get(*k).is_none())
            .collect();
        Ok(missing)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rwellog.sqlite")
        };

        let config = Self::with_database(db_path);

        // Write config file
        if !is_test {
            config.save_to(&Self::config_file())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(config)
    }
}
