//! Persistent key/value settings.
//!
//! Form values that survive between sessions and the last shown page are
//! kept in a small YAML document, namespaced by organization and
//! application. Saving is synchronous and its failure is an error.

use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    organization: String,
    #[serde(default)]
    application: String,
    #[serde(default)]
    values: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    path: Option<PathBuf>,
    file: SettingsFile,
}

impl Settings {
    /// Open the settings stored at `path`. A missing file is an empty store.
    pub fn load(path: &Path, organization: &str, application: &str) -> AppResult<Self> {
        let mut file = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                SettingsFile::default()
            } else {
                serde_yaml::from_str(&content)?
            }
        } else {
            SettingsFile::default()
        };

        file.organization = organization.to_string();
        file.application = application.to_string();

        Ok(Self {
            path: Some(path.to_path_buf()),
            file,
        })
    }

    /// Settings that are never written anywhere.
    pub fn in_memory(organization: &str, application: &str) -> Self {
        Self {
            path: None,
            file: SettingsFile {
                organization: organization.to_string(),
                application: application.to_string(),
                values: BTreeMap::new(),
            },
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.file.values.contains_key(key)
    }

    /// Stored value of `key`, or `default` when absent or of another type.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.file
            .values
            .get(key)
            .and_then(|v| serde_yaml::from_value(v.clone()).ok())
            .unwrap_or(default)
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> AppResult<()> {
        let v = serde_yaml::to_value(value)?;
        self.file.values.insert(key.to_string(), v);
        Ok(())
    }

    pub fn save(&self) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&self.file)?;
        fs::write(path, yaml).map_err(|e| {
            AppError::Settings(format!("cannot write {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}
