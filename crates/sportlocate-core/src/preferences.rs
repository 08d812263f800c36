//! User preferences: the current city and the venue categories hidden from the map.
//!
//! Only unchecked categories are stored, so a category added to the catalog
//! later shows up enabled. Every mutation is written straight to disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PreferencesError;

/// City used when nothing (or nothing usable) is stored.
pub const DEFAULT_CITY: &str = "Tampere";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    overrides: BTreeMap<String, bool>,
    #[serde(default)]
    city: String,
}

/// JSON-backed preference store.
#[derive(Debug)]
pub struct Preferences {
    path: PathBuf,
    overrides: BTreeMap<String, bool>,
    city: String,
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A missing file is created with defaults; a corrupt file is reset to
    /// defaults and rewritten.
    ///
    /// # Errors
    /// Only I/O failures other than "not found" are reported.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let mut prefs = Self {
            path: path.into(),
            overrides: BTreeMap::new(),
            city: DEFAULT_CITY.to_string(),
        };

        match std::fs::read_to_string(&prefs.path) {
            Ok(contents) => match serde_json::from_str::<PreferencesFile>(&contents) {
                Ok(file) => {
                    prefs.overrides = file.overrides;
                    if !file.city.trim().is_empty() {
                        prefs.city = file.city;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Error decoding {}, resetting preferences: {}",
                        prefs.path.display(),
                        e
                    );
                    prefs.write_to_disk()?;
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "{} not found, creating it with default settings",
                    prefs.path.display()
                );
                prefs.write_to_disk()?;
            }
            Err(e) => return Err(PreferencesError::Read(e.to_string())),
        }

        Ok(prefs)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_city(&self) -> &str {
        &self.city
    }

    /// Store a new current city. An empty name falls back to [`DEFAULT_CITY`].
    pub fn set_city(&mut self, city: &str) -> Result<(), PreferencesError> {
        self.city = city.trim().to_string();
        self.write_to_disk()
    }

    /// Whether the category with this name should be shown.
    pub fn is_enabled(&self, category_name: &str) -> bool {
        !self.overrides.contains_key(category_name)
    }

    pub fn set_category_enabled(
        &mut self,
        category_name: &str,
        enabled: bool,
    ) -> Result<(), PreferencesError> {
        if enabled {
            self.overrides.remove(category_name);
        } else {
            self.overrides.insert(category_name.to_string(), false);
        }
        self.write_to_disk()
    }

    /// Names of the categories currently hidden.
    pub fn hidden_categories(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    /// Entries of `all` that are not hidden, in their original order.
    pub fn accepted<'a, T>(&self, all: &'a [T], name_of: impl Fn(&T) -> &str) -> Vec<&'a T> {
        all.iter().filter(|item| self.is_enabled(name_of(item))).collect()
    }

    /// `(name, enabled)` for each of `names`, for a preferences view.
    pub fn category_states<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(String, bool)> {
        names
            .into_iter()
            .map(|name| (name.to_string(), self.is_enabled(name)))
            .collect()
    }

    fn write_to_disk(&mut self) -> Result<(), PreferencesError> {
        if self.city.is_empty() {
            self.city = DEFAULT_CITY.to_string();
        }

        let file = PreferencesFile {
            overrides: self.overrides.clone(),
            city: self.city.clone(),
        };
        let json =
            serde_json::to_string(&file).map_err(|e| PreferencesError::Write(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| PreferencesError::Write(e.to_string()))?;
            }
        }

        std::fs::write(&self.path, json).map_err(|e| PreferencesError::Write(e.to_string()))
    }
}
