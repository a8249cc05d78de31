//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading country
//! reference data from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::CountryProfile;

/// Loads and provides access to country reference data.
///
/// The `ConfigLoader` reads one YAML file per country from a directory and
/// provides lookup by country name.
///
/// # Directory Structure
///
/// ```text
/// config/countries/
/// ├── india.yaml
/// └── netherlands.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use takehome_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/countries").unwrap();
/// let india = loader.get_country("India").unwrap();
/// println!("{} brackets", india.brackets.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    countries: HashMap<String, CountryProfile>,
}

impl ConfigLoader {
    /// Loads all country profiles from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/countries")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The directory is missing or contains no YAML files
    /// - Any file contains invalid YAML
    /// - Any profile fails validation (malformed bracket table, bad PPP
    ///   factor, out-of-range exemption fraction)
    /// - Two files declare the same country name
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut countries = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let file = entry.path();
            if file.extension().is_some_and(|ext| ext == "yaml") {
                let profile = Self::load_profile(&file)?;
                if countries.contains_key(&profile.name) {
                    return Err(EngineError::ConfigParseError {
                        path: file.display().to_string(),
                        message: format!("duplicate country '{}'", profile.name),
                    });
                }
                countries.insert(profile.name.clone(), profile);
            }
        }

        if countries.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no country files found)", dir_str),
            });
        }

        Ok(Self { countries })
    }

    /// Loads, parses, and validates a single country file.
    fn load_profile(path: &Path) -> EngineResult<CountryProfile> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let profile: CountryProfile =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        profile
            .validate()
            .map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(profile)
    }

    /// Gets a country profile by name.
    ///
    /// # Arguments
    ///
    /// * `name` - The country name as declared in its configuration file
    ///
    /// # Returns
    ///
    /// Returns the profile if found, or `CountryNotFound` error.
    pub fn get_country(&self, name: &str) -> EngineResult<&CountryProfile> {
        self.countries
            .get(name)
            .ok_or_else(|| EngineError::CountryNotFound {
                name: name.to_string(),
            })
    }

    /// Returns all loaded profiles, sorted by country name.
    pub fn countries(&self) -> Vec<&CountryProfile> {
        let mut profiles: Vec<&CountryProfile> = self.countries.values().collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles
    }
}
