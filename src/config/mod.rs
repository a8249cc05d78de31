//! Configuration loading and management for the take-home pay engine.
//!
//! This module provides functionality to load country reference data from
//! YAML files: the bracket table, currency code, purchasing-power-parity
//! factor, and exemption policy of each supported country.
//!
//! # Example
//!
//! ```no_run
//! use takehome_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/countries").unwrap();
//! println!("Loaded {} countries", config.countries().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::CountryProfile;
