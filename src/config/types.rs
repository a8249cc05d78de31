//! Configuration types for country reference data.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{TaxBracket, validate_bracket_table};

/// Reference data for one country's tax regime.
///
/// Loaded from a single YAML file under the configuration directory. The
/// bracket table must satisfy the contiguity invariants; the open top
/// bracket is written with `max: .inf`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryProfile {
    /// The country name, also the lookup key (e.g., "India").
    pub name: String,
    /// ISO 4217 code of the country's currency (e.g., "INR").
    pub currency_code: String,
    /// The progressive bracket table, ordered by lower bound ascending.
    pub brackets: Vec<TaxBracket>,
    /// Purchasing-power-parity factor relative to the common baseline.
    pub ppp: f64,
    /// The year the PPP factor was published.
    pub ppp_data_year: u16,
    /// Fraction of gross income exempt from taxation when the caller opts
    /// in (e.g., 0.3 for the Dutch expat ruling); 0 when the country has no
    /// such policy.
    #[serde(default)]
    pub exemption_fraction: f64,
}

impl CountryProfile {
    /// Validates the profile's reference data.
    ///
    /// Checks the bracket table invariants, the PPP factor, and the
    /// exemption fraction domain. Called by the loader so that a malformed
    /// profile fails at startup rather than mid-calculation.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.is_empty() {
            return Err(EngineError::InvalidAmount {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.currency_code.is_empty() {
            return Err(EngineError::InvalidAmount {
                field: "currency_code".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        validate_bracket_table(&self.brackets)?;
        if !self.ppp.is_finite() || self.ppp <= 0.0 {
            return Err(EngineError::InvalidAmount {
                field: "ppp".to_string(),
                message: format!("must be a positive finite number, found {}", self.ppp),
            });
        }
        crate::calculation::validate_exemption_fraction(self.exemption_fraction)?;
        Ok(())
    }

    /// Returns true if the country has an exemption policy to opt into.
    pub fn has_exemption(&self) -> bool {
        self.exemption_fraction > 0.0
    }
}
