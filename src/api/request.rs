//! Request types for the take-home pay engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{CalculationMode, Period};

/// Request body for the `/calculate` endpoint.
///
/// Carries one user-entered amount and everything needed to interpret it:
/// which country taxes it, whether it is gross or net, and whether it is
/// per annum or per month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The country whose tax regime applies.
    pub country: String,
    /// Whether `amount` is gross (forward calculation) or the net target
    /// (inverse search).
    pub mode: CalculationMode,
    /// The user-entered amount in the country's own currency.
    pub amount: f64,
    /// Whether `amount` is per annum or per month.
    pub period: Period,
    /// Opt into the country's exemption policy, if it has one.
    #[serde(default)]
    pub apply_exemption: bool,
    /// Minimum taxed amount for a bracket to appear in the returned
    /// breakdown; 0 lists every bracket with a non-zero taxable amount.
    /// Affects the breakdown only, never the total.
    #[serde(default)]
    pub materiality_threshold: f64,
    /// Optional comparison against a second country.
    #[serde(default)]
    pub compare: Option<ComparisonRequest>,
}

/// Comparison parameters in a calculation request.
///
/// The exchange rate is supplied by the caller; the engine performs no
/// network fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// The country to express the result in.
    pub country: String,
    /// Units of the target currency per unit of the source currency.
    pub exchange_rate: f64,
}
