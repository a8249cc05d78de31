//! Response types for the take-home pay engine API.
//!
//! This module defines the success and error response structures for the
//! HTTP API, along with the display rounding applied to outgoing figures.
//! Rounding happens only here, after all calculation is done.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{BracketContribution, IncomeBreakdown};

/// Rounds a figure to two decimal places for display.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Response body for a successful `/calculate` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The country whose tax regime was applied.
    pub country: String,
    /// That country's currency code.
    pub currency_code: String,
    /// Gross income per annum.
    pub gross_pa: f64,
    /// Gross income per month.
    pub gross_pm: f64,
    /// Net income per annum.
    pub net_pa: f64,
    /// Net income per month.
    pub net_pm: f64,
    /// Total tax per annum.
    pub total_tax_pa: f64,
    /// Total tax per month.
    pub total_tax_pm: f64,
    /// Per-bracket breakdown, possibly filtered by the requested
    /// materiality threshold.
    pub brackets: Vec<BracketLine>,
    /// Present when the request asked for a comparison.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonResponse>,
}

/// One bracket's slice of the calculation, as displayed to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketLine {
    /// Lower bound of the bracket (inclusive).
    pub min: f64,
    /// Upper bound of the bracket; `null` for the open top bracket.
    pub max: Option<f64>,
    /// Marginal rate of the bracket as a percentage.
    pub rate: f64,
    /// The portion of taxable gross that fell inside this bracket.
    pub taxable_amount: f64,
    /// Tax charged on that portion.
    pub taxed_amount: f64,
}

impl From<&BracketContribution> for BracketLine {
    fn from(contribution: &BracketContribution) -> Self {
        Self {
            min: contribution.bracket.min,
            max: if contribution.bracket.is_open_ended() {
                None
            } else {
                Some(contribution.bracket.max)
            },
            rate: contribution.bracket.rate,
            taxable_amount: round_currency(contribution.taxable_amount),
            taxed_amount: round_currency(contribution.taxed_amount),
        }
    }
}

/// Comparison block in a calculation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    /// The country the figures are expressed in.
    pub country: String,
    /// That country's currency code.
    pub currency_code: String,
    /// The exchange rate the caller supplied.
    pub exchange_rate: f64,
    /// Annual figure converted at the exchange rate.
    pub exchanged_pa: f64,
    /// Monthly figure converted at the exchange rate.
    pub exchanged_pm: f64,
    /// Monthly figure with equivalent purchasing power.
    pub ppp_adjusted_pm: f64,
    /// Publication year of the source country's PPP factor.
    pub ppp_data_year_from: u16,
    /// Publication year of the target country's PPP factor.
    pub ppp_data_year_to: u16,
}

impl CalculationResponse {
    /// Builds the response body from an unrounded breakdown.
    pub fn new(
        country: impl Into<String>,
        currency_code: impl Into<String>,
        breakdown: IncomeBreakdown,
        contributions: &[BracketContribution],
    ) -> Self {
        Self {
            country: country.into(),
            currency_code: currency_code.into(),
            gross_pa: round_currency(breakdown.gross_pa),
            gross_pm: round_currency(breakdown.gross_pm),
            net_pa: round_currency(breakdown.net_pa),
            net_pm: round_currency(breakdown.net_pm),
            total_tax_pa: round_currency(breakdown.total_tax_pa),
            total_tax_pm: round_currency(breakdown.total_tax_pm),
            brackets: contributions.iter().map(BracketLine::from).collect(),
            comparison: None,
        }
    }
}

/// One country in the GET /countries listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySummary {
    /// The country name, usable as the `country` field of a calculation
    /// request.
    pub name: String,
    /// The country's currency code.
    pub currency_code: String,
    /// Purchasing-power-parity factor relative to the common baseline.
    pub ppp: f64,
    /// Publication year of the PPP factor.
    pub ppp_data_year: u16,
    /// Whether the country has an exemption policy to opt into.
    pub has_exemption: bool,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a country not found error response.
    pub fn country_not_found(name: &str) -> Self {
        Self::with_details(
            "COUNTRY_NOT_FOUND",
            format!("Country not found: {}", name),
            format!("The country '{}' is not present in the loaded configuration", name),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::CountryNotFound { name } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::country_not_found(&name),
            },
            EngineError::InvalidBrackets { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INVALID_BRACKETS",
                    "Bracket table is invalid",
                    message,
                ),
            },
            EngineError::InvalidAmount { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount '{}': {}", field, message),
                    "The request contains a value outside its valid domain",
                ),
            },
            EngineError::NonConvergent {
                target_net,
                iterations,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "NON_CONVERGENT",
                    "Gross search did not converge",
                    format!(
                        "No gross income reproducing net {} was found within {} iterations",
                        target_net, iterations
                    ),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaxBracket;

    #[test]
    fn test_round_currency_to_two_places() {
        assert_eq!(round_currency(70833.333333), 70833.33);
        assert_eq!(round_currency(66458.358333), 66458.36);
        assert_eq!(round_currency(0.0), 0.0);
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_open_ended_bracket_serializes_max_as_null() {
        let contribution = BracketContribution {
            bracket: TaxBracket {
                min: 1500001.0,
                max: f64::INFINITY,
                rate: 30.0,
            },
            taxable_amount: 100000.0,
            taxed_amount: 30000.0,
        };
        let line = BracketLine::from(&contribution);
        assert_eq!(line.max, None);

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"max\":null"));
    }

    #[test]
    fn test_engine_error_to_api_error() {
        let engine_error = EngineError::CountryNotFound {
            name: "Atlantis".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "COUNTRY_NOT_FOUND");
    }

    #[test]
    fn test_non_convergent_maps_to_server_error() {
        let engine_error = EngineError::NonConvergent {
            target_net: 1000.0,
            iterations: 100,
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "NON_CONVERGENT");
    }

    #[test]
    fn test_calculation_response_rounds_for_display() {
        let breakdown = IncomeBreakdown::from_annual(850000.0, 797500.3, 52499.7);
        let response = CalculationResponse::new("India", "INR", breakdown, &[]);
        assert_eq!(response.gross_pm, 70833.33);
        assert_eq!(response.total_tax_pa, 52499.7);
        assert!(response.comparison.is_none());
    }
}
