//! HTTP request handlers for the take-home pay engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    applicable_gross, calculate_bracket_tax_with_threshold, compare_purchasing_power,
    solve_gross_for_net,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationMode, IncomeBreakdown, TaxBracket, TaxResult};

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, ComparisonResponse, CountrySummary,
    round_currency,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/countries", get(countries_handler))
        .with_state(state)
}

/// Handler for GET /countries endpoint.
///
/// Returns the loaded country profiles for selection UIs, sorted by name.
async fn countries_handler(State(state): State<AppState>) -> impl IntoResponse {
    let countries: Vec<CountrySummary> = state
        .config()
        .countries()
        .into_iter()
        .map(|profile| CountrySummary {
            name: profile.name.clone(),
            currency_code: profile.currency_code.clone(),
            ppp: profile.ppp,
            ppp_data_year: profile.ppp_data_year,
            has_exemption: profile.has_exemption(),
        })
        .collect();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(countries),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns all derived income figures,
/// the per-bracket breakdown, and the optional cross-country comparison.
/// Forward calculations run inline; the gross-from-net search is CPU-bound
/// and runs on the blocking thread pool so the runtime workers stay free.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let config = state.config();

    // Resolve the taxing country
    let profile = match config.get_country(&request.country) {
        Ok(profile) => profile,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                country = %request.country,
                "Country not found"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    let annual_input = request.period.annualize(request.amount);
    let exemption_fraction = if request.apply_exemption {
        profile.exemption_fraction
    } else {
        0.0
    };

    // Perform the calculation
    let start_time = Instant::now();
    let outcome = match request.mode {
        CalculationMode::Gross => perform_forward(
            annual_input,
            &profile.brackets,
            exemption_fraction,
            request.materiality_threshold,
        ),
        CalculationMode::Net => {
            let brackets = profile.brackets.clone();
            let threshold = request.materiality_threshold;
            let join_result = tokio::task::spawn_blocking(move || {
                perform_inverse(annual_input, &brackets, exemption_fraction, threshold)
            })
            .await;
            match join_result {
                Ok(result) => result,
                Err(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "Background solve task failed"
                    );
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        [(header::CONTENT_TYPE, "application/json")],
                        Json(ApiError::new(
                            "CALCULATION_ERROR",
                            "Background calculation task failed",
                        )),
                    )
                        .into_response();
                }
            }
        }
    };

    let (breakdown, tax) = match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    let mut response = CalculationResponse::new(
        profile.name.clone(),
        profile.currency_code.clone(),
        breakdown,
        &tax.contributions,
    );

    // Optional cross-country comparison
    if let Some(compare) = &request.compare {
        let to_profile = match config.get_country(&compare.country) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    country = %compare.country,
                    "Comparison country not found"
                );
                let api_error: ApiErrorResponse = err.into();
                return (
                    api_error.status,
                    [(header::CONTENT_TYPE, "application/json")],
                    Json(api_error.error),
                )
                    .into_response();
            }
        };

        // The compared figure follows the calculation mode: gross in, gross
        // compared; net in, net compared.
        let (annual, monthly) = match request.mode {
            CalculationMode::Gross => (breakdown.gross_pa, breakdown.gross_pm),
            CalculationMode::Net => (breakdown.net_pa, breakdown.net_pm),
        };

        match compare_purchasing_power(annual, monthly, compare.exchange_rate, profile, to_profile)
        {
            Ok(comparison) => {
                response.comparison = Some(ComparisonResponse {
                    country: to_profile.name.clone(),
                    currency_code: to_profile.currency_code.clone(),
                    exchange_rate: compare.exchange_rate,
                    exchanged_pa: round_currency(comparison.exchanged_pa),
                    exchanged_pm: round_currency(comparison.exchanged_pm),
                    ppp_adjusted_pm: round_currency(comparison.ppp_adjusted_pm),
                    ppp_data_year_from: profile.ppp_data_year,
                    ppp_data_year_to: to_profile.ppp_data_year,
                });
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Comparison failed"
                );
                let api_error: ApiErrorResponse = err.into();
                return (
                    api_error.status,
                    [(header::CONTENT_TYPE, "application/json")],
                    Json(api_error.error),
                )
                    .into_response();
            }
        }
    }

    let duration = start_time.elapsed();
    info!(
        correlation_id = %correlation_id,
        country = %request.country,
        mode = ?request.mode,
        gross_pa = breakdown.gross_pa,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Computes all derived figures from a gross annual input.
fn perform_forward(
    annual_gross: f64,
    brackets: &[TaxBracket],
    exemption_fraction: f64,
    materiality_threshold: f64,
) -> EngineResult<(IncomeBreakdown, TaxResult)> {
    if !annual_gross.is_finite() || annual_gross < 0.0 {
        return Err(EngineError::InvalidAmount {
            field: "amount".to_string(),
            message: format!("must be a non-negative finite number, found {}", annual_gross),
        });
    }

    let taxable = applicable_gross(annual_gross, exemption_fraction);
    let tax = calculate_bracket_tax_with_threshold(taxable, brackets, materiality_threshold)?;
    let net_pa = annual_gross - tax.total_tax;
    let breakdown = IncomeBreakdown::from_annual(annual_gross, net_pa, tax.total_tax);

    Ok((breakdown, tax))
}

/// Solves for gross from a net annual target and derives all figures.
fn perform_inverse(
    target_net: f64,
    brackets: &[TaxBracket],
    exemption_fraction: f64,
    materiality_threshold: f64,
) -> EngineResult<(IncomeBreakdown, TaxResult)> {
    if !materiality_threshold.is_finite() || materiality_threshold < 0.0 {
        return Err(EngineError::InvalidAmount {
            field: "materiality_threshold".to_string(),
            message: format!(
                "must be a non-negative finite number, found {}",
                materiality_threshold
            ),
        });
    }

    let solution = solve_gross_for_net(target_net, brackets, exemption_fraction)?;

    // The threshold is a display filter; the solver always works unfiltered.
    let mut tax = solution.tax;
    if materiality_threshold > 0.0 {
        tax.contributions
            .retain(|c| c.taxed_amount > materiality_threshold);
    }

    let breakdown = IncomeBreakdown::from_annual(solution.gross, target_net, tax.total_tax);

    Ok((breakdown, tax))
}
