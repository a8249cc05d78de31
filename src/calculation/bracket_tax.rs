//! Forward progressive bracket tax calculation.
//!
//! This module maps an annual taxable gross amount and an ordered bracket
//! table to per-bracket taxed amounts and a total. It is the leaf of the
//! engine: pure, deterministic, and free of I/O.

use crate::error::{EngineError, EngineResult};
use crate::models::{BracketContribution, TaxBracket, TaxResult, validate_bracket_table};

/// Default materiality threshold for the contribution list.
///
/// At the default of zero, every bracket with a non-zero taxable amount is
/// listed, including zero-rate brackets. A positive threshold lists only
/// brackets whose taxed amount exceeds it.
pub const DEFAULT_MATERIALITY_THRESHOLD: f64 = 0.0;

/// Calculates progressive tax on an annual taxable gross amount.
///
/// Equivalent to [`calculate_bracket_tax_with_threshold`] with the default
/// materiality threshold, so the breakdown lists every bracket that received
/// any taxable amount.
///
/// # Arguments
///
/// * `annual_taxable_gross` - The annual gross amount after any exemption,
///   `>= 0` and finite
/// * `brackets` - The bracket table, validated against the contiguity
///   invariants before use
///
/// # Returns
///
/// The [`TaxResult`] with the total and per-bracket breakdown, or
/// `InvalidAmount` / `InvalidBrackets` for malformed input.
///
/// # Examples
///
/// ```
/// use takehome_engine::calculation::calculate_bracket_tax;
/// use takehome_engine::models::TaxBracket;
///
/// let brackets = vec![
///     TaxBracket { min: 0.0, max: 250000.0, rate: 0.0 },
///     TaxBracket { min: 250001.0, max: f64::INFINITY, rate: 5.0 },
/// ];
/// let result = calculate_bracket_tax(300000.0, &brackets).unwrap();
/// assert!((result.total_tax - 2499.95).abs() < 1e-6);
/// ```
pub fn calculate_bracket_tax(
    annual_taxable_gross: f64,
    brackets: &[TaxBracket],
) -> EngineResult<TaxResult> {
    calculate_bracket_tax_with_threshold(
        annual_taxable_gross,
        brackets,
        DEFAULT_MATERIALITY_THRESHOLD,
    )
}

/// Calculates progressive tax with an explicit materiality threshold.
///
/// The threshold is a display policy: it filters which brackets appear in
/// the returned contribution list, and nothing else. The total always sums
/// every bracket with a non-zero taxable amount, so a filtered breakdown can
/// sum to less than `total_tax`.
///
/// # Arguments
///
/// * `annual_taxable_gross` - The annual gross amount after any exemption
/// * `brackets` - The bracket table
/// * `materiality_threshold` - Minimum taxed amount for a bracket to be
///   listed; `0` lists every bracket with a non-zero taxable amount
pub fn calculate_bracket_tax_with_threshold(
    annual_taxable_gross: f64,
    brackets: &[TaxBracket],
    materiality_threshold: f64,
) -> EngineResult<TaxResult> {
    if !annual_taxable_gross.is_finite() || annual_taxable_gross < 0.0 {
        return Err(EngineError::InvalidAmount {
            field: "annual_taxable_gross".to_string(),
            message: format!(
                "must be a non-negative finite number, found {}",
                annual_taxable_gross
            ),
        });
    }
    if !materiality_threshold.is_finite() || materiality_threshold < 0.0 {
        return Err(EngineError::InvalidAmount {
            field: "materiality_threshold".to_string(),
            message: format!(
                "must be a non-negative finite number, found {}",
                materiality_threshold
            ),
        });
    }
    validate_bracket_table(brackets)?;

    Ok(tax_on_validated(
        annual_taxable_gross,
        brackets,
        materiality_threshold,
    ))
}

/// Core overlap computation over an already-validated bracket table.
///
/// Kept separate so the gross-from-net search can validate once and then
/// call this on every iteration.
pub(crate) fn tax_on_validated(
    annual_taxable_gross: f64,
    brackets: &[TaxBracket],
    materiality_threshold: f64,
) -> TaxResult {
    let mut total_tax = 0.0;
    let mut contributions = Vec::new();

    for bracket in brackets {
        let taxable_amount = if annual_taxable_gross > bracket.max {
            bracket.max - bracket.min
        } else if annual_taxable_gross > bracket.min && annual_taxable_gross <= bracket.max {
            annual_taxable_gross - bracket.min
        } else {
            0.0
        };
        let taxed_amount = taxable_amount * bracket.rate / 100.0;

        if taxable_amount > 0.0 {
            total_tax += taxed_amount;
        }

        let listed = if materiality_threshold > 0.0 {
            taxed_amount > materiality_threshold
        } else {
            taxable_amount > 0.0
        };
        if listed {
            contributions.push(BracketContribution {
                bracket: *bracket,
                taxable_amount,
                taxed_amount,
            });
        }
    }

    TaxResult {
        total_tax,
        contributions,
    }
}
