//! Result types for a single tax calculation.
//!
//! Contributions are computed fresh on every invocation and returned by
//! value; the input bracket table is never annotated with per-call scratch
//! data, so tables can be shared freely across concurrent calculations.

use serde::{Deserialize, Serialize};

use super::bracket::TaxBracket;

/// The portion of a calculation attributable to one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketContribution {
    /// The bracket this contribution belongs to.
    pub bracket: TaxBracket,
    /// The portion of the taxable gross falling inside the bracket's range.
    pub taxable_amount: f64,
    /// Tax charged on that portion (`taxable_amount * rate / 100`).
    pub taxed_amount: f64,
}

/// The outcome of a forward tax calculation.
///
/// `total_tax` always sums every bracket with a non-zero taxable amount;
/// `contributions` may be a filtered subset when a materiality threshold was
/// requested for display purposes (the filter never changes the total).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Total annual tax across all brackets.
    pub total_tax: f64,
    /// Per-bracket breakdown, ordered as in the input table.
    pub contributions: Vec<BracketContribution>,
}

impl TaxResult {
    /// A result with no tax and no contributing brackets.
    ///
    /// # Examples
    ///
    /// ```
    /// use takehome_engine::models::TaxResult;
    ///
    /// let result = TaxResult::zero();
    /// assert_eq!(result.total_tax, 0.0);
    /// assert!(result.contributions.is_empty());
    /// ```
    pub fn zero() -> Self {
        Self {
            total_tax: 0.0,
            contributions: Vec::new(),
        }
    }
}
