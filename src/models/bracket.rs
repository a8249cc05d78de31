//! Tax bracket model and bracket-table validation.
//!
//! This module defines the TaxBracket struct and the validation of whole
//! bracket tables against the ordering and contiguity invariants.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A contiguous income range taxed at a single marginal rate.
///
/// `min` and `max` are inclusive annual income bounds in the country's own
/// currency. The top bracket of a table is open-ended and carries
/// `f64::INFINITY` as its upper bound (written `.inf` in YAML configuration).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (inclusive).
    pub min: f64,
    /// Upper bound of the bracket (inclusive); infinite for the top bracket.
    pub max: f64,
    /// Marginal rate applied inside this bracket, as a percentage in 0..=100.
    pub rate: f64,
}

impl TaxBracket {
    /// Returns true if this is the open-ended top bracket.
    ///
    /// # Examples
    ///
    /// ```
    /// use takehome_engine::models::TaxBracket;
    ///
    /// let top = TaxBracket { min: 1500001.0, max: f64::INFINITY, rate: 30.0 };
    /// assert!(top.is_open_ended());
    ///
    /// let bounded = TaxBracket { min: 0.0, max: 250000.0, rate: 0.0 };
    /// assert!(!bounded.is_open_ended());
    /// ```
    pub fn is_open_ended(&self) -> bool {
        self.max.is_infinite()
    }
}

/// Validates a bracket table against the structural invariants.
///
/// A valid table is non-empty, starts at zero, is ordered ascending with
/// contiguous bounds (`min` of each bracket equals `max` of the previous one
/// plus one), has rates within 0..=100, and ends with exactly one open-ended
/// bracket. Any violation is an [`EngineError::InvalidBrackets`]; the table
/// is never silently corrected.
///
/// # Arguments
///
/// * `brackets` - The table to validate, ordered by `min` ascending
///
/// # Examples
///
/// ```
/// use takehome_engine::models::{validate_bracket_table, TaxBracket};
///
/// let table = vec![
///     TaxBracket { min: 0.0, max: 20384.0, rate: 36.65 },
///     TaxBracket { min: 20385.0, max: f64::INFINITY, rate: 51.75 },
/// ];
/// assert!(validate_bracket_table(&table).is_ok());
/// ```
pub fn validate_bracket_table(brackets: &[TaxBracket]) -> EngineResult<()> {
    if brackets.is_empty() {
        return Err(EngineError::InvalidBrackets {
            message: "bracket table is empty".to_string(),
        });
    }

    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.min.is_nan() || bracket.max.is_nan() || bracket.rate.is_nan() {
            return Err(EngineError::InvalidBrackets {
                message: format!("bracket {} contains NaN", i),
            });
        }
        if bracket.min < 0.0 || bracket.min.is_infinite() {
            return Err(EngineError::InvalidBrackets {
                message: format!("bracket {} has invalid lower bound {}", i, bracket.min),
            });
        }
        if bracket.max <= bracket.min {
            return Err(EngineError::InvalidBrackets {
                message: format!(
                    "bracket {} has upper bound {} not above lower bound {}",
                    i, bracket.max, bracket.min
                ),
            });
        }
        if !(0.0..=100.0).contains(&bracket.rate) {
            return Err(EngineError::InvalidBrackets {
                message: format!("bracket {} has rate {} outside 0..=100", i, bracket.rate),
            });
        }
    }

    if brackets[0].min != 0.0 {
        return Err(EngineError::InvalidBrackets {
            message: format!("first bracket must start at 0, found {}", brackets[0].min),
        });
    }

    let last = brackets.len() - 1;
    for (i, bracket) in brackets.iter().enumerate() {
        if i < last && bracket.is_open_ended() {
            return Err(EngineError::InvalidBrackets {
                message: format!("bracket {} is unbounded but is not the last bracket", i),
            });
        }
    }
    if !brackets[last].is_open_ended() {
        return Err(EngineError::InvalidBrackets {
            message: "last bracket must have an unbounded upper bound".to_string(),
        });
    }

    for i in 1..brackets.len() {
        let expected = brackets[i - 1].max + 1.0;
        if brackets[i].min != expected {
            return Err(EngineError::InvalidBrackets {
                message: format!(
                    "gap or overlap between brackets {} and {}: expected lower bound {}, found {}",
                    i - 1,
                    i,
                    expected,
                    brackets[i].min
                ),
            });
        }
    }

    Ok(())
}
