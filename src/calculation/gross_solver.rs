//! Inverse tax calculation: finding gross income from a net target.
//!
//! The forward bracket calculation has no closed-form inverse once
//! exemptions and multiple rates are involved, so the gross amount is found
//! by an adaptive forward search: grow a gross estimate from zero in steps,
//! shrinking the step whenever the next increment would overshoot the
//! tax-consistent target. The step only ever shrinks, so the search
//! converges monotonically from below. This is a heuristic control loop, not
//! a standard root-finder; its observable behavior (including the tie-break
//! on overshoot) is part of the engine's contract.

use crate::error::{EngineError, EngineResult};
use crate::models::{TaxBracket, TaxResult, validate_bracket_table};

use super::bracket_tax::{DEFAULT_MATERIALITY_THRESHOLD, tax_on_validated};
use super::exemption::{applicable_gross, validate_exemption_fraction};

/// Step size below which the search stops shrinking and accepts the
/// remaining overshoot.
pub const DEFAULT_STEP_TOLERANCE: f64 = 0.01;

/// Default iteration budget; typical searches finish within a few hundred
/// iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100_000;

/// Tuning knobs for the gross-from-net search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Step size at which shrinking stops; bounds the final overshoot.
    pub tolerance: f64,
    /// Iteration budget before the search gives up with `NonConvergent`.
    pub max_iterations: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// The result of a gross-from-net search.
#[derive(Debug, Clone, PartialEq)]
pub struct GrossSolution {
    /// The annual gross income whose forward-computed net meets the target.
    pub gross: f64,
    /// The tax breakdown computed on the final search iteration.
    ///
    /// The breakdown lags the last step increment, which is within the
    /// convergence tolerance of `gross`.
    pub tax: TaxResult,
}

/// Solves for the annual gross income that yields a target annual net.
///
/// Uses [`SolverOptions::default`]; see [`solve_gross_for_net_with_options`].
///
/// # Examples
///
/// ```
/// use takehome_engine::calculation::solve_gross_for_net;
/// use takehome_engine::models::TaxBracket;
///
/// let brackets = vec![
///     TaxBracket { min: 0.0, max: 50000.0, rate: 0.0 },
///     TaxBracket { min: 50001.0, max: f64::INFINITY, rate: 50.0 },
/// ];
/// let solution = solve_gross_for_net(75000.0, &brackets, 0.0).unwrap();
/// // Net 75 000 requires gross 100 000: half of the 50 000 above the
/// // threshold is taxed away.
/// assert!((solution.gross - 100000.0).abs() < 2.0);
/// ```
pub fn solve_gross_for_net(
    target_annual_net: f64,
    brackets: &[TaxBracket],
    exemption_fraction: f64,
) -> EngineResult<GrossSolution> {
    solve_gross_for_net_with_options(
        target_annual_net,
        brackets,
        exemption_fraction,
        SolverOptions::default(),
    )
}

/// Solves for gross income from a net target with explicit options.
///
/// Starting from `gross = 0` with a step of one hundredth of the target, the
/// search repeatedly computes the tax at the current estimate (after applying
/// any exemption), derives the gross that would be consistent with that tax
/// (`target + total_tax`), shrinks the step by a factor of three when the
/// next increment would cross it while the step is still above `tolerance`,
/// and advances. The search exits as soon as the estimate meets the
/// consistent gross, so it approaches from below and overshoots by at most
/// the final step.
///
/// # Arguments
///
/// * `target_annual_net` - The desired annual net income, `>= 0` and finite
/// * `brackets` - The bracket table of the taxing country
/// * `exemption_fraction` - Fraction of gross excluded from taxation, in
///   `[0, 1)`; pass `0` when no exemption applies
/// * `options` - Convergence tolerance and iteration budget
///
/// # Returns
///
/// The [`GrossSolution`], or `InvalidAmount` / `InvalidBrackets` for
/// malformed input, or `NonConvergent` when the iteration budget runs out
/// (a table taxing at 100% can make the target unreachable).
pub fn solve_gross_for_net_with_options(
    target_annual_net: f64,
    brackets: &[TaxBracket],
    exemption_fraction: f64,
    options: SolverOptions,
) -> EngineResult<GrossSolution> {
    if !target_annual_net.is_finite() || target_annual_net < 0.0 {
        return Err(EngineError::InvalidAmount {
            field: "target_annual_net".to_string(),
            message: format!(
                "must be a non-negative finite number, found {}",
                target_annual_net
            ),
        });
    }
    validate_exemption_fraction(exemption_fraction)?;
    validate_bracket_table(brackets)?;

    // A zero target would start with a zero step and never advance.
    if target_annual_net == 0.0 {
        return Ok(GrossSolution {
            gross: 0.0,
            tax: TaxResult::zero(),
        });
    }

    let mut gross = 0.0_f64;
    let mut step = target_annual_net / 100.0;

    for _ in 0..options.max_iterations {
        let taxable = applicable_gross(gross, exemption_fraction);
        let tax = tax_on_validated(taxable, brackets, DEFAULT_MATERIALITY_THRESHOLD);
        let required_gross = target_annual_net + tax.total_tax;

        if step > options.tolerance && gross + step >= required_gross {
            step /= 3.0;
        }
        gross += step;

        if gross >= required_gross {
            return Ok(GrossSolution { gross, tax });
        }
    }

    Err(EngineError::NonConvergent {
        target_net: target_annual_net,
        iterations: options.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_bracket_tax;

    fn india_table() -> Vec<TaxBracket> {
        vec![
            TaxBracket { min: 0.0, max: 250000.0, rate: 0.0 },
            TaxBracket { min: 250001.0, max: 500000.0, rate: 5.0 },
            TaxBracket { min: 500001.0, max: 750000.0, rate: 10.0 },
            TaxBracket { min: 750001.0, max: 1000000.0, rate: 15.0 },
            TaxBracket { min: 1000001.0, max: 1250000.0, rate: 20.0 },
            TaxBracket { min: 1250001.0, max: 1500000.0, rate: 25.0 },
            TaxBracket { min: 1500001.0, max: f64::INFINITY, rate: 30.0 },
        ]
    }

    fn netherlands_table() -> Vec<TaxBracket> {
        vec![
            TaxBracket { min: 0.0, max: 20384.0, rate: 36.65 },
            TaxBracket { min: 20385.0, max: 34300.0, rate: 38.10 },
            TaxBracket { min: 34301.0, max: 68507.0, rate: 38.10 },
            TaxBracket { min: 68508.0, max: f64::INFINITY, rate: 51.75 },
        ]
    }

    #[test]
    fn test_zero_target_returns_immediately() {
        let solution = solve_gross_for_net(0.0, &india_table(), 0.0).unwrap();
        assert_eq!(solution.gross, 0.0);
        assert_eq!(solution.tax.total_tax, 0.0);
        assert!(solution.tax.contributions.is_empty());
    }

    #[test]
    fn test_target_below_first_bracket_needs_no_grossing_up() {
        // Everything under 250 000 is untaxed in the India table.
        let solution = solve_gross_for_net(200000.0, &india_table(), 0.0).unwrap();
        assert!((solution.gross - 200000.0).abs() < 1.0);
        assert!(solution.tax.total_tax < 1e-9);
    }

    #[test]
    fn test_round_trip_reproduces_the_target_net() {
        let table = india_table();
        let target = 797500.0;
        let solution = solve_gross_for_net(target, &table, 0.0).unwrap();

        let forward = calculate_bracket_tax(solution.gross, &table).unwrap();
        let net = solution.gross - forward.total_tax;
        assert!(
            (net - target).abs() < 1.0,
            "round trip off by {}",
            (net - target).abs()
        );
        assert!((solution.gross - 850000.0).abs() < 2.0);
    }

    #[test]
    fn test_returned_breakdown_is_consistent_with_gross() {
        let solution = solve_gross_for_net(40000.0, &netherlands_table(), 0.0).unwrap();
        assert!((solution.gross - solution.tax.total_tax - 40000.0).abs() < 1.0);
        assert_eq!(solution.tax.contributions.len(), 3);
    }

    #[test]
    fn test_exemption_reduces_tax_for_same_target() {
        let table = netherlands_table();
        let with = solve_gross_for_net(30000.0, &table, 0.3).unwrap();
        let without = solve_gross_for_net(30000.0, &table, 0.0).unwrap();

        assert!(with.tax.total_tax < without.tax.total_tax);
        assert!(with.gross < without.gross);
    }

    #[test]
    fn test_exhausted_iteration_budget_is_reported() {
        let options = SolverOptions {
            tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: 5,
        };
        let result =
            solve_gross_for_net_with_options(1_000_000.0, &india_table(), 0.0, options);
        match result {
            Err(EngineError::NonConvergent {
                target_net,
                iterations,
            }) => {
                assert_eq!(target_net, 1_000_000.0);
                assert_eq!(iterations, 5);
            }
            other => panic!("Expected NonConvergent, got {:?}", other),
        }
    }

    #[test]
    fn test_full_taxation_never_converges() {
        // A 100% rate from zero makes any positive net unreachable; the
        // iteration budget turns the endless search into an error.
        let table = vec![TaxBracket {
            min: 0.0,
            max: f64::INFINITY,
            rate: 100.0,
        }];
        let options = SolverOptions {
            tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: 10_000,
        };
        let result = solve_gross_for_net_with_options(100.0, &table, 0.0, options);
        assert!(matches!(result, Err(EngineError::NonConvergent { .. })));
    }

    #[test]
    fn test_negative_target_is_rejected() {
        let result = solve_gross_for_net(-100.0, &india_table(), 0.0);
        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    #[test]
    fn test_out_of_range_exemption_is_rejected() {
        assert!(solve_gross_for_net(1000.0, &india_table(), 1.0).is_err());
        assert!(solve_gross_for_net(1000.0, &india_table(), -0.5).is_err());
    }

    #[test]
    fn test_invalid_table_is_rejected_before_searching() {
        let mut table = india_table();
        table[1].min = 300000.0;
        let result = solve_gross_for_net(500000.0, &table, 0.0);
        assert!(matches!(result, Err(EngineError::InvalidBrackets { .. })));
    }
}
