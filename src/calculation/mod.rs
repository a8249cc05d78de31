//! Calculation logic for the take-home pay engine.
//!
//! This module contains the forward progressive bracket calculation, the
//! inverse gross-from-net search, the exemption policy helper, and the
//! cross-country purchasing-power comparison.

mod bracket_tax;
mod comparison;
mod exemption;
mod gross_solver;

pub use bracket_tax::{
    DEFAULT_MATERIALITY_THRESHOLD, calculate_bracket_tax, calculate_bracket_tax_with_threshold,
};
pub use comparison::{PurchasingPowerComparison, compare_purchasing_power};
pub use exemption::{applicable_gross, validate_exemption_fraction};
pub use gross_solver::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_STEP_TOLERANCE, GrossSolution, SolverOptions,
    solve_gross_for_net, solve_gross_for_net_with_options,
};
