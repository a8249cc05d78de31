//! Property tests for the calculation core.
//!
//! These exercise the forward calculator and the gross-from-net search over
//! generated bracket tables rather than the shipped country data.

use proptest::prelude::*;

use takehome_engine::calculation::{calculate_bracket_tax, solve_gross_for_net};
use takehome_engine::models::TaxBracket;

/// Generates a valid contiguous bracket table: up to six bounded brackets
/// with whole-unit bounds starting at zero, closed by an open-ended top
/// bracket. Rates stay below 100% so a net target is always reachable.
fn arb_bracket_table() -> impl Strategy<Value = Vec<TaxBracket>> {
    (
        proptest::collection::vec((1_000u32..500_000, 0u32..60), 0..6),
        0u32..60,
    )
        .prop_map(|(segments, top_rate)| {
            let mut brackets = Vec::new();
            let mut lower = 0.0_f64;
            for (width, rate) in segments {
                let upper = lower + f64::from(width);
                brackets.push(TaxBracket {
                    min: lower,
                    max: upper,
                    rate: f64::from(rate),
                });
                lower = upper + 1.0;
            }
            brackets.push(TaxBracket {
                min: lower,
                max: f64::INFINITY,
                rate: f64::from(top_rate),
            });
            brackets
        })
}

proptest! {
    /// Total tax never decreases as gross grows.
    #[test]
    fn total_tax_is_monotonic_in_gross(
        brackets in arb_bracket_table(),
        g1 in 0u64..5_000_000,
        g2 in 0u64..5_000_000,
    ) {
        let (lo, hi) = if g1 <= g2 { (g1, g2) } else { (g2, g1) };
        let tax_lo = calculate_bracket_tax(lo as f64, &brackets).unwrap().total_tax;
        let tax_hi = calculate_bracket_tax(hi as f64, &brackets).unwrap().total_tax;
        prop_assert!(tax_lo <= tax_hi);
    }

    /// The taxable amounts of all brackets cover the whole gross, up to the
    /// one unit lost at each completed bracket boundary (inclusive bounds).
    #[test]
    fn taxable_amounts_cover_the_gross(
        brackets in arb_bracket_table(),
        gross in 0u64..5_000_000,
    ) {
        let gross = gross as f64;
        let result = calculate_bracket_tax(gross, &brackets).unwrap();
        let covered: f64 = result.contributions.iter().map(|c| c.taxable_amount).sum();
        prop_assert!(covered <= gross);
        prop_assert!(gross - covered <= brackets.len() as f64);
    }

    /// Zero gross is taxed at zero with an empty breakdown.
    #[test]
    fn zero_gross_is_tax_free(brackets in arb_bracket_table()) {
        let result = calculate_bracket_tax(0.0, &brackets).unwrap();
        prop_assert_eq!(result.total_tax, 0.0);
        prop_assert!(result.contributions.is_empty());
    }

    /// A zero net target solves to zero gross without iterating.
    #[test]
    fn zero_net_target_solves_to_zero_gross(brackets in arb_bracket_table()) {
        let solution = solve_gross_for_net(0.0, &brackets, 0.0).unwrap();
        prop_assert_eq!(solution.gross, 0.0);
        prop_assert_eq!(solution.tax.total_tax, 0.0);
    }

    /// Solving for a net target and recomputing forward reproduces the
    /// target within one currency unit.
    #[test]
    fn gross_search_round_trips_through_the_forward_calculation(
        brackets in arb_bracket_table(),
        net in 1u64..2_000_000,
    ) {
        let net = net as f64;
        let solution = solve_gross_for_net(net, &brackets, 0.0).unwrap();
        let forward = calculate_bracket_tax(solution.gross, &brackets).unwrap();
        let reproduced = solution.gross - forward.total_tax;
        prop_assert!(
            (reproduced - net).abs() < 1.0,
            "round trip off by {} (gross {}, tax {})",
            (reproduced - net).abs(),
            solution.gross,
            forward.total_tax
        );
    }

    /// The search approaches from below: the solved gross is never more
    /// than a step short of tax-consistency.
    #[test]
    fn solved_gross_is_tax_consistent(
        brackets in arb_bracket_table(),
        net in 1u64..2_000_000,
    ) {
        let net = net as f64;
        let solution = solve_gross_for_net(net, &brackets, 0.0).unwrap();
        prop_assert!(solution.gross >= net + solution.tax.total_tax);
    }

    /// An exemption never increases the tax paid for the same net target.
    #[test]
    fn exemption_never_increases_tax(
        brackets in arb_bracket_table(),
        net in 1u64..2_000_000,
    ) {
        let net = net as f64;
        let with = solve_gross_for_net(net, &brackets, 0.3).unwrap();
        let without = solve_gross_for_net(net, &brackets, 0.0).unwrap();
        prop_assert!(with.tax.total_tax <= without.tax.total_tax + 0.05);
    }
}
