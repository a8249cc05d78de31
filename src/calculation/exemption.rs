//! Taxable-income exemption policy.
//!
//! Some regimes let part of gross income be excluded from taxation (the
//! Dutch expat ruling excludes 30%, for example). The fraction is reference
//! data on the country profile; whether it applies to a given calculation is
//! decided by the caller.

use crate::error::{EngineError, EngineResult};

/// Reduces an annual gross amount by the exempted fraction.
///
/// With a fraction of zero the amount passes through unchanged.
///
/// # Examples
///
/// ```
/// use takehome_engine::calculation::applicable_gross;
///
/// assert_eq!(applicable_gross(50000.0, 0.3), 35000.0);
/// assert_eq!(applicable_gross(50000.0, 0.0), 50000.0);
/// ```
pub fn applicable_gross(annual_gross: f64, exemption_fraction: f64) -> f64 {
    if exemption_fraction > 0.0 {
        annual_gross * (1.0 - exemption_fraction)
    } else {
        annual_gross
    }
}

/// Checks that an exemption fraction lies in `[0, 1)`.
///
/// A fraction of 1 or more would exempt the entire income and make the
/// gross-from-net search meaningless.
pub fn validate_exemption_fraction(exemption_fraction: f64) -> EngineResult<()> {
    if !exemption_fraction.is_finite() || !(0.0..1.0).contains(&exemption_fraction) {
        return Err(EngineError::InvalidAmount {
            field: "exemption_fraction".to_string(),
            message: format!("must lie in [0, 1), found {}", exemption_fraction),
        });
    }
    Ok(())
}
