//! Cross-country purchasing-power comparison.
//!
//! Expresses one country's income figure in another country's currency
//! (via an externally supplied exchange rate) and in purchasing-power terms
//! (via the two countries' PPP factors). The exchange rate is an input; the
//! engine never fetches it.

use crate::config::CountryProfile;
use crate::error::{EngineError, EngineResult};

/// An income figure translated into the target country's terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchasingPowerComparison {
    /// Annual figure converted at the exchange rate.
    pub exchanged_pa: f64,
    /// Monthly figure converted at the exchange rate.
    pub exchanged_pm: f64,
    /// Monthly figure with equivalent purchasing power in the target
    /// country (`pm / from.ppp * to.ppp`).
    pub ppp_adjusted_pm: f64,
}

/// Translates annual and monthly figures from one country into another.
///
/// # Arguments
///
/// * `annual` - The annual figure in the source country's currency
/// * `monthly` - The matching monthly figure
/// * `exchange_rate` - Units of the target currency per unit of the source
///   currency; must be finite and positive
/// * `from` - The source country profile (supplies the source PPP factor)
/// * `to` - The target country profile (supplies the target PPP factor)
pub fn compare_purchasing_power(
    annual: f64,
    monthly: f64,
    exchange_rate: f64,
    from: &CountryProfile,
    to: &CountryProfile,
) -> EngineResult<PurchasingPowerComparison> {
    if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
        return Err(EngineError::InvalidAmount {
            field: "exchange_rate".to_string(),
            message: format!("must be a positive finite number, found {}", exchange_rate),
        });
    }

    Ok(PurchasingPowerComparison {
        exchanged_pa: annual * exchange_rate,
        exchanged_pm: monthly * exchange_rate,
        ppp_adjusted_pm: monthly / from.ppp * to.ppp,
    })
}
