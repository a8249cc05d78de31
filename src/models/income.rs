//! Income figures and calculation input descriptors.

use serde::{Deserialize, Serialize};

/// Months in a year, used to split annual figures into monthly ones.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// The period a user-entered amount refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// The amount is per annum.
    Annual,
    /// The amount is per month.
    Monthly,
}

impl Period {
    /// Converts an amount in this period into an annual amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use takehome_engine::models::Period;
    ///
    /// assert_eq!(Period::Annual.annualize(850000.0), 850000.0);
    /// assert_eq!(Period::Monthly.annualize(50000.0), 600000.0);
    /// ```
    pub fn annualize(&self, amount: f64) -> f64 {
        match self {
            Period::Annual => amount,
            Period::Monthly => amount * MONTHS_PER_YEAR,
        }
    }
}

/// Which side of the tax equation the user-entered amount is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// The input is gross income; the engine computes net (forward).
    Gross,
    /// The input is the net target; the engine solves for gross (inverse).
    Net,
}

/// All derived income figures for one calculation, per annum and per month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
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
}

impl IncomeBreakdown {
    /// Builds the full breakdown from annual gross, net, and total tax.
    ///
    /// Monthly figures are the annual ones divided by twelve; no display
    /// rounding is applied here.
    ///
    /// # Examples
    ///
    /// ```
    /// use takehome_engine::models::IncomeBreakdown;
    ///
    /// let breakdown = IncomeBreakdown::from_annual(600000.0, 540000.0, 60000.0);
    /// assert_eq!(breakdown.gross_pm, 50000.0);
    /// assert_eq!(breakdown.net_pm, 45000.0);
    /// assert_eq!(breakdown.total_tax_pm, 5000.0);
    /// ```
    pub fn from_annual(gross_pa: f64, net_pa: f64, total_tax_pa: f64) -> Self {
        Self {
            gross_pa,
            gross_pm: gross_pa / MONTHS_PER_YEAR,
            net_pa,
            net_pm: net_pa / MONTHS_PER_YEAR,
            total_tax_pa,
            total_tax_pm: total_tax_pa / MONTHS_PER_YEAR,
        }
    }
}
