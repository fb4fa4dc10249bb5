//! Cost projection over one and five years.

use serde::{Deserialize, Serialize};

use purific_catalog::{Purifier, Refill};

/// Average weeks per year, leap years included.
pub const WEEKS_PER_YEAR: f64 = 52.14;

/// Refills are swapped every six months.
pub const REFILL_CHANGE_INTERVAL_MONTHS: u32 = 6;

/// Changes inside the first year: month 6 only. The purchase covers the
/// first six months.
pub const REFILL_CHANGES_FIRST_YEAR: u32 = 1;

/// Changes inside sixty months: months 6, 12, ..., 54. Nothing is counted at
/// month 60.
pub const REFILL_CHANGES_FIVE_YEARS: u32 = 9;

/// How much bottled water a household buys today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionProfile {
    pub jugs_per_week: f64,
    pub jug_price: f64,
}

impl ConsumptionProfile {
    pub fn new(jugs_per_week: f64, jug_price: f64) -> Self {
        Self {
            jugs_per_week,
            jug_price,
        }
    }

    pub fn weekly_cost(&self) -> f64 {
        self.jugs_per_week * self.jug_price
    }
}

/// Costs of both options and the difference between them.
///
/// Savings are `jug cost - purifier cost` and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub weekly_jug_cost: f64,
    pub jug_cost_1y: f64,
    pub jug_cost_5y: f64,
    /// Cost of one change event (`refill price x refill count`).
    pub refill_change_cost: f64,
    pub purifier_cost_1y: f64,
    pub purifier_cost_5y: f64,
    pub savings_1y: f64,
    pub savings_5y: f64,
}

impl Projection {
    pub fn balance_1y(&self) -> Balance {
        Balance::of(self.savings_1y)
    }

    pub fn balance_5y(&self) -> Balance {
        Balance::of(self.savings_5y)
    }
}

/// Sign-aware reading of a savings figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Balance {
    /// The purifier is cheaper by this amount.
    Savings(f64),
    /// The purifier costs this much more than jugs.
    Loss(f64),
    BreakEven,
}

impl Balance {
    pub fn of(amount: f64) -> Self {
        if amount > 0.0 {
            Balance::Savings(amount)
        } else if amount < 0.0 {
            Balance::Loss(-amount)
        } else {
            Balance::BreakEven
        }
    }

    /// Unsigned magnitude for display next to the label.
    pub fn amount(&self) -> f64 {
        match *self {
            Balance::Savings(v) | Balance::Loss(v) => v,
            Balance::BreakEven => 0.0,
        }
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, Balance::Savings(_))
    }
}

/// Project both options. Without a purifier and a refill there is nothing to
/// compare and no result is produced.
///
/// Inputs are taken verbatim: zero or negative consumption is not rejected.
pub fn simulate(
    profile: &ConsumptionProfile,
    purifier: Option<&Purifier>,
    refill: Option<&Refill>,
) -> Option<Projection> {
    let (purifier, refill) = (purifier?, refill?);

    let weekly_jug_cost = profile.weekly_cost();
    let jug_cost_1y = weekly_jug_cost * WEEKS_PER_YEAR;
    let jug_cost_5y = jug_cost_1y * 5.0;

    let refill_change_cost = refill.price * purifier.refill_count.as_f64();
    let purifier_cost_1y =
        purifier.price + f64::from(REFILL_CHANGES_FIRST_YEAR) * refill_change_cost;
    let purifier_cost_5y =
        purifier.price + f64::from(REFILL_CHANGES_FIVE_YEARS) * refill_change_cost;

    Some(Projection {
        weekly_jug_cost,
        jug_cost_1y,
        jug_cost_5y,
        refill_change_cost,
        purifier_cost_1y,
        purifier_cost_5y,
        savings_1y: jug_cost_1y - purifier_cost_1y,
        savings_5y: jug_cost_5y - purifier_cost_5y,
    })
}
