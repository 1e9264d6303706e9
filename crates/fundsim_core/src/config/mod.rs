//! Capital-plan configuration
//!
//! The main configuration type is [`CapitalPlan`], produced by the
//! fluent [`PlanBuilder`] after validation against a
//! [`StageTable`](crate::model::StageTable). A plan is plain in-memory
//! data: the engine takes it by reference and never mutates it.

use serde::{Deserialize, Serialize};

use crate::model::StageId;

pub mod builder;

pub use builder::PlanBuilder;

/// Default number of periods a fund lifecycle is simulated over.
/// Roughly an 11-year fund raising every ~1.5 years.
pub const DEFAULT_LIFESPAN_PERIODS: u32 = 7;

/// Default fund lifespan in years (informational).
pub const DEFAULT_LIFESPAN_YEARS: u32 = 11;

/// Default scenario count for a Monte Carlo run.
pub const DEFAULT_NUM_SCENARIOS: usize = 1000;

/// One planned primary-investment tranche.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedInvestment {
    /// Entry stage for these investments
    pub stage: StageId,
    /// Capital invested per company
    pub per_company: f64,
    /// Total capital allocated to this stage
    pub total_allocation: f64,
}

/// A validated firm investment plan.
///
/// Invariant established by the builder: the per-stage allocations plus
/// `follow_on_reserve` equal `fund_size` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalPlan {
    pub investments: Vec<PlannedInvestment>,
    pub follow_on_reserve: f64,
    pub fund_size: f64,
    /// Pro-rata participation is allowed at valuations at or below this
    pub pro_rata_ceiling: f64,
    pub lifespan_periods: u32,
    pub lifespan_years: u32,
}

impl CapitalPlan {
    /// Sum of planned per-stage allocations (excludes the reserve).
    #[must_use]
    pub fn total_allocated(&self) -> f64 {
        self.investments.iter().map(|i| i.total_allocation).sum()
    }
}
