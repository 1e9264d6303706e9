//! Capital-plan builder
//!
//! The `PlanBuilder` provides a fluent API for deriving a firm's
//! investment plan from entry-stage splits, validating it before any
//! simulation work begins.
//!
//! # Example
//!
//! ```ignore
//! use fundsim_core::config::PlanBuilder;
//! use fundsim_core::model::StageTable;
//!
//! let table = StageTable::default_market();
//! let plan = PlanBuilder::new()
//!     .entry_stage("Pre-seed", 0.3, 1.5)
//!     .entry_stage("Seed", 0.7, 4.0)
//!     .primary_capital(180.0)
//!     .follow_on_capital(20.0)
//!     .fund_size(200.0)
//!     .pro_rata_at_or_below("Series A")
//!     .build(&table)?;
//! ```

use crate::config::{
    CapitalPlan, DEFAULT_LIFESPAN_PERIODS, DEFAULT_LIFESPAN_YEARS, PlannedInvestment,
};
use crate::error::ConfigError;
use crate::model::StageTable;

/// Tolerance for the builder's exact-sum checks, scaled by fund size.
/// Allocations are sums of floats, so "exactly equal" means within float
/// accumulation error.
const ALLOCATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
struct EntryStage {
    name: String,
    fraction: f64,
    unit: f64,
}

/// Builder for a validated [`CapitalPlan`].
#[derive(Debug, Clone, Default)]
pub struct PlanBuilder {
    entries: Vec<EntryStage>,
    primary_capital: f64,
    follow_on_capital: f64,
    fund_size: f64,
    pro_rata_stage: Option<String>,
    lifespan_periods: Option<u32>,
    lifespan_years: Option<u32>,
}

impl PlanBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry stage: the fraction of primary capital allocated to
    /// it and the per-company unit investment size.
    #[must_use]
    pub fn entry_stage(mut self, name: impl Into<String>, fraction: f64, unit: f64) -> Self {
        self.entries.push(EntryStage {
            name: name.into(),
            fraction,
            unit,
        });
        self
    }

    /// Total capital for initial (primary) investments.
    #[must_use]
    pub fn primary_capital(mut self, amount: f64) -> Self {
        self.primary_capital = amount;
        self
    }

    /// Capital reserved for pro-rata follow-on participation.
    #[must_use]
    pub fn follow_on_capital(mut self, amount: f64) -> Self {
        self.follow_on_capital = amount;
        self
    }

    /// Total fund size. Must equal primary plus follow-on exactly.
    #[must_use]
    pub fn fund_size(mut self, amount: f64) -> Self {
        self.fund_size = amount;
        self
    }

    /// Stage whose valuation caps pro-rata participation: the firm
    /// defends ownership only in rounds at or below this valuation.
    #[must_use]
    pub fn pro_rata_at_or_below(mut self, stage: impl Into<String>) -> Self {
        self.pro_rata_stage = Some(stage.into());
        self
    }

    /// Fund lifespan in simulation periods and calendar years.
    #[must_use]
    pub fn lifespan(mut self, periods: u32, years: u32) -> Self {
        self.lifespan_periods = Some(periods);
        self.lifespan_years = Some(years);
        self
    }

    /// Validate the inputs and derive the plan.
    ///
    /// For each entry stage with a positive fraction, the whole number of
    /// unit investments that fit within its share of primary capital is
    /// allocated (floor division); unspent remainders from all entry
    /// stages fold back into the follow-on reserve. Fails rather than
    /// returning a plan whose allocations do not reproduce the fund size.
    pub fn build(self, table: &StageTable) -> Result<CapitalPlan, ConfigError> {
        let fraction_sum: f64 = self.entries.iter().map(|e| e.fraction).sum();
        if (fraction_sum - 1.0).abs() > ALLOCATION_TOLERANCE {
            return Err(ConfigError::SplitNotUnity { sum: fraction_sum });
        }
        let mismatch = self.primary_capital + self.follow_on_capital - self.fund_size;
        if mismatch.abs() > ALLOCATION_TOLERANCE * self.fund_size.max(1.0) {
            return Err(ConfigError::AllocationMismatch {
                primary: self.primary_capital,
                follow_on: self.follow_on_capital,
                fund_size: self.fund_size,
            });
        }

        let mut investments = Vec::new();
        let mut total_allocated = 0.0;
        for entry in &self.entries {
            if entry.fraction <= 0.0 {
                continue;
            }
            if entry.unit <= 0.0 || !entry.unit.is_finite() {
                return Err(ConfigError::InvalidUnitSize {
                    stage: entry.name.clone(),
                    unit: entry.unit,
                });
            }
            let stage = table.id(&entry.name)?;
            let share = entry.fraction * self.primary_capital;
            // Whole units only; the fractional remainder is not invested
            let units = (share / entry.unit).floor();
            let allocation = units * entry.unit;
            total_allocated += allocation;
            investments.push(PlannedInvestment {
                stage,
                per_company: entry.unit,
                total_allocation: allocation,
            });
        }

        // Primary capital that could not fund a whole unit at any entry
        // stage is reserved for follow-on instead
        let revised_follow_on = self.follow_on_capital + (self.primary_capital - total_allocated);

        let pro_rata_ceiling = match &self.pro_rata_stage {
            Some(name) => table.valuation(table.id(name)?),
            None => table.valuation(table.last()),
        };

        let plan = CapitalPlan {
            investments,
            follow_on_reserve: revised_follow_on,
            fund_size: self.fund_size,
            pro_rata_ceiling,
            lifespan_periods: self.lifespan_periods.unwrap_or(DEFAULT_LIFESPAN_PERIODS),
            lifespan_years: self.lifespan_years.unwrap_or(DEFAULT_LIFESPAN_YEARS),
        };

        // Self-check: every dollar of the fund is either allocated to a
        // stage or sitting in the reserve. A miss here is a programming
        // error, not a runtime condition, and must never be swallowed.
        let accounted = plan.total_allocated() + plan.follow_on_reserve;
        if (accounted - plan.fund_size).abs() > ALLOCATION_TOLERANCE * plan.fund_size.max(1.0) {
            return Err(ConfigError::AllocationLeak {
                allocated: accounted,
                fund_size: plan.fund_size,
            });
        }

        Ok(plan)
    }
}
