//! A firm: one simulated fund and the portfolio it exclusively owns.

use serde::{Deserialize, Serialize};

use crate::config::{CapitalPlan, PlannedInvestment};
use crate::error::SimulationError;
use crate::model::company::{Company, CompanyState};
use crate::model::stage::StageTable;

/// Portfolio value split by lifecycle state. Failed positions are worth
/// zero and are omitted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioBreakdown {
    pub alive: f64,
    pub acquired: f64,
}

/// Company counts by current stage and terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioCensus {
    /// Alive companies per stage rank
    pub alive_by_stage: Vec<usize>,
    pub failed: usize,
    pub acquired: usize,
}

/// One simulated fund lifecycle: a capital plan, reserve accounting, and
/// the portfolio built from them. Companies are owned exclusively; no
/// state is shared across firms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firm {
    pub name: String,
    /// Planned primary investments: (stage, per-company size, stage total)
    pub investments: Vec<PlannedInvestment>,
    /// Capital reserved for pro-rata participation in later rounds
    pub follow_on_reserve: f64,
    pub primary_capital_deployed: f64,
    pub follow_on_capital_deployed: f64,
    pub fund_size: f64,
    pub lifespan_periods: u32,
    pub lifespan_years: u32,
    /// Insertion order is creation order
    pub portfolio: Vec<Company>,
}

impl Firm {
    /// Create a firm from a validated capital plan with an empty
    /// portfolio.
    #[must_use]
    pub fn new(name: String, plan: &CapitalPlan) -> Self {
        Self {
            name,
            investments: plan.investments.clone(),
            follow_on_reserve: plan.follow_on_reserve,
            primary_capital_deployed: 0.0,
            follow_on_capital_deployed: 0.0,
            fund_size: plan.fund_size,
            lifespan_periods: plan.lifespan_periods,
            lifespan_years: plan.lifespan_years,
            portfolio: Vec::new(),
        }
    }

    /// Create the initial portfolio: for every plan entry, whole
    /// per-company units until the stage allocation cannot fund another.
    /// A partial remainder is left unspent (the plan builder already
    /// folded remainders into the follow-on reserve).
    pub fn initialize_portfolio(&mut self, table: &StageTable) {
        for entry in &self.investments {
            let mut remaining = entry.total_allocation;
            let mut sequence = 0usize;
            while remaining >= entry.per_company && remaining > 0.0 {
                let name = format!("{}-{}", table.name(entry.stage), sequence);
                self.portfolio
                    .push(Company::funded(name, entry.stage, table, entry.per_company));
                remaining -= entry.per_company;
                self.primary_capital_deployed += entry.per_company;
                sequence += 1;
            }
        }
    }

    /// Current portfolio value: Alive and Acquired positions contribute
    /// valuation times ownership; Failed positions contribute zero.
    #[must_use]
    pub fn portfolio_value(&self) -> f64 {
        self.portfolio.iter().map(Company::firm_value).sum()
    }

    /// Portfolio value split by state.
    #[must_use]
    pub fn portfolio_value_by_state(&self) -> PortfolioBreakdown {
        let mut breakdown = PortfolioBreakdown::default();
        for company in &self.portfolio {
            match company.state {
                CompanyState::Alive => breakdown.alive += company.firm_value(),
                CompanyState::Acquired => breakdown.acquired += company.firm_value(),
                CompanyState::Failed => {}
            }
        }
        breakdown
    }

    /// Company counts per stage plus terminal-state buckets.
    #[must_use]
    pub fn census(&self, table: &StageTable) -> PortfolioCensus {
        let mut census = PortfolioCensus {
            alive_by_stage: vec![0; table.len()],
            failed: 0,
            acquired: 0,
        };
        for company in &self.portfolio {
            match company.state {
                CompanyState::Alive => census.alive_by_stage[company.stage_index()] += 1,
                CompanyState::Failed => census.failed += 1,
                CompanyState::Acquired => census.acquired += 1,
            }
        }
        census
    }

    /// Total capital put to work so far.
    #[must_use]
    pub fn capital_invested(&self) -> f64 {
        self.primary_capital_deployed + self.follow_on_capital_deployed
    }

    /// Reserve capital still available for pro-rata. May read negative
    /// transiently mid-period; callers clamp to >= 0 before passing it to
    /// `Company::promote`.
    #[must_use]
    pub fn remaining_follow_on_capital(&self) -> f64 {
        self.follow_on_reserve - self.follow_on_capital_deployed
    }

    /// Multiple on invested capital: portfolio value over total capital
    /// deployed. A firm that never deployed capital has no defined
    /// multiple, surfaced as an explicit error rather than NaN.
    pub fn multiple_on_invested_capital(&self) -> Result<f64, SimulationError> {
        let invested = self.capital_invested();
        if invested <= 0.0 {
            return Err(SimulationError::NoCapitalDeployed);
        }
        Ok(self.portfolio_value() / invested)
    }
}
