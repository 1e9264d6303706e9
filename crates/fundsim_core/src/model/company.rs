//! A single investment position and its lifecycle state machine.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::ids::StageId;
use crate::model::odds::ExitDistribution;
use crate::model::stage::StageTable;

/// Lifecycle state of a portfolio company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyState {
    Alive,
    Failed,
    Acquired,
}

/// One portfolio company, owned exclusively by its firm.
///
/// Invariants the operations below maintain:
/// - `ownership` stays in [0, 1]
/// - `valuation` is non-negative
/// - `age` increases by exactly one per elapsed period, in every state
/// - once the state leaves `Alive` the position is frozen, apart from the
///   single multiplicative shock applied at the moment of acquisition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub stage: StageId,
    pub valuation: f64,
    pub state: CompanyState,
    /// Cumulative capital the firm has put into this company
    pub invested_capital: f64,
    /// Fraction of the company the firm holds
    pub ownership: f64,
    /// Periods elapsed since creation
    pub age: u32,
}

impl Company {
    /// Create a company funded with one primary investment at a stage.
    /// Initial ownership is the investment over the stage valuation.
    #[must_use]
    pub fn funded(name: String, stage: StageId, table: &StageTable, investment: f64) -> Self {
        Self {
            name,
            stage,
            valuation: table.valuation(stage),
            state: CompanyState::Alive,
            invested_capital: investment,
            ownership: investment / table.valuation(stage),
            age: 0,
        }
    }

    /// Advance to the next stage, taking dilution and optionally defending
    /// ownership with pro-rata capital. Returns the pro-rata amount
    /// consumed so the firm can debit its reserve.
    ///
    /// The stage advance saturates at the terminal stage. Valuation is
    /// reset to the new stage's table valuation, not compounded from the
    /// prior value. Pro-rata is injected only while the new valuation is
    /// at or below `pro_rata_ceiling`, bounded by `available_secondary`
    /// and by the dollar cost of fully offsetting the dilution.
    pub fn promote(
        &mut self,
        table: &StageTable,
        available_secondary: f64,
        pro_rata_ceiling: f64,
    ) -> f64 {
        debug_assert_eq!(self.state, CompanyState::Alive);

        self.age += 1;
        self.stage = table.next_stage(self.stage);
        self.valuation = table.valuation(self.stage);

        let dilution = table.dilution(self.stage);
        let post_dilution_ownership = self.ownership * (1.0 - dilution);

        // Guard against a negative reserve reading turning into a
        // negative investment
        let mut pro_rata_investment = 0.0;
        if self.valuation <= pro_rata_ceiling && available_secondary > 0.0 {
            let full_defense = (self.ownership - post_dilution_ownership) * self.valuation;
            pro_rata_investment = full_defense.min(available_secondary);
        }
        self.invested_capital += pro_rata_investment;
        self.ownership = post_dilution_ownership + pro_rata_investment / self.valuation;

        pro_rata_investment
    }

    /// Fail this period: valuation drops to zero, ownership and invested
    /// capital stay as a historical record.
    pub fn fail(&mut self) {
        debug_assert_eq!(self.state, CompanyState::Alive);
        self.age += 1;
        self.state = CompanyState::Failed;
        self.valuation = 0.0;
    }

    /// Get acquired this period. A single multiplier drawn from `exit`
    /// shocks the valuation; the state is terminal afterwards so the
    /// shock is never re-rolled.
    pub fn acquire<R: Rng + ?Sized>(&mut self, exit: &ExitDistribution, rng: &mut R) {
        debug_assert_eq!(self.state, CompanyState::Alive);
        self.age += 1;
        self.state = CompanyState::Acquired;
        self.valuation *= exit.draw(rng);
    }

    /// Record one elapsed period without any other change. Called for
    /// companies that do not take a transition this period, so that age
    /// always equals periods elapsed since creation.
    pub fn age_in_place(&mut self) {
        self.age += 1;
    }

    /// Zero-based rank of the current stage.
    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage.0
    }

    /// This position's contribution to firm value.
    #[must_use]
    pub fn firm_value(&self) -> f64 {
        match self.state {
            CompanyState::Alive | CompanyState::Acquired => self.valuation * self.ownership,
            CompanyState::Failed => 0.0,
        }
    }
}
