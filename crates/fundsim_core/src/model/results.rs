//! Simulation results and outcome statistics
//!
//! Contains the output types from a Monte Carlo run: the raw per-firm
//! outcome set, the percentile table, the fixed-width return histogram,
//! and the run overview.

use serde::{Deserialize, Serialize};

use crate::config::{CapitalPlan, PlannedInvestment};
use crate::model::firm::Firm;

/// Bin width of the multiple-on-invested-capital histogram.
pub const HISTOGRAM_BIN_WIDTH: f64 = 0.25;

/// Upper bound of the histogram. Outcomes at or above this are excluded
/// from all bins.
pub const HISTOGRAM_UPPER_BOUND: f64 = 15.0;

/// Percentile table over the outcome set.
///
/// Monotonically non-decreasing: `p25 <= p50 <= p75 <= p90 <= p95` for
/// any outcome set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileTable {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
}

impl PercentileTable {
    /// Compute the standard percentile set. Returns `None` for an empty
    /// outcome set.
    #[must_use]
    pub fn from_outcomes(outcomes: &[f64]) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }
        let mut sorted = outcomes.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            p25: percentile_sorted(&sorted, 25.0),
            p50: percentile_sorted(&sorted, 50.0),
            p75: percentile_sorted(&sorted, 75.0),
            p90: percentile_sorted(&sorted, 90.0),
            p95: percentile_sorted(&sorted, 95.0),
        })
    }
}

/// Linear-interpolation percentile over an already-sorted, non-empty
/// slice. `p` is in [0, 100].
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = rank - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}

/// Median of an outcome set: the central value, or the mean of the two
/// central values when the count is even. `None` for an empty set.
#[must_use]
pub fn median(outcomes: &[f64]) -> Option<f64> {
    if outcomes.is_empty() {
        return None;
    }
    let mut sorted = outcomes.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Fixed-width histogram over the outcome set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bin_width: f64,
    pub upper_bound: f64,
    /// Count per bin; bin `i` covers `[i * bin_width, (i+1) * bin_width)`
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the outcomes. Values at or above `upper_bound` (and any
    /// negative values) are excluded from all bins.
    #[must_use]
    pub fn from_outcomes(outcomes: &[f64], bin_width: f64, upper_bound: f64) -> Self {
        let num_bins = (upper_bound / bin_width).ceil() as usize;
        let mut counts = vec![0usize; num_bins];
        for value in outcomes {
            if *value < 0.0 || *value >= upper_bound {
                continue;
            }
            let bin = (value / bin_width) as usize;
            if bin < counts.len() {
                counts[bin] += 1;
            }
        }
        Self {
            bin_width,
            upper_bound,
            counts,
        }
    }

    /// Display label for a bin, e.g. `"0.25-0.50"`.
    #[must_use]
    pub fn label(&self, bin: usize) -> String {
        let lower = bin as f64 * self.bin_width;
        format!("{:.2}-{:.2}", lower, lower + self.bin_width)
    }

    /// Total count across all bins: the number of outcomes strictly below
    /// the upper bound.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Summary overview of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOverview {
    pub num_scenarios: usize,
    pub fund_size: f64,
    pub investments: Vec<PlannedInvestment>,
    pub follow_on_reserve: f64,
    /// `None` when the outcome set is empty
    pub median_mom: Option<f64>,
}

/// Results from a Monte Carlo run: every simulated firm plus its
/// multiple-on-invested-capital outcome, in simulation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloResult {
    plan: CapitalPlan,
    firms: Vec<Firm>,
    outcomes: Vec<f64>,
}

impl MonteCarloResult {
    pub(crate) fn new(plan: CapitalPlan, firms: Vec<Firm>, outcomes: Vec<f64>) -> Self {
        Self {
            plan,
            firms,
            outcomes,
        }
    }

    /// Raw per-scenario multiple-on-invested-capital outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    /// The simulated firms, in scenario order.
    #[must_use]
    pub fn firms(&self) -> &[Firm] {
        &self.firms
    }

    /// The plan the run was configured with.
    #[must_use]
    pub fn plan(&self) -> &CapitalPlan {
        &self.plan
    }

    /// Raw end-of-life portfolio values per scenario, in currency units.
    #[must_use]
    pub fn portfolio_values(&self) -> Vec<f64> {
        self.firms.iter().map(Firm::portfolio_value).collect()
    }

    /// Standard percentile table over the outcomes.
    #[must_use]
    pub fn percentiles(&self) -> Option<PercentileTable> {
        PercentileTable::from_outcomes(&self.outcomes)
    }

    /// Fixed-width histogram of the outcomes: 0.25-wide bins from 0 up
    /// to 15, outcomes at or above 15 excluded.
    #[must_use]
    pub fn histogram(&self) -> Histogram {
        Histogram::from_outcomes(&self.outcomes, HISTOGRAM_BIN_WIDTH, HISTOGRAM_UPPER_BOUND)
    }

    /// Median outcome.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        median(&self.outcomes)
    }

    /// Summary overview of the run.
    #[must_use]
    pub fn overview(&self) -> RunOverview {
        RunOverview {
            num_scenarios: self.outcomes.len(),
            fund_size: self.plan.fund_size,
            investments: self.plan.investments.clone(),
            follow_on_reserve: self.plan.follow_on_reserve,
            median_mom: self.median(),
        }
    }
}
