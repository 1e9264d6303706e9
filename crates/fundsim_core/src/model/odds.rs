//! Weighted-choice abstractions for the random branches of the lifecycle.
//!
//! Both the per-period transition draw and the one-shot acquisition shock
//! are categorical draws over distributions verified to sum to 1 at
//! construction. The final branch is always the `else` remainder so that
//! floating-point drift in the cumulative thresholds can never leave a
//! draw unmatched.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tolerance for verifying that probabilities sum to 1
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Outcome of a single per-period transition draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Company is acquired this period
    Acquire,
    /// Company fails this period
    Fail,
    /// Company advances to the next stage
    Advance,
}

/// Per-stage transition probabilities: advance to the next round, fail,
/// or get acquired. The three must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionOdds {
    pub advance: f64,
    pub fail: f64,
    pub acquire: f64,
}

impl TransitionOdds {
    /// Create validated transition odds.
    pub fn new(advance: f64, fail: f64, acquire: f64) -> Result<Self, ConfigError> {
        let odds = Self {
            advance,
            fail,
            acquire,
        };
        odds.validate()?;
        Ok(odds)
    }

    /// Check that each probability is in [0, 1] and the triple sums to 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = [self.advance, self.fail, self.acquire];
        let sum: f64 = entries.iter().sum();
        if entries.iter().any(|p| !p.is_finite() || *p < 0.0 || *p > 1.0)
            || (sum - 1.0).abs() > PROBABILITY_TOLERANCE
        {
            return Err(ConfigError::InvalidDistribution {
                context: "stage transition",
                sum,
            });
        }
        Ok(())
    }

    /// Draw one outcome from a uniform roll in [0, 1).
    ///
    /// The contract is: acquisition is checked first, then failure, and
    /// advancement is the remaining branch.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> TransitionOutcome {
        let roll = rng.random::<f64>();
        if roll < self.acquire {
            TransitionOutcome::Acquire
        } else if roll < self.acquire + self.fail {
            TransitionOutcome::Fail
        } else {
            TransitionOutcome::Advance
        }
    }
}

/// Categorical distribution over valuation multipliers applied at the
/// moment of acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitDistribution {
    /// (multiplier, probability) pairs checked in order; the last entry
    /// is the `else` branch of the draw
    entries: Vec<(f64, f64)>,
}

impl ExitDistribution {
    /// Create a validated exit distribution.
    pub fn new(entries: Vec<(f64, f64)>) -> Result<Self, ConfigError> {
        let sum: f64 = entries.iter().map(|(_, p)| p).sum();
        if entries.is_empty()
            || entries
                .iter()
                .any(|(m, p)| !m.is_finite() || *m < 0.0 || !p.is_finite() || *p < 0.0 || *p > 1.0)
            || (sum - 1.0).abs() > PROBABILITY_TOLERANCE
        {
            return Err(ConfigError::InvalidDistribution {
                context: "acquisition exit",
                sum,
            });
        }
        Ok(Self { entries })
    }

    /// The M&A outcome model: 10x with 1%, 5x with 2%, 1x with 27%,
    /// 0.5x with 70%.
    #[must_use]
    pub fn acquisition() -> Self {
        Self {
            entries: vec![(10.0, 0.01), (5.0, 0.02), (1.0, 0.27), (0.5, 0.70)],
        }
    }

    /// Draw one multiplier using cumulative thresholds in entry order.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let roll = rng.random::<f64>();
        let mut cumulative = 0.0;
        for (multiplier, probability) in &self.entries[..self.entries.len() - 1] {
            cumulative += probability;
            if roll < cumulative {
                return *multiplier;
            }
        }
        // Remainder branch, immune to cumulative-threshold drift
        self.entries[self.entries.len() - 1].0
    }

    /// Multipliers in draw order.
    #[must_use]
    pub fn multipliers(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(m, _)| *m)
    }
}
