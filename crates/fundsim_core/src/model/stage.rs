//! Immutable market configuration: the ordered stage table.
//!
//! The table is validated once at construction and then passed by
//! reference into the engine. It is never a process-wide singleton, which
//! keeps simulations reproducible and parallel-safe.

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::model::ids::StageId;
use crate::model::odds::TransitionOdds;

/// Ordered stage table: names, valuations, dilution fractions, and
/// transition odds, all indexed by [`StageId`] rank.
///
/// The last stage is terminal for promotion: advancing saturates there
/// rather than wrapping or running past the end.
#[derive(Debug, Clone)]
pub struct StageTable {
    stages: Vec<String>,
    valuations: Vec<f64>,
    dilutions: Vec<f64>,
    odds: Vec<TransitionOdds>,
    index: FxHashMap<String, StageId>,
}

impl StageTable {
    /// Build a table from parallel columns, validating lengths, valuation
    /// positivity, dilution ranges, and each odds triple.
    ///
    /// The first stage's dilution is conventionally 0 (a company never
    /// raises into its entry stage); later entries are the dilution taken
    /// when a company raises *into* that stage.
    pub fn from_columns(
        stages: Vec<String>,
        valuations: Vec<f64>,
        dilutions: Vec<f64>,
        odds: Vec<TransitionOdds>,
    ) -> Result<Self, ConfigError> {
        if stages.is_empty() {
            return Err(ConfigError::EmptyStageTable);
        }
        if stages.len() != valuations.len()
            || stages.len() != dilutions.len()
            || stages.len() != odds.len()
        {
            return Err(ConfigError::TableLengthMismatch {
                stages: stages.len(),
                valuations: valuations.len(),
                dilutions: dilutions.len(),
                odds: odds.len(),
            });
        }
        for (stage, valuation) in stages.iter().zip(&valuations) {
            if !valuation.is_finite() || *valuation <= 0.0 {
                return Err(ConfigError::InvalidValuation {
                    stage: stage.clone(),
                    valuation: *valuation,
                });
            }
        }
        for (stage, dilution) in stages.iter().zip(&dilutions) {
            if !dilution.is_finite() || *dilution < 0.0 || *dilution > 1.0 {
                return Err(ConfigError::InvalidDilution {
                    stage: stage.clone(),
                    dilution: *dilution,
                });
            }
        }
        for stage_odds in &odds {
            stage_odds.validate()?;
        }

        let index = stages
            .iter()
            .enumerate()
            .map(|(rank, name)| (name.clone(), StageId(rank)))
            .collect();

        Ok(Self {
            stages,
            valuations,
            dilutions,
            odds,
            index,
        })
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// A validated table always has at least one stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Resolve a stage name to its rank.
    pub fn id(&self, name: &str) -> Result<StageId, ConfigError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::StageNotFound(name.to_string()))
    }

    /// Stage name at a rank.
    #[must_use]
    pub fn name(&self, stage: StageId) -> &str {
        &self.stages[stage.0]
    }

    /// Market valuation at a stage. A lookup, not a trajectory: promotion
    /// resets a company's valuation to this value.
    #[must_use]
    pub fn valuation(&self, stage: StageId) -> f64 {
        self.valuations[stage.0]
    }

    /// Dilution fraction taken when raising into a stage.
    #[must_use]
    pub fn dilution(&self, stage: StageId) -> f64 {
        self.dilutions[stage.0]
    }

    /// Transition odds for a company currently at a stage.
    #[must_use]
    pub fn odds(&self, stage: StageId) -> TransitionOdds {
        self.odds[stage.0]
    }

    /// The terminal stage.
    #[must_use]
    pub fn last(&self) -> StageId {
        StageId(self.stages.len() - 1)
    }

    /// Whether a stage is the terminal one.
    #[must_use]
    pub fn is_final(&self, stage: StageId) -> bool {
        stage.0 + 1 >= self.stages.len()
    }

    /// The next stage in order, saturating at the terminal stage.
    #[must_use]
    pub fn next_stage(&self, stage: StageId) -> StageId {
        StageId((stage.0 + 1).min(self.stages.len() - 1))
    }

    /// Periods a company entering at the first stage needs to reach the
    /// terminal stage.
    #[must_use]
    pub fn periods_to_final(&self) -> u32 {
        (self.stages.len() - 1) as u32
    }

    /// The default eight-stage market model (Pre-seed through Series F)
    /// with its transition odds, valuations, and dilution schedule.
    #[must_use]
    pub fn default_market() -> Self {
        let stages = [
            "Pre-seed", "Seed", "Series A", "Series B", "Series C", "Series D", "Series E",
            "Series F",
        ]
        .map(String::from)
        .to_vec();
        let valuations = vec![15.0, 30.0, 70.0, 200.0, 500.0, 750.0, 1500.0, 10000.0];
        let dilutions = vec![0.0, 0.20, 0.22, 0.20, 0.15, 0.10, 0.08, 0.08];
        // (advance, fail, acquire) per stage
        let odds = vec![
            TransitionOdds {
                advance: 0.40,
                fail: 0.50,
                acquire: 0.10,
            },
            TransitionOdds {
                advance: 0.35,
                fail: 0.45,
                acquire: 0.20,
            },
            TransitionOdds {
                advance: 0.60,
                fail: 0.25,
                acquire: 0.15,
            },
            TransitionOdds {
                advance: 0.50,
                fail: 0.25,
                acquire: 0.25,
            },
            TransitionOdds {
                advance: 0.40,
                fail: 0.35,
                acquire: 0.25,
            },
            TransitionOdds {
                advance: 0.40,
                fail: 0.25,
                acquire: 0.35,
            },
            TransitionOdds {
                advance: 0.40,
                fail: 0.25,
                acquire: 0.35,
            },
            TransitionOdds {
                advance: 0.20,
                fail: 0.20,
                acquire: 0.60,
            },
        ];

        let index = stages
            .iter()
            .enumerate()
            .map(|(rank, name)| (name.clone(), StageId(rank)))
            .collect();
        Self {
            stages,
            valuations,
            dilutions,
            odds,
            index,
        }
    }
}
