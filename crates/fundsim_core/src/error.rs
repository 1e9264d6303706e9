use std::fmt;

/// Errors detected while building or validating configuration.
///
/// Every variant signals a malformed capital plan or market table and is
/// raised before any simulation work begins. A run is never started from
/// defaulted or partially-valid configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Entry-stage allocation fractions do not sum to 1
    SplitNotUnity { sum: f64 },
    /// Primary plus follow-on capital does not equal the fund size
    AllocationMismatch {
        primary: f64,
        follow_on: f64,
        fund_size: f64,
    },
    /// Builder self-check failed: per-stage allocations plus the revised
    /// reserve do not reproduce the fund size
    AllocationLeak { allocated: f64, fund_size: f64 },
    /// A stage name has no entry in the stage table
    StageNotFound(String),
    /// Stage table has no stages
    EmptyStageTable,
    /// Stage table columns have inconsistent lengths
    TableLengthMismatch {
        stages: usize,
        valuations: usize,
        dilutions: usize,
        odds: usize,
    },
    /// A probability distribution does not sum to 1 or has an entry
    /// outside [0, 1]
    InvalidDistribution {
        context: &'static str,
        sum: f64,
    },
    /// A stage valuation is zero, negative, or non-finite
    InvalidValuation { stage: String, valuation: f64 },
    /// A dilution fraction is outside [0, 1]
    InvalidDilution { stage: String, dilution: f64 },
    /// A per-company unit investment size is zero or negative
    InvalidUnitSize { stage: String, unit: f64 },
    /// Not enough periods for a company to reach the final stage
    InsufficientPeriods { periods: u32, required: u32 },
    /// A run was requested with zero scenarios
    NoScenarios,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SplitNotUnity { sum } => {
                write!(f, "entry-stage fractions sum to {sum}, expected 1")
            }
            ConfigError::AllocationMismatch {
                primary,
                follow_on,
                fund_size,
            } => write!(
                f,
                "primary ({primary}) + follow-on ({follow_on}) does not equal fund size ({fund_size})"
            ),
            ConfigError::AllocationLeak {
                allocated,
                fund_size,
            } => write!(
                f,
                "allocated capital ({allocated}) does not reproduce fund size ({fund_size})"
            ),
            ConfigError::StageNotFound(name) => write!(f, "stage {name:?} not found"),
            ConfigError::EmptyStageTable => write!(f, "stage table has no stages"),
            ConfigError::TableLengthMismatch {
                stages,
                valuations,
                dilutions,
                odds,
            } => write!(
                f,
                "stage table columns disagree: {stages} stages, {valuations} valuations, {dilutions} dilutions, {odds} odds"
            ),
            ConfigError::InvalidDistribution { context, sum } => {
                write!(f, "{context} probabilities sum to {sum}, expected 1")
            }
            ConfigError::InvalidValuation { stage, valuation } => {
                write!(f, "stage {stage:?} has invalid valuation {valuation}")
            }
            ConfigError::InvalidDilution { stage, dilution } => {
                write!(f, "stage {stage:?} has dilution {dilution} outside [0, 1]")
            }
            ConfigError::InvalidUnitSize { stage, unit } => {
                write!(f, "stage {stage:?} has non-positive unit size {unit}")
            }
            ConfigError::InsufficientPeriods { periods, required } => write!(
                f,
                "{periods} periods cannot reach the final stage ({required} required)"
            ),
            ConfigError::NoScenarios => write!(f, "at least one scenario is required"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while a simulation is running or being aggregated.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Return multiple requested for a firm that never deployed capital
    NoCapitalDeployed,
    /// Configuration error surfaced during pre-run validation
    Config(ConfigError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NoCapitalDeployed => {
                write!(f, "no capital deployed, return multiple is undefined")
            }
            SimulationError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::NoCapitalDeployed => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}
