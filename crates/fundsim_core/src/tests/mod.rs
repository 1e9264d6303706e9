//! Integration tests for the fund simulation engine
//!
//! Tests are organized by topic:
//! - `odds` - Weighted-choice draws and distribution validation
//! - `company` - Company state machine: promote, fail, acquire, aging
//! - `firm` - Portfolio initialization, value, and capital accounting
//! - `builder` - Capital-plan builder validation and remainder folding
//! - `simulation` - Full firm lifecycles and Monte Carlo runs
//! - `results` - Percentiles, histogram, and median

mod builder;
mod company;

use crate::model::{StageTable, TransitionOdds};

/// Two-stage table used by the state-machine tests: investing at "A"
/// (valuation 10) and raising into "B" (valuation 20, 25% dilution).
pub(crate) fn two_stage_table() -> StageTable {
    StageTable::from_columns(
        vec!["A".to_string(), "B".to_string()],
        vec![10.0, 20.0],
        vec![0.0, 0.25],
        vec![
            TransitionOdds {
                advance: 0.5,
                fail: 0.3,
                acquire: 0.2,
            },
            TransitionOdds {
                advance: 0.4,
                fail: 0.3,
                acquire: 0.3,
            },
        ],
    )
    .unwrap()
}
