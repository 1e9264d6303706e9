//! Tests for capital-plan builder validation:
//! - split and fund-size exactness checks
//! - floor-division unit counts and remainder folding
//! - the allocation self-check invariant

use crate::config::PlanBuilder;
use crate::error::ConfigError;
use crate::model::{StageId, StageTable};

fn default_builder() -> PlanBuilder {
    PlanBuilder::new()
        .entry_stage("Pre-seed", 0.3, 1.5)
        .entry_stage("Seed", 0.7, 4.0)
        .primary_capital(180.0)
        .follow_on_capital(20.0)
        .fund_size(200.0)
        .pro_rata_at_or_below("Series A")
}

#[test]
fn test_build_folds_remainders_into_reserve() {
    let table = StageTable::default_market();
    let plan = default_builder().build(&table).unwrap();

    // Pre-seed share 54 fits 36 x 1.5 exactly; seed share 126 fits
    // 31 x 4 = 124 with a remainder of 2 folded into the reserve
    assert_eq!(plan.investments.len(), 2);
    assert_eq!(plan.investments[0].stage, StageId(0));
    assert!((plan.investments[0].total_allocation - 54.0).abs() < 1e-9);
    assert_eq!(plan.investments[1].stage, StageId(1));
    assert!((plan.investments[1].total_allocation - 124.0).abs() < 1e-9);
    assert!((plan.follow_on_reserve - 22.0).abs() < 1e-9);

    // Pro-rata ceiling resolved through the valuation table
    assert_eq!(plan.pro_rata_ceiling, 70.0);
    assert_eq!(plan.lifespan_periods, 7);
}

#[test]
fn test_build_rejects_split_not_summing_to_one() {
    let table = StageTable::default_market();
    let err = PlanBuilder::new()
        .entry_stage("Pre-seed", 0.3, 1.5)
        .entry_stage("Seed", 0.6, 4.0)
        .primary_capital(180.0)
        .follow_on_capital(20.0)
        .fund_size(200.0)
        .build(&table)
        .unwrap_err();
    assert!(matches!(err, ConfigError::SplitNotUnity { .. }));
}

#[test]
fn test_build_rejects_primary_follow_on_fund_mismatch() {
    let table = StageTable::default_market();
    let err = default_builder().fund_size(210.0).build(&table).unwrap_err();
    assert!(matches!(err, ConfigError::AllocationMismatch { .. }));
}

#[test]
fn test_build_rejects_unknown_stage_names() {
    let table = StageTable::default_market();
    let err = PlanBuilder::new()
        .entry_stage("Series Z", 1.0, 4.0)
        .primary_capital(180.0)
        .follow_on_capital(20.0)
        .fund_size(200.0)
        .build(&table)
        .unwrap_err();
    assert_eq!(err, ConfigError::StageNotFound("Series Z".to_string()));

    let err = default_builder()
        .pro_rata_at_or_below("Series Z")
        .build(&table)
        .unwrap_err();
    assert_eq!(err, ConfigError::StageNotFound("Series Z".to_string()));
}

#[test]
fn test_build_rejects_non_positive_unit_sizes() {
    let table = StageTable::default_market();
    let err = PlanBuilder::new()
        .entry_stage("Seed", 1.0, 0.0)
        .primary_capital(180.0)
        .follow_on_capital(20.0)
        .fund_size(200.0)
        .build(&table)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUnitSize { .. }));
}

#[test]
fn test_zero_fraction_entry_stage_is_skipped() {
    let table = StageTable::default_market();
    let plan = PlanBuilder::new()
        .entry_stage("Pre-seed", 0.0, 1.5)
        .entry_stage("Seed", 1.0, 4.0)
        .primary_capital(180.0)
        .follow_on_capital(20.0)
        .fund_size(200.0)
        .build(&table)
        .unwrap();

    assert_eq!(plan.investments.len(), 1);
    assert_eq!(plan.investments[0].stage, StageId(1));
    assert!((plan.investments[0].total_allocation - 180.0).abs() < 1e-9);
}

#[test]
fn test_allocations_plus_reserve_always_reproduce_fund_size() {
    let table = StageTable::default_market();
    let splits = [(1.0, 0.0), (0.8, 0.2), (0.55, 0.45), (0.3, 0.7), (0.0, 1.0)];
    let reserves = [0.0, 20.0, 50.0];

    for (pre_seed, seed) in splits {
        for follow_on in reserves {
            let plan = PlanBuilder::new()
                .entry_stage("Pre-seed", pre_seed, 1.5)
                .entry_stage("Seed", seed, 4.0)
                .primary_capital(200.0 - follow_on)
                .follow_on_capital(follow_on)
                .fund_size(200.0)
                .build(&table)
                .unwrap();

            let accounted = plan.total_allocated() + plan.follow_on_reserve;
            assert!(
                (accounted - 200.0).abs() < 1e-6,
                "leak for split {pre_seed}/{seed}, reserve {follow_on}: {accounted}"
            );
        }
    }
}
