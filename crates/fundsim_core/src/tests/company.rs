//! Tests for the company state machine:
//! - promotion arithmetic (dilution, pro-rata clamps, valuation reset)
//! - saturation at the terminal stage
//! - terminal states (fail, acquire) and aging in place

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::two_stage_table;
use crate::model::{Company, CompanyState, ExitDistribution, StageId, StageTable};

fn company_at_a(table: &StageTable) -> Company {
    // 5 into a valuation of 10 -> 50% ownership
    Company::funded("a-0".to_string(), StageId(0), table, 5.0)
}

#[test]
fn test_promote_full_pro_rata_defends_ownership() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);

    let consumed = company.promote(&table, 100.0, 100.0);

    // Raising into B: valuation resets to 20, 25% dilution drops 0.5 to
    // 0.375, and fully offsetting that costs (0.5 - 0.375) * 20 = 2.5.
    assert_eq!(company.stage, StageId(1));
    assert_eq!(company.valuation, 20.0);
    assert!((consumed - 2.5).abs() < 1e-12);
    assert!((company.ownership - 0.5).abs() < 1e-12);
    assert!((company.invested_capital - 7.5).abs() < 1e-12);
    assert_eq!(company.age, 1);
}

#[test]
fn test_promote_pro_rata_clamped_by_reserve() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);

    let consumed = company.promote(&table, 1.0, 100.0);

    assert!((consumed - 1.0).abs() < 1e-12);
    // Post-dilution 0.375 plus 1.0 / 20 bought back
    assert!((company.ownership - 0.425).abs() < 1e-12);
}

#[test]
fn test_promote_negative_reserve_invests_nothing() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);

    let consumed = company.promote(&table, -3.0, 100.0);

    assert_eq!(consumed, 0.0);
    assert!((company.ownership - 0.375).abs() < 1e-12);
    assert!((company.invested_capital - 5.0).abs() < 1e-12);
}

#[test]
fn test_promote_above_valuation_ceiling_skips_pro_rata() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);

    // New valuation is 20, ceiling is 15: the firm sits the round out
    let consumed = company.promote(&table, 100.0, 15.0);

    assert_eq!(consumed, 0.0);
    assert!((company.ownership - 0.375).abs() < 1e-12);
}

#[test]
fn test_promote_saturates_at_final_stage() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);
    company.promote(&table, 0.0, 0.0);
    assert_eq!(company.stage_index(), 1);

    // Repeated promotion at the terminal stage leaves the index alone
    // but still applies that stage's dilution
    let ownership_before = company.ownership;
    company.promote(&table, 0.0, 0.0);
    assert_eq!(company.stage_index(), 1);
    assert_eq!(company.valuation, 20.0);
    assert!((company.ownership - ownership_before * 0.75).abs() < 1e-12);
}

#[test]
fn test_ownership_stays_in_unit_interval() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);
    for _ in 0..20 {
        company.promote(&table, 50.0, 100.0);
        assert!(company.ownership >= 0.0);
        assert!(company.ownership <= 1.0);
    }
}

#[test]
fn test_fail_zeroes_valuation_permanently() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);

    company.fail();
    assert_eq!(company.state, CompanyState::Failed);
    assert_eq!(company.valuation, 0.0);
    assert_eq!(company.firm_value(), 0.0);
    // Ownership and invested capital remain a historical record
    assert!((company.ownership - 0.5).abs() < 1e-12);
    assert!((company.invested_capital - 5.0).abs() < 1e-12);

    company.age_in_place();
    company.age_in_place();
    assert_eq!(company.valuation, 0.0);
    assert_eq!(company.age, 3);
}

#[test]
fn test_acquire_applies_exactly_one_multiplier() {
    let table = two_stage_table();
    let exit = ExitDistribution::acquisition();
    let mut rng = SmallRng::seed_from_u64(5);

    for _ in 0..100 {
        let mut company = company_at_a(&table);
        company.acquire(&exit, &mut rng);

        assert_eq!(company.state, CompanyState::Acquired);
        let ratio = company.valuation / 10.0;
        assert!(
            [10.0, 5.0, 1.0, 0.5].contains(&ratio),
            "unexpected shock {ratio}"
        );

        // Later periods only age the position; the shock is one-shot
        let valuation = company.valuation;
        company.age_in_place();
        assert_eq!(company.valuation, valuation);
        assert_eq!(company.age, 2);
    }
}

#[test]
fn test_age_matches_elapsed_periods_across_transitions() {
    let table = two_stage_table();
    let mut company = company_at_a(&table);

    company.promote(&table, 0.0, 0.0); // period 1
    company.fail(); // period 2
    company.age_in_place(); // period 3
    company.age_in_place(); // period 4

    assert_eq!(company.age, 4);
}
