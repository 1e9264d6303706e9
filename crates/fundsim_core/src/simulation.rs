//! The Monte Carlo engine: one firm lifecycle per scenario.
//!
//! Scenarios are statistically independent: each firm gets its own
//! seeded RNG stream, so a run produces identical results sequentially
//! or in parallel for the same base seed.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, trace};

use crate::config::CapitalPlan;
use crate::error::{ConfigError, SimulationError};
use crate::model::{
    Company, CompanyState, ExitDistribution, Firm, MonteCarloResult, StageTable, TransitionOutcome,
};

/// Apply one period to one company. Alive companies below the final
/// stage take a three-way random transition; everything else only ages.
/// Returns the pro-rata capital consumed by a promotion.
fn advance_company<R: Rng + ?Sized>(
    company: &mut Company,
    table: &StageTable,
    exit: &ExitDistribution,
    available_secondary: f64,
    pro_rata_ceiling: f64,
    rng: &mut R,
) -> f64 {
    // Alive companies already at the final stage are frozen for
    // transition purposes: only their age advances.
    if company.state == CompanyState::Alive && !table.is_final(company.stage) {
        match table.odds(company.stage).draw(rng) {
            TransitionOutcome::Acquire => {
                company.acquire(exit, rng);
                0.0
            }
            TransitionOutcome::Fail => {
                company.fail();
                0.0
            }
            TransitionOutcome::Advance => {
                company.promote(table, available_secondary, pro_rata_ceiling)
            }
        }
    } else {
        company.age_in_place();
        0.0
    }
}

/// If the follow-on reserve was not fully consumed, deploy the remainder
/// as whole-unit primary investments at the first planned entry stage,
/// then age that extra batch through a full lifespan with no pro-rata
/// capital available.
fn sweep_reserve<R: Rng + ?Sized>(
    firm: &mut Firm,
    plan: &CapitalPlan,
    table: &StageTable,
    exit: &ExitDistribution,
    rng: &mut R,
) {
    let remaining = firm.remaining_follow_on_capital();
    if remaining <= 0.0 {
        return;
    }
    let Some(entry) = plan.investments.first() else {
        return;
    };
    let count = (remaining / entry.per_company).floor() as usize;
    if count == 0 {
        return;
    }
    trace!(remaining, count, "deploying unused reserve as extra investments");

    let mut extras = Vec::with_capacity(count);
    for sequence in 0..count {
        extras.push(Company::funded(
            format!("extra-{sequence}"),
            entry.stage,
            table,
            entry.per_company,
        ));
        firm.primary_capital_deployed += entry.per_company;
        firm.follow_on_reserve -= entry.per_company;
    }

    for _period in 0..plan.lifespan_periods {
        for company in &mut extras {
            // No secondary capital for the extra batch
            advance_company(company, table, exit, 0.0, plan.pro_rata_ceiling, rng);
        }
    }
    firm.portfolio.extend(extras);
}

/// Simulate one firm lifecycle from portfolio initialization through the
/// end-of-life reserve sweep.
#[must_use]
pub fn simulate_firm(plan: &CapitalPlan, table: &StageTable, seed: u64) -> Firm {
    let mut rng = SmallRng::seed_from_u64(seed);
    let exit = ExitDistribution::acquisition();

    let mut firm = Firm::new(format!("firm-{seed:016x}"), plan);
    firm.initialize_portfolio(table);

    for _period in 0..plan.lifespan_periods {
        for i in 0..firm.portfolio.len() {
            let available = firm.remaining_follow_on_capital().max(0.0);
            let consumed = advance_company(
                &mut firm.portfolio[i],
                table,
                &exit,
                available,
                plan.pro_rata_ceiling,
                &mut rng,
            );
            firm.follow_on_capital_deployed += consumed;
        }
    }

    sweep_reserve(&mut firm, plan, table, &exit, &mut rng);
    firm
}

/// Checks run before any simulation work begins. A malformed plan aborts
/// the run with a descriptive reason instead of proceeding with
/// defaulted values.
fn validate_run(
    plan: &CapitalPlan,
    table: &StageTable,
    num_scenarios: usize,
) -> Result<(), ConfigError> {
    if num_scenarios == 0 {
        return Err(ConfigError::NoScenarios);
    }
    let accounted = plan.total_allocated() + plan.follow_on_reserve;
    if (accounted - plan.fund_size).abs() > 1e-6 * plan.fund_size.max(1.0) {
        return Err(ConfigError::AllocationLeak {
            allocated: accounted,
            fund_size: plan.fund_size,
        });
    }
    if plan.lifespan_periods < table.periods_to_final() {
        return Err(ConfigError::InsufficientPeriods {
            periods: plan.lifespan_periods,
            required: table.periods_to_final(),
        });
    }
    Ok(())
}

/// Run `num_scenarios` independent firm lifecycles and aggregate their
/// multiple-on-invested-capital outcomes.
///
/// Firms are simulated in batches; each batch derives per-firm sub-seeds
/// from its own `SmallRng`, so the outcome set for a given base seed is
/// identical whether batches run on one thread or many.
pub fn monte_carlo_simulate(
    plan: &CapitalPlan,
    table: &StageTable,
    num_scenarios: usize,
    seed: u64,
) -> Result<MonteCarloResult, SimulationError> {
    validate_run(plan, table, num_scenarios)?;
    debug!(num_scenarios, seed, "starting monte carlo run");

    const MAX_BATCH_SIZE: usize = 100;
    let num_batches = num_scenarios.div_ceil(MAX_BATCH_SIZE);

    let run_batch = |batch: usize| -> Vec<Firm> {
        // Distinct stream per batch, derived from the base seed
        let batch_seed = seed ^ (batch as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = SmallRng::seed_from_u64(batch_seed);

        let batch_size = if batch == num_batches - 1 {
            num_scenarios - batch * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };

        (0..batch_size)
            .map(|_| {
                let firm_seed = rng.next_u64();
                simulate_firm(plan, table, firm_seed)
            })
            .collect::<Vec<_>>()
    };

    #[cfg(feature = "parallel")]
    let firms: Vec<Firm> = (0..num_batches).into_par_iter().flat_map(run_batch).collect();
    #[cfg(not(feature = "parallel"))]
    let firms: Vec<Firm> = (0..num_batches).flat_map(run_batch).collect();

    let outcomes = firms
        .iter()
        .map(Firm::multiple_on_invested_capital)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        outcomes = outcomes.len(),
        "monte carlo run complete"
    );
    Ok(MonteCarloResult::new(plan.clone(), firms, outcomes))
}
