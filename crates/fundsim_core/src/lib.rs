//! Venture fund simulation library
//!
//! This crate provides a Monte Carlo simulation engine for modeling the
//! outcome distribution of a venture-capital fund. It supports:
//! - A staged company lifecycle (promote / fail / acquire) driven by
//!   per-stage transition probabilities
//! - Dilution and pro-rata follow-on arithmetic per portfolio company
//! - Capital-plan validation with whole-unit allocation and reserve
//!   remainder folding
//! - Aggregation across scenarios: percentiles, a fixed-width return
//!   histogram, and a run overview
//!
//! # Builder DSL
//!
//! Use the fluent builder API to derive a validated capital plan:
//!
//! ```ignore
//! use fundsim_core::config::PlanBuilder;
//! use fundsim_core::model::StageTable;
//! use fundsim_core::simulation::monte_carlo_simulate;
//!
//! let table = StageTable::default_market();
//! let plan = PlanBuilder::new()
//!     .entry_stage("Pre-seed", 0.3, 1.5)
//!     .entry_stage("Seed", 0.7, 4.0)
//!     .primary_capital(180.0)
//!     .follow_on_capital(20.0)
//!     .fund_size(200.0)
//!     .pro_rata_at_or_below("Series A")
//!     .build(&table)?;
//!
//! let result = monte_carlo_simulate(&plan, &table, 1000, 42)?;
//! println!("median MoM: {:?}", result.median());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{CapitalPlan, PlanBuilder, PlannedInvestment};
pub use error::{ConfigError, SimulationError};
pub use model::{MonteCarloResult, StageTable};
pub use simulation::{monte_carlo_simulate, simulate_firm};
