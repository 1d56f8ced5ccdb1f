use crate::render;
use bas_core::{
    models::{ClearingConfig, DEFAULT_ALPHA, PricingPolicy},
    ports::{ClearingRepository as _, Solver as _},
};
use bas_solver::ExhaustiveSolver;
use bas_sqlite::Database;
use clap::{Args, ValueEnum};

// Both legacy price-update rules are in circulation; the caller has to pick
// one explicitly rather than us choosing silently.
#[derive(Clone, Copy, ValueEnum)]
pub enum Pricing {
    /// Surplus decays the price geometrically
    Decay,
    /// Surplus leaves the price at base
    Hold,
}

#[derive(Args)]
pub struct PricingArgs {
    /// How cleared prices behave when demand does not exceed supply
    #[arg(long, value_enum, default_value = "decay")]
    pricing: Pricing,

    /// The price adjustment factor
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,
}

impl PricingArgs {
    pub(crate) fn config(&self) -> ClearingConfig {
        ClearingConfig {
            alpha: self.alpha,
            pricing: match self.pricing {
                Pricing::Decay => PricingPolicy::Decay,
                Pricing::Hold => PricingPolicy::Hold,
            },
        }
    }
}

/// One full clearing run: snapshot, solve, report, apply.
///
/// The `purge` flag replaces the legacy interactive confirmation; decide it
/// before invoking, the run does not prompt.
pub(crate) fn run(db: &Database, config: ClearingConfig, purge: bool) -> anyhow::Result<()> {
    let snapshot = db.snapshot()?;
    let outcome = ExhaustiveSolver.solve(&snapshot, config)?;

    print!("{}", render::outcome_report(&outcome, &snapshot.resources));

    db.apply(&outcome.instructions(), purge)?;
    if purge && !outcome.winners.is_empty() {
        println!("winning bids removed from the bid list");
    }

    Ok(())
}
