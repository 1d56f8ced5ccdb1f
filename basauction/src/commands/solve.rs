use crate::IOArgs;
use bas_core::{
    models::{ClearingConfig, ClearingSnapshot},
    ports::Solver as _,
};
use bas_solver::ExhaustiveSolver;

/// Clear a snapshot supplied as JSON and emit the outcome as JSON.
///
/// This is the non-interactive, storage-free entry point: nothing is
/// mutated, so the caller can inspect the outcome before deciding whether
/// to apply anything anywhere.
pub(crate) fn run(io: &IOArgs, config: ClearingConfig) -> anyhow::Result<()> {
    let input = io.read()?;
    let snapshot: ClearingSnapshot = serde_json::from_reader(input)?;

    let outcome = ExhaustiveSolver.solve(&snapshot, config)?;

    let output = io.write()?;
    serde_json::to_writer_pretty(output, &outcome)?;

    Ok(())
}
