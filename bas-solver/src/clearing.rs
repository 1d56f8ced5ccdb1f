use crate::{
    ClearingError,
    payments::bundle_payment,
    prices::adjust_prices,
    winner::{find_best_allocation, sort_bids},
};
use bas_core::{
    models::{ClearingConfig, ClearingOutcome, ClearingSnapshot, Winner},
    ports::Solver,
};

/// The reference solver: exhaustive subset enumeration with the documented
/// deterministic tie-break.
///
/// The pipeline per run is strictly linear: winner determination, price
/// adjustment, payment computation. The solver reads the snapshot and
/// nothing else; applying the outcome is the caller's decision, via
/// [`ClearingOutcome::instructions`](bas_core::models::ClearingOutcome::instructions)
/// and the store's apply.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveSolver;

impl Solver for ExhaustiveSolver {
    type Error = ClearingError;

    fn solve(
        &self,
        snapshot: &ClearingSnapshot,
        config: ClearingConfig,
    ) -> Result<ClearingOutcome, ClearingError> {
        // The store validates bundle references at acceptance time, so a
        // dangling reference here means the snapshot is inconsistent.
        for bid in &snapshot.bids {
            for resource_id in &bid.bundle {
                if !snapshot.resources.contains_key(resource_id) {
                    return Err(ClearingError::UnknownResource {
                        bid: bid.id,
                        resource: *resource_id,
                    });
                }
            }
        }

        tracing::debug!(
            bids = snapshot.bids.len(),
            resources = snapshot.resources.len(),
            "starting clearing run"
        );

        let sorted = sort_bids(&snapshot.bids);
        let (allocation, welfare) = find_best_allocation(&snapshot.resources, &sorted);
        let cleared_prices = adjust_prices(&snapshot.resources, &allocation, config);

        let winners = allocation
            .iter()
            .map(|&bid| Winner {
                payment: bundle_payment(bid, &cleared_prices),
                bid: bid.clone(),
            })
            .collect::<Vec<_>>();

        let rejected = sorted
            .into_iter()
            .filter(|bid| !allocation.iter().any(|winner| winner.id == bid.id))
            .cloned()
            .collect::<Vec<_>>();

        tracing::info!(
            welfare,
            winners = winners.len(),
            rejected = rejected.len(),
            "clearing run complete"
        );

        Ok(ClearingOutcome {
            welfare,
            winners,
            rejected,
            cleared_prices,
        })
    }
}
