use approx::assert_relative_eq;
use bas_core::{
    models::{
        Bid, BidId, ClearingConfig, ClearingSnapshot, Map, PricingPolicy, ProviderId, Resource,
        ResourceId,
    },
    ports::Solver as _,
};
use bas_solver::{ClearingError, ExhaustiveSolver};
use rstest::*;

fn resource(id: i64, capacity: u32, base_price: f64) -> (ResourceId, Resource) {
    (
        ResourceId(id),
        Resource {
            id: ResourceId(id),
            provider_id: ProviderId(1),
            name: format!("resource-{id}"),
            capacity,
            base_price,
        },
    )
}

fn bid(id: i64, customer: &str, price: f64, bundle: &[i64]) -> Bid {
    Bid {
        id: BidId(id),
        customer: customer.to_owned(),
        price,
        bundle: bundle.iter().map(|&r| ResourceId(r)).collect(),
    }
}

fn snapshot(resources: Vec<(ResourceId, Resource)>, bids: Vec<Bid>) -> ClearingSnapshot {
    ClearingSnapshot {
        resources: resources.into_iter().collect::<Map<_, _>>(),
        bids,
    }
}

fn winner_ids(outcome: &bas_core::models::ClearingOutcome) -> Vec<i64> {
    outcome.winners.iter().map(|w| w.bid.id.0).collect()
}

#[fixture]
fn decay() -> ClearingConfig {
    ClearingConfig::new(PricingPolicy::Decay)
}

#[fixture]
fn hold() -> ClearingConfig {
    ClearingConfig::new(PricingPolicy::Hold)
}

// Scenario A: one unit of one resource, two competing single bids. The
// higher bid wins, demand exactly fills supply, so both policies leave the
// cleared price at base.
#[rstest]
fn higher_bid_wins_contested_resource(hold: ClearingConfig) {
    let snapshot = snapshot(
        vec![resource(1, 1, 10.0)],
        vec![bid(1, "alice", 20.0, &[1]), bid(2, "bob", 15.0, &[1])],
    );

    let outcome = ExhaustiveSolver.solve(&snapshot, hold).unwrap();

    assert_eq!(winner_ids(&outcome), vec![1]);
    assert_relative_eq!(outcome.welfare, 20.0);
    assert_relative_eq!(outcome.cleared_prices[&ResourceId(1)], 10.0);
    assert_relative_eq!(outcome.winners[0].payment, 10.0);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].id, BidId(2));
}

// Scenario B: a single high bundle bid beats two smaller non-conflicting
// bids when its welfare is strictly greater.
#[rstest]
fn bundle_bid_beats_pair_on_welfare(decay: ClearingConfig) {
    let snapshot = snapshot(
        vec![resource(1, 1, 10.0), resource(2, 1, 10.0)],
        vec![
            bid(1, "alice", 30.0, &[1, 2]),
            bid(2, "bob", 12.0, &[1]),
            bid(3, "carol", 12.0, &[2]),
        ],
    );

    let outcome = ExhaustiveSolver.solve(&snapshot, decay).unwrap();

    assert_eq!(winner_ids(&outcome), vec![1]);
    assert_relative_eq!(outcome.welfare, 30.0);
}

// Scenario C: an empty bid set clears to nothing, and the implied
// write-back is empty as well.
#[rstest]
fn empty_bid_set_clears_to_nothing(decay: ClearingConfig) {
    let snapshot = snapshot(vec![resource(1, 3, 10.0)], vec![]);

    let outcome = ExhaustiveSolver.solve(&snapshot, decay).unwrap();

    assert!(outcome.winners.is_empty());
    assert!(outcome.rejected.is_empty());
    assert_relative_eq!(outcome.welfare, 0.0);
    assert!(outcome.instructions().is_empty());
}

#[rstest]
fn empty_snapshot_is_degenerate_not_an_error(decay: ClearingConfig) {
    let snapshot = snapshot(vec![], vec![]);
    let outcome = ExhaustiveSolver.solve(&snapshot, decay).unwrap();
    assert_relative_eq!(outcome.welfare, 0.0);
    assert!(outcome.cleared_prices.is_empty());
}

// Scenario D: two equal-price bids contest one unit. The tie-break prefers
// the bid that comes first in snapshot order, because the stable sort keeps
// it earlier and equal welfare never displaces an incumbent.
#[rstest]
fn tie_between_equal_bids_prefers_earlier(hold: ClearingConfig) {
    let snapshot = snapshot(
        vec![resource(1, 1, 10.0)],
        vec![bid(7, "bob", 15.0, &[1]), bid(3, "alice", 15.0, &[1])],
    );

    let outcome = ExhaustiveSolver.solve(&snapshot, hold).unwrap();

    assert_eq!(winner_ids(&outcome), vec![7]);
    assert_relative_eq!(outcome.welfare, 15.0);
}

// Rerunning the solver on an unchanged snapshot yields an identical outcome.
#[rstest]
fn repeated_solves_are_identical(decay: ClearingConfig) {
    let snapshot = snapshot(
        vec![
            resource(1, 2, 10.0),
            resource(2, 1, 8.0),
            resource(3, 1, 12.0),
        ],
        vec![
            bid(1, "alice", 25.0, &[1, 2]),
            bid(2, "bob", 25.0, &[2, 3]),
            bid(3, "carol", 9.0, &[1]),
            bid(4, "dave", 14.0, &[3]),
        ],
    );

    let first = ExhaustiveSolver.solve(&snapshot, decay).unwrap();
    let second = ExhaustiveSolver.solve(&snapshot, decay).unwrap();
    assert_eq!(first, second);
}

// For every resource, the number of winners bundling it stays within
// capacity, and the reported welfare is the sum of winning prices.
#[rstest]
fn allocation_is_feasible_and_welfare_consistent(decay: ClearingConfig) {
    let snapshot = snapshot(
        vec![
            resource(1, 2, 10.0),
            resource(2, 1, 5.0),
            resource(3, 3, 7.5),
        ],
        vec![
            bid(1, "alice", 18.0, &[1, 2]),
            bid(2, "bob", 11.0, &[1, 3]),
            bid(3, "carol", 16.0, &[2, 3]),
            bid(4, "dave", 6.0, &[3]),
            bid(5, "erin", 13.0, &[1]),
        ],
    );

    let outcome = ExhaustiveSolver.solve(&snapshot, decay).unwrap();

    let mut usage = std::collections::HashMap::new();
    for winner in &outcome.winners {
        for resource_id in &winner.bid.bundle {
            *usage.entry(*resource_id).or_insert(0u32) += 1;
        }
    }
    for (id, resource) in outcome
        .winners
        .iter()
        .flat_map(|w| w.bid.bundle.iter())
        .map(|id| (id, &snapshot.resources[id]))
    {
        assert!(usage[id] <= resource.capacity, "resource {id} over-allocated");
    }

    let total: f64 = outcome.winners.iter().map(|w| w.bid.price).sum();
    assert_relative_eq!(outcome.welfare, total);
}

// The pair {bob, carol} at 12 + 12 beats the single 20 bundle bid here,
// checking the solver is not simply greedy by price.
#[rstest]
fn pair_beats_single_when_welfare_is_higher(hold: ClearingConfig) {
    let snapshot = snapshot(
        vec![resource(1, 1, 10.0), resource(2, 1, 10.0)],
        vec![
            bid(1, "alice", 20.0, &[1, 2]),
            bid(2, "bob", 12.0, &[1]),
            bid(3, "carol", 12.0, &[2]),
        ],
    );

    let outcome = ExhaustiveSolver.solve(&snapshot, hold).unwrap();

    assert_eq!(winner_ids(&outcome), vec![2, 3]);
    assert_relative_eq!(outcome.welfare, 24.0);
    assert_eq!(outcome.rejected[0].id, BidId(1));
}

// Payments are the bundle sum of cleared prices, which under excess demand
// can exceed the winner's own bid. The mechanism does not promise
// individual rationality, and the solver must not "correct" this.
#[rstest]
fn payment_follows_cleared_prices_not_bid_price(decay: ClearingConfig) {
    let snapshot = snapshot(
        vec![resource(1, 1, 10.0), resource(2, 2, 20.0)],
        vec![bid(1, "alice", 50.0, &[1, 2])],
    );

    let outcome = ExhaustiveSolver.solve(&snapshot, decay).unwrap();

    // demand 1 of capacity 1 on R1: price holds at 10; demand 1 of
    // capacity 2 on R2: one unit of surplus decays 20 to 18.
    assert_relative_eq!(outcome.cleared_prices[&ResourceId(1)], 10.0);
    assert_relative_eq!(outcome.cleared_prices[&ResourceId(2)], 18.0);
    assert_relative_eq!(outcome.winners[0].payment, 28.0);
}

// The implied write-back decrements one unit per (winner, bundled resource)
// pair and names exactly the winning bids for removal.
#[rstest]
fn instructions_cover_exactly_the_winners(hold: ClearingConfig) {
    let snapshot = snapshot(
        vec![resource(1, 2, 10.0), resource(2, 1, 10.0)],
        vec![
            bid(1, "alice", 20.0, &[1, 2]),
            bid(2, "bob", 15.0, &[1]),
            bid(3, "carol", 40.0, &[2]), // loses to nothing, but conflicts with alice
        ],
    );

    let outcome = ExhaustiveSolver.solve(&snapshot, hold).unwrap();
    let instructions = outcome.instructions();

    // carol (40) + bob (15) beats any allocation containing alice
    assert_eq!(winner_ids(&outcome), vec![3, 2]);
    assert_eq!(instructions.decrements[&ResourceId(1)], 1);
    assert_eq!(instructions.decrements[&ResourceId(2)], 1);
    assert_eq!(instructions.remove_bids, vec![BidId(3), BidId(2)]);
}

#[rstest]
fn dangling_bundle_reference_is_an_error(decay: ClearingConfig) {
    let snapshot = snapshot(
        vec![resource(1, 1, 10.0)],
        vec![bid(1, "alice", 20.0, &[1, 99])],
    );

    let err = ExhaustiveSolver.solve(&snapshot, decay).unwrap_err();
    match err {
        ClearingError::UnknownResource { bid, resource } => {
            assert_eq!(bid, BidId(1));
            assert_eq!(resource, ResourceId(99));
        }
    }
}

// A zero-capacity resource with no demand has zero surplus, so even the
// decay policy leaves it at base.
#[rstest]
fn zero_capacity_resource_holds_base_with_no_demand(decay: ClearingConfig) {
    let snapshot = snapshot(vec![resource(1, 0, 10.0)], vec![]);
    let outcome = ExhaustiveSolver.solve(&snapshot, decay).unwrap();
    assert_relative_eq!(outcome.cleared_prices[&ResourceId(1)], 10.0);
}
