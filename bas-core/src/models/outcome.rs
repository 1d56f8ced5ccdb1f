use super::{Bid, BidId, Map, ResourceId};

/// A winning bid together with the payment it owes.
///
/// The payment is the sum of cleared prices over the bundle, not the bid's
/// own price; it can land above or below the submitted price. That is a
/// property of the mechanism, not an error.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Winner {
    /// The accepted bid
    pub bid: Bid,
    /// The sum of cleared prices over the bid's bundle
    pub payment: f64,
}

/// Everything a clearing run produces, in one ephemeral record.
///
/// The outcome is recomputed from scratch every run and handed to the
/// caller, who may render it or feed the derived [`ApplyInstructions`] back
/// to the store. Nothing in it is persisted directly.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClearingOutcome {
    /// Sum of the winning bids' submitted prices
    pub welfare: f64,
    /// The accepted bids with their payments, in allocation order
    pub winners: Vec<Winner>,
    /// The bids left unfilled, in price-sorted order
    pub rejected: Vec<Bid>,
    /// The per-resource price derived from realized demand versus supply
    pub cleared_prices: Map<ResourceId>,
}

impl ClearingOutcome {
    /// The write-back this outcome implies: one capacity decrement per
    /// (winner, bundled resource) pair, and the winning bid ids for the
    /// store to remove if the caller asks for a purge.
    ///
    /// Building the instructions is pure; executing them is the store's
    /// job, exactly once per run.
    pub fn instructions(&self) -> ApplyInstructions {
        let mut decrements = Map::<ResourceId, u32>::default();
        let mut remove_bids = Vec::with_capacity(self.winners.len());

        for winner in &self.winners {
            for resource_id in &winner.bid.bundle {
                *decrements.entry(*resource_id).or_insert(0) += 1;
            }
            remove_bids.push(winner.bid.id);
        }

        ApplyInstructions {
            decrements,
            remove_bids,
        }
    }
}

/// The two idempotent write-back instructions a clearing run issues.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApplyInstructions {
    /// Units to subtract from each touched resource's capacity
    pub decrements: Map<ResourceId, u32>,
    /// The winning bid ids, removed from the store only when purging
    pub remove_bids: Vec<BidId>,
}

impl ApplyInstructions {
    /// True when the run allocated nothing and there is nothing to write back.
    pub fn is_empty(&self) -> bool {
        self.decrements.is_empty() && self.remove_bids.is_empty()
    }
}
