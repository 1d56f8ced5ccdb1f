use super::{Bid, Map, Resource, ResourceId};

/// One consistent view of the resource ledger and the outstanding bids.
///
/// The caller owns the snapshot exclusively for the duration of a run; the
/// clearing pipeline only reads it. Bids are kept in submission order, which
/// is the order ties are broken in when two bids carry the same price.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClearingSnapshot {
    /// The resources available to bid on, keyed by id
    pub resources: Map<ResourceId, Resource>,
    /// The outstanding bids, in submission order
    pub bids: Vec<Bid>,
}
