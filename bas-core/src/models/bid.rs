use super::{BidId, ResourceId};

/// A sealed bundle bid: one price for one unit of every resource listed.
///
/// Bids are immutable once submitted; the only mutation a clearing run may
/// perform is removing a winning bid outright. The bundle must be non-empty
/// and every id in it must reference an existing resource, which the store
/// validates at acceptance time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bid {
    /// The store-assigned id for this bid
    pub id: BidId,
    /// The name of the customer who submitted the bid
    pub customer: String,
    /// The all-or-nothing price offered for the whole bundle
    pub price: f64,
    /// The resources demanded, one unit each, in submission order
    pub bundle: Vec<ResourceId>,
}
