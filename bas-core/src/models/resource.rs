use super::{ProviderId, ResourceId};

/// A finite-capacity resource offered by a provider.
///
/// Capacity is the number of units still available; it is decremented by one
/// for every (winning bid, bundled resource) pair when a clearing run is
/// applied. The base price is fixed for the duration of a run; the cleared
/// price derived from it is transient and reported on the
/// [`ClearingOutcome`](super::ClearingOutcome), never written back.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resource {
    /// The store-assigned id for this resource
    pub id: ResourceId,
    /// The provider offering this resource
    pub provider_id: ProviderId,
    /// Human-readable name, used only for display
    pub name: String,
    /// Units currently available. Never negative.
    pub capacity: u32,
    /// The posted price per unit before any clearing adjustment
    pub base_price: f64,
}
