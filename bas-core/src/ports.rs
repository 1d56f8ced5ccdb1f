use crate::models::{
    ApplyInstructions, Bid, BidId, ClearingConfig, ClearingOutcome, ClearingSnapshot, CustomerId,
    Map, ProviderId, Resource, ResourceId,
};

/// The base trait all repository ports share: a common error type.
pub trait Repository {
    /// Error type for repository failures
    type Error: std::error::Error;
}

/// Repository interface for providers and the resources they offer.
pub trait ResourceRepository: Repository {
    /// Register a new provider and return its assigned id.
    fn add_provider(&self, name: &str) -> Result<ProviderId, Self::Error>;

    /// List all providers, keyed by id.
    fn providers(&self) -> Result<Map<ProviderId, String>, Self::Error>;

    /// Register a new resource for the given provider.
    fn add_resource(
        &self,
        provider_id: ProviderId,
        name: &str,
        capacity: u32,
        base_price: f64,
    ) -> Result<ResourceId, Self::Error>;

    /// Replace a resource's capacity and base price.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the resource existed, `Ok(false)` otherwise.
    fn update_resource(
        &self,
        resource_id: ResourceId,
        capacity: u32,
        base_price: f64,
    ) -> Result<bool, Self::Error>;

    /// List all resources, keyed by id, in creation order.
    fn resources(&self) -> Result<Map<ResourceId, Resource>, Self::Error>;
}

/// Repository interface for customers and their outstanding bids.
pub trait BidRepository: Repository {
    /// Register a new customer and return its assigned id.
    fn add_customer(&self, name: &str) -> Result<CustomerId, Self::Error>;

    /// List all customers, keyed by id.
    fn customers(&self) -> Result<Map<CustomerId, String>, Self::Error>;

    /// Accept a bundle bid.
    ///
    /// Every id in the bundle must reference an existing resource, and the
    /// bundle must be non-empty; this is the acceptance-time validation the
    /// clearing pipeline relies on.
    fn add_bid(
        &self,
        customer: &str,
        price: f64,
        bundle: &[ResourceId],
    ) -> Result<BidId, Self::Error>;

    /// List all outstanding bids in submission order.
    fn bids(&self) -> Result<Vec<Bid>, Self::Error>;

    /// Remove every outstanding bid.
    fn clear_bids(&self) -> Result<(), Self::Error>;

    /// Remove all providers, resources, customers, and bids.
    fn clear_all(&self) -> Result<(), Self::Error>;
}

/// Repository interface for the clearing run itself: the snapshot read and
/// the write-back transaction.
pub trait ClearingRepository: ResourceRepository + BidRepository {
    /// Read one consistent snapshot of resources and outstanding bids.
    fn snapshot(&self) -> Result<ClearingSnapshot, Self::Error>;

    /// Execute a run's write-back in one transaction: decrement capacities,
    /// and remove the winning bids iff `purge` is set.
    ///
    /// Must be invoked exactly once per clearing run; re-invocation
    /// double-decrements. A decrement that would take a capacity negative
    /// is an invariant violation the implementation must reject, not clamp.
    fn apply(&self, instructions: &ApplyInstructions, purge: bool) -> Result<(), Self::Error>;
}

/// Interface for winner-determination solvers.
///
/// A solver consumes a snapshot and produces the full clearing outcome:
/// allocation, welfare, cleared prices, and payments. Implementations may
/// search however they like, provided the observable (allocation, welfare)
/// pair matches the reference enumeration semantics, including its
/// deterministic tie-break.
pub trait Solver {
    /// Error type for solver failures
    type Error: std::error::Error;

    /// Clear the auction described by `snapshot` under `config`.
    fn solve(
        &self,
        snapshot: &ClearingSnapshot,
        config: ClearingConfig,
    ) -> Result<ClearingOutcome, Self::Error>;
}
