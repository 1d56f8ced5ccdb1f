use bas_core::models::{BidId, ResourceId};

/// The ways a clearing run can fail.
///
/// Empty bid sets and empty resource ledgers are not errors; they clear to
/// an empty allocation with zero welfare. The pipeline is otherwise pure
/// and deterministic, so there is no transient-failure or retry concept.
#[derive(Debug, thiserror::Error)]
pub enum ClearingError {
    /// A bid's bundle references a resource that is not in the snapshot.
    ///
    /// The store rejects such bids at acceptance time, so hitting this
    /// means the snapshot and bid set are inconsistent.
    #[error("bid {bid} references unknown resource {resource}")]
    UnknownResource {
        /// The offending bid
        bid: BidId,
        /// The dangling resource reference
        resource: ResourceId,
    },
}
