//! The reference clearing algorithm for the bundle auction service.
//!
//! One clearing run is a strictly linear pipeline: winner determination,
//! then price adjustment, then payment computation. The pipeline is pure
//! and synchronous; the caller owns the snapshot and decides what to do
//! with the resulting [`bas_core::models::ClearingOutcome`].

mod clearing;
pub use clearing::ExhaustiveSolver;

mod error;
pub use error::ClearingError;

mod payments;
mod prices;
mod winner;

// We use non-std collections here for their ordering semantics: the
// deterministic tie-break depends on iteration order being reproducible.
pub(crate) type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
