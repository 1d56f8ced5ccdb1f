#![warn(missing_docs)]
//! Core models and ports for the bundle auction service.
//!
//! A clearing run consumes one consistent snapshot of resources and bids,
//! selects the welfare-maximizing feasible set of bids, derives per-resource
//! cleared prices, and reports each winner's payment. This crate defines the
//! data carried through that pipeline and the traits the storage adapter
//! implements; the algorithm itself lives in `bas-solver`.

/// Core domain models for the auction system.
///
/// These are primarily data structures with minimal business logic, kept
/// separate from their persistence and processing implementations.
pub mod models;

/// Interface traits for the auction system.
///
/// These traits define the contract between the clearing logic and external
/// adapters (the SQLite store, or anything else that can produce a snapshot
/// and execute the write-back) without specifying implementation details.
pub mod ports;
