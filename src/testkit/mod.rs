//! Test support: in-memory stores and fixture builders.
//!
//! Compiled for unit tests and for integration tests via the `testkit`
//! feature; never part of a release build.

pub mod fixtures;
pub mod stores;

pub use stores::{StaticMatchStore, StaticRuleStore};
