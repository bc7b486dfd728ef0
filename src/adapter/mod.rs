//! File-backed store implementations.

pub mod matches;
pub mod rules;

pub use matches::FileMatchStore;
pub use rules::FileRuleStore;
