//! Ports for the injected stores.
//!
//! The detection core depends on two external collaborators: a rule store
//! and a match store. Both are one-shot async reads per detection pass; the
//! core has no retry logic and leaves backoff to the calling orchestrator.
//!
//! # Implementation Notes
//!
//! - Implementations must be thread-safe (`Send + Sync`); the batch
//!   evaluator holds them behind `Arc<dyn ...>` across spawned tasks.
//! - Store unavailability is the only failure that propagates to callers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ConditionalRule, MatchRecord};
use crate::error::Result;

/// Storage operations for conditional rules.
///
/// The detection core only ever calls [`RuleStore::get_rules`]; the
/// mutation endpoints exist for the admin surface that owns rule editing.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All persisted rules, enabled or not, in definition order.
    async fn get_rules(&self) -> Result<Vec<ConditionalRule>>;

    /// Insert or replace a rule by id. Returns true if a rule was replaced.
    async fn save_rule(&self, rule: &ConditionalRule) -> Result<bool>;

    /// Delete a rule by id. Returns true if the rule existed.
    async fn delete_rule(&self, id: &Uuid) -> Result<bool>;
}

/// Read access to match records with their odds.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// All matches available for evaluation.
    async fn list_matches(&self) -> Result<Vec<MatchRecord>>;

    /// A single match by id.
    async fn get_match(&self, id: &str) -> Result<Option<MatchRecord>>;
}
