//! In-memory store implementations for tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::domain::{ConditionalRule, MatchRecord};
use crate::error::{Error, Result, StoreError};
use crate::port::{MatchStore, RuleStore};

/// Rule store over a fixed in-memory list; counts `get_rules` calls so
/// tests can assert the batch path fetches rules once.
#[derive(Default)]
pub struct StaticRuleStore {
    rules: RwLock<Vec<ConditionalRule>>,
    fetches: AtomicUsize,
    fail: bool,
}

impl StaticRuleStore {
    #[must_use]
    pub fn new(rules: Vec<ConditionalRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
            fetches: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A store whose reads always fail, for unavailability tests.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            fail: true,
        }
    }

    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn unavailable() -> Error {
        Error::Store(StoreError::Read {
            path: "static".into(),
            source: std::io::Error::other("store unavailable"),
        })
    }
}

#[async_trait]
impl RuleStore for StaticRuleStore {
    async fn get_rules(&self) -> Result<Vec<ConditionalRule>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        Ok(self.rules.read().clone())
    }

    async fn save_rule(&self, rule: &ConditionalRule) -> Result<bool> {
        let mut rules = self.rules.write();
        if let Some(existing) = rules.iter_mut().find(|r| r.id == rule.id) {
            *existing = rule.clone();
            Ok(true)
        } else {
            rules.push(rule.clone());
            Ok(false)
        }
    }

    async fn delete_rule(&self, id: &Uuid) -> Result<bool> {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| r.id != *id);
        Ok(rules.len() != before)
    }
}

/// Match store over a fixed in-memory list.
#[derive(Default)]
pub struct StaticMatchStore {
    matches: Vec<MatchRecord>,
}

impl StaticMatchStore {
    #[must_use]
    pub fn new(matches: Vec<MatchRecord>) -> Self {
        Self { matches }
    }
}

#[async_trait]
impl MatchStore for StaticMatchStore {
    async fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.matches.clone())
    }

    async fn get_match(&self, id: &str) -> Result<Option<MatchRecord>> {
        Ok(self.matches.iter().find(|m| m.id == id).cloned())
    }
}
