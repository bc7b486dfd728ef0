//! TOML-file rule store.
//!
//! Rules are kept as `[[rule]]` tables in a single TOML file. Reads go
//! through a cache so a batch pass touches the file once; mutations rewrite
//! the file and invalidate the cache.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ConditionalRule;
use crate::error::{Result, StoreError};
use crate::port::RuleStore;

#[derive(Debug, Default, Serialize)]
struct RuleFile {
    #[serde(rename = "rule")]
    rules: Vec<ConditionalRule>,
}

/// Rule store backed by a TOML file.
pub struct FileRuleStore {
    path: PathBuf,
    cache: RwLock<Option<Vec<ConditionalRule>>>,
}

impl FileRuleStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ConditionalRule>> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
                path: self.path.display().to_string(),
                source,
            })?;
        let file: toml::Value = toml::from_str(&content).map_err(|source| StoreError::ParseRules {
            path: self.path.display().to_string(),
            source,
        })?;

        // Rules are deserialized one table at a time: a single broken rule,
        // whether unparseable (unknown operator, bad uuid) or structurally
        // invalid, must not take down the others.
        let tables = match file.get("rule") {
            Some(toml::Value::Array(tables)) => tables.as_slice(),
            _ => &[],
        };
        let mut rules = Vec::with_capacity(tables.len());
        for table in tables {
            let rule: ConditionalRule = match table.clone().try_into() {
                Ok(rule) => rule,
                Err(e) => {
                    warn!(error = %e, "skipping unparseable rule");
                    continue;
                }
            };
            match rule.validate() {
                Ok(()) => rules.push(rule),
                Err(e) => warn!(rule = %rule.name, error = %e, "skipping invalid rule"),
            }
        }
        Ok(rules)
    }

    fn persist(&self, rules: &[ConditionalRule]) -> Result<()> {
        let file = RuleFile {
            rules: rules.to_vec(),
        };
        let content = toml::to_string_pretty(&file).map_err(StoreError::SerializeRules)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        *self.cache.write() = Some(rules.to_vec());
        Ok(())
    }
}

#[async_trait]
impl RuleStore for FileRuleStore {
    async fn get_rules(&self) -> Result<Vec<ConditionalRule>> {
        if let Some(cached) = self.cache.read().as_ref() {
            return Ok(cached.clone());
        }
        let rules = self.load()?;
        *self.cache.write() = Some(rules.clone());
        Ok(rules)
    }

    async fn save_rule(&self, rule: &ConditionalRule) -> Result<bool> {
        let mut rules = self.get_rules().await?;
        let replaced = if let Some(existing) = rules.iter_mut().find(|r| r.id == rule.id) {
            *existing = rule.clone();
            true
        } else {
            rules.push(rule.clone());
            false
        };
        self.persist(&rules)?;
        Ok(replaced)
    }

    async fn delete_rule(&self, id: &Uuid) -> Result<bool> {
        let mut rules = self.get_rules().await?;
        let before = rules.len();
        rules.retain(|r| r.id != *id);
        let existed = rules.len() != before;
        if existed {
            self.persist(&rules)?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, ContextField, Market, Operator, RuleAction};
    use std::io::Write as _;

    const RULES_TOML: &str = r#"
[[rule]]
id = "4f9f0e2e-8f3b-4d26-9b87-01b39a2f8f10"
name = "high vig double chance"
market = "1x2"
action = "recommend_double_chance_least_probable"
priority = 5

[[rule.conditions]]
field = "vig_1x2"
operator = ">="
value = 0.07

[[rule]]
id = "b3a5d9c0-1234-4cde-8af0-aaaaaaaaaaaa"
name = "broken rule"
market = "btts"
action = "recommend_yes"
priority = 1
conditions = []
"#;

    fn store_with(content: &str) -> (tempfile::NamedTempFile, FileRuleStore) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let store = FileRuleStore::new(file.path());
        (file, store)
    }

    #[tokio::test]
    async fn loads_rules_and_skips_invalid_ones() {
        let (_file, store) = store_with(RULES_TOML);
        let rules = store.get_rules().await.unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name, "high vig double chance");
        assert_eq!(rules[0].market, Market::OneXTwo);
        assert_eq!(
            rules[0].action,
            RuleAction::RecommendDoubleChanceLeastProbable
        );
        assert_eq!(rules[0].conditions[0].field, ContextField::Vig1x2);
    }

    #[tokio::test]
    async fn unparseable_rule_does_not_fail_the_store_read() {
        // An operator outside the closed vocabulary fails that rule's
        // deserialization; the rest of the file still loads.
        let (_file, store) = store_with(
            r#"
[[rule]]
id = "4f9f0e2e-8f3b-4d26-9b87-01b39a2f8f10"
name = "good rule"
market = "1x2"
action = "recommend_most_probable"
priority = 3

[[rule.conditions]]
field = "vig_1x2"
operator = ">="
value = 0.05

[[rule]]
id = "b3a5d9c0-1234-4cde-8af0-bbbbbbbbbbbb"
name = "typo rule"
market = "1x2"
action = "recommend_most_probable"
priority = 9

[[rule.conditions]]
field = "vig_1x2"
operator = "~="
value = 0.05
"#,
        );

        let rules = store.get_rules().await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name, "good rule");
    }

    #[tokio::test]
    async fn missing_file_is_a_store_error() {
        let store = FileRuleStore::new("/nonexistent/rules.toml");
        assert!(store.get_rules().await.is_err());
    }

    #[tokio::test]
    async fn save_and_delete_round_trip() {
        let (_file, store) = store_with("");
        assert!(store.get_rules().await.unwrap().is_empty());

        let rule = ConditionalRule {
            id: Uuid::new_v4(),
            name: "new rule".into(),
            market: Market::Btts,
            conditions: vec![Condition {
                field: ContextField::ProbBttsYes,
                operator: Operator::GreaterThan,
                value: 0.6,
                value_max: None,
            }],
            connectors: vec![],
            action: RuleAction::RecommendYes,
            priority: 2,
            enabled: true,
        };

        assert!(!store.save_rule(&rule).await.unwrap());
        assert_eq!(store.get_rules().await.unwrap().len(), 1);

        // Saving again replaces.
        assert!(store.save_rule(&rule).await.unwrap());
        assert_eq!(store.get_rules().await.unwrap().len(), 1);

        assert!(store.delete_rule(&rule.id).await.unwrap());
        assert!(!store.delete_rule(&rule.id).await.unwrap());
        assert!(store.get_rules().await.unwrap().is_empty());
    }
}
