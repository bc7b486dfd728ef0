//! JSON-file match store.
//!
//! Matches are a JSON array of match records. The file is re-read on every
//! listing so a refreshed odds dump is picked up without restarting.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::MatchRecord;
use crate::error::{Result, StoreError};
use crate::port::MatchStore;

/// Match store backed by a JSON file.
pub struct FileMatchStore {
    path: PathBuf,
}

impl FileMatchStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<MatchRecord>> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
                path: self.path.display().to_string(),
                source,
            })?;
        let matches =
            serde_json::from_str(&content).map_err(|source| StoreError::ParseMatches {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(matches)
    }
}

#[async_trait]
impl MatchStore for FileMatchStore {
    async fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        self.load()
    }

    async fn get_match(&self, id: &str) -> Result<Option<MatchRecord>> {
        Ok(self.load()?.into_iter().find(|m| m.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Market;
    use std::io::Write as _;

    const MATCHES_JSON: &str = r#"[
        {
            "id": "m1",
            "home_team": "Home FC",
            "away_team": "Away FC",
            "odds": {
                "1x2": [1.40, 4.50, 7.00],
                "btts": [1.80, null]
            }
        }
    ]"#;

    fn store_with(content: &str) -> (tempfile::NamedTempFile, FileMatchStore) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let store = FileMatchStore::new(file.path());
        (file, store)
    }

    #[tokio::test]
    async fn lists_matches_with_partial_markets() {
        let (_file, store) = store_with(MATCHES_JSON);
        let matches = store.list_matches().await.unwrap();

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert!(m.market_odds(Market::OneXTwo).is_some());
        // One null slot: BTTS is treated as absent.
        assert!(m.market_odds(Market::Btts).is_none());
    }

    #[tokio::test]
    async fn get_match_by_id() {
        let (_file, store) = store_with(MATCHES_JSON);
        assert!(store.get_match("m1").await.unwrap().is_some());
        assert!(store.get_match("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_a_store_error() {
        let (_file, store) = store_with("{not json");
        assert!(store.list_matches().await.is_err());
    }
}
