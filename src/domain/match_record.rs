//! The match record consumed from the match store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::market::Market;
use super::odds::{FairMarket, MarketOdds};

/// One football match with whatever the bookmaker has priced.
///
/// Odds slots are nullable per outcome; a market with any missing or
/// degenerate odds (≤ 1.0) is treated as absent, not as an error. When the
/// store already carries fair values for a market they are used as-is and
/// never silently recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kickoff: Option<DateTime<Utc>>,
    /// Decimal odds per market, aligned with [`Market::outcomes`] order.
    #[serde(default)]
    pub odds: BTreeMap<Market, Vec<Option<f64>>>,
    /// Fair values computed upstream, keyed by market.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fair: BTreeMap<Market, FairMarket>,
}

impl MatchRecord {
    /// A complete, valid odds set for `market`, or `None` when the market
    /// is unpriced or partially priced.
    #[must_use]
    pub fn market_odds(&self, market: Market) -> Option<MarketOdds> {
        let slots = self.odds.get(&market)?;
        if slots.len() != market.outcomes().len() {
            return None;
        }
        let odds: Option<Vec<f64>> = slots.iter().map(|slot| slot.filter(|&o| o > 1.0)).collect();
        MarketOdds::new(market, odds?).ok()
    }

    /// Fair probabilities for `market`.
    ///
    /// Precomputed values from the store win; otherwise they are derived
    /// from the raw odds when those are complete.
    #[must_use]
    pub fn fair_market(&self, market: Market) -> Option<FairMarket> {
        if let Some(fair) = self.fair.get(&market) {
            return Some(fair.clone());
        }
        self.market_odds(market)
            .map(|odds| FairMarket::from_odds(&odds))
    }

    /// `"Home - Away"` label for logs and display.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.home_team, self.away_team)
    }
}
