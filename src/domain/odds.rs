//! Odds de-margining.
//!
//! Converts a market's decimal odds into implied probabilities, extracts the
//! bookmaker margin (vigorish), and rescales so fair probabilities sum to 1.

use serde::{Deserialize, Serialize};

use super::market::{Market, Outcome};
use crate::error::OddsError;

/// Decimal odds for one market's mutually exclusive outcomes.
///
/// Odds are aligned with [`Market::outcomes`] order and validated to be
/// strictly above 1.0 at construction, so the normalizer never divides by
/// zero. A market with missing or degenerate odds is simply never
/// constructed; callers treat it as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOdds {
    market: Market,
    odds: Vec<f64>,
}

impl MarketOdds {
    /// Validate and wrap a full set of decimal odds for `market`.
    ///
    /// # Errors
    ///
    /// Fails when the outcome count does not match the market or any odds
    /// value is not strictly greater than 1.0.
    pub fn new(market: Market, odds: Vec<f64>) -> Result<Self, OddsError> {
        let expected = market.outcomes().len();
        if odds.len() != expected {
            return Err(OddsError::OutcomeCount {
                market: market.as_str(),
                expected,
                got: odds.len(),
            });
        }
        for &o in &odds {
            if !(o > 1.0) {
                return Err(OddsError::NotAboveOne(o));
            }
        }
        Ok(Self { market, odds })
    }

    #[must_use]
    pub fn market(&self) -> Market {
        self.market
    }

    #[must_use]
    pub fn odds(&self) -> &[f64] {
        &self.odds
    }

    /// Odds for a single outcome of this market.
    ///
    /// Double-chance outcomes combine their two legs harmonically:
    /// `1 / (1/odds_a + 1/odds_b)`.
    #[must_use]
    pub fn odds_for(&self, outcome: Outcome) -> Option<f64> {
        if let Outcome::DoubleChance(dc) = outcome {
            if self.market != Market::OneXTwo {
                return None;
            }
            let (a, b) = dc.legs();
            let oa = self.single(a)?;
            let ob = self.single(b)?;
            return Some(1.0 / (1.0 / oa + 1.0 / ob));
        }
        self.single(outcome)
    }

    fn single(&self, outcome: Outcome) -> Option<f64> {
        let idx = self
            .market
            .outcomes()
            .iter()
            .position(|&o| o == outcome)?;
        Some(self.odds[idx])
    }
}

/// A de-margined market: fair outcome probabilities plus the vigorish.
///
/// `vig` is the sum of implied probabilities minus one. It can legitimately
/// be negative when a bookmaker has mispriced the market; downstream rules
/// treat that as a premium signal, so it is preserved, never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairMarket {
    market: Market,
    probs: Vec<f64>,
    vig: f64,
}

impl FairMarket {
    /// Wrap fair values computed upstream.
    ///
    /// The core never recomputes over these; a store that already carries
    /// fair probabilities is trusted as-is.
    #[must_use]
    pub fn new(market: Market, probs: Vec<f64>, vig: f64) -> Self {
        Self { market, probs, vig }
    }

    /// De-margin a full odds set.
    ///
    /// `implied[i] = 1/odds[i]`, `vig = Σ implied − 1`, and each fair
    /// probability is `implied[i] / Σ implied`, so the result sums to 1
    /// within floating-point tolerance.
    #[must_use]
    pub fn from_odds(odds: &MarketOdds) -> Self {
        let implied: Vec<f64> = odds.odds().iter().map(|o| 1.0 / o).collect();
        let total: f64 = implied.iter().sum();
        let probs = implied.iter().map(|p| p / total).collect();
        Self {
            market: odds.market(),
            probs,
            vig: total - 1.0,
        }
    }

    #[must_use]
    pub fn market(&self) -> Market {
        self.market
    }

    #[must_use]
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    #[must_use]
    pub fn vig(&self) -> f64 {
        self.vig
    }

    /// Fair probability of a single outcome.
    ///
    /// Double-chance outcomes sum their two legs.
    #[must_use]
    pub fn prob_for(&self, outcome: Outcome) -> Option<f64> {
        if let Outcome::DoubleChance(dc) = outcome {
            if self.market != Market::OneXTwo {
                return None;
            }
            let (a, b) = dc.legs();
            return Some(self.single(a)? + self.single(b)?);
        }
        self.single(outcome)
    }

    /// The most probable outcome; ties keep the earlier outcome in
    /// enumeration order.
    #[must_use]
    pub fn most_probable(&self) -> (Outcome, f64) {
        self.extremum(|candidate, best| candidate > best)
    }

    /// The least probable outcome; ties keep the earlier outcome in
    /// enumeration order.
    #[must_use]
    pub fn least_probable(&self) -> (Outcome, f64) {
        self.extremum(|candidate, best| candidate < best)
    }

    fn extremum(&self, better: impl Fn(f64, f64) -> bool) -> (Outcome, f64) {
        let outcomes = self.market.outcomes();
        let mut best = (outcomes[0], self.probs[0]);
        for (i, &outcome) in outcomes.iter().enumerate().skip(1) {
            if better(self.probs[i], best.1) {
                best = (outcome, self.probs[i]);
            }
        }
        best
    }

    fn single(&self, outcome: Outcome) -> Option<f64> {
        let idx = self
            .market
            .outcomes()
            .iter()
            .position(|&o| o == outcome)?;
        self.probs.get(idx).copied()
    }
}
