//! Detected opportunity type with builder pattern.
//!
//! A [`DetectedOpportunity`] is the ephemeral output of detection: one
//! market/outcome pair a rule licensed as a candidate recommendation,
//! carrying enough provenance to audit why it was produced.

use serde::Serialize;
use thiserror::Error;

use super::market::{Market, Outcome};

/// Error returned when building a `DetectedOpportunity` fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpportunityBuildError {
    #[error("market is required")]
    MissingMarket,
    #[error("outcome is required")]
    MissingOutcome,
    #[error("odds are required")]
    MissingOdds,
    #[error("source rule name is required")]
    MissingSourceRule,
}

/// A rule-licensed candidate recommendation for one match.
///
/// Use [`DetectedOpportunity::builder`] to construct instances. Not
/// persisted by the core; the presentation layer consumes it directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedOpportunity {
    market: Market,
    predicted_outcome: Outcome,
    odds: f64,
    source_rule: String,
    priority: i32,
    inverted: bool,
    matched_conditions: Vec<String>,
}

impl DetectedOpportunity {
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::default()
    }

    #[must_use]
    pub fn market(&self) -> Market {
        self.market
    }

    #[must_use]
    pub fn predicted_outcome(&self) -> Outcome {
        self.predicted_outcome
    }

    #[must_use]
    pub fn odds(&self) -> f64 {
        self.odds
    }

    /// Name of the rule that produced this opportunity.
    #[must_use]
    pub fn source_rule(&self) -> &str {
        &self.source_rule
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether the source rule's action implies a contrarian stance.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Human-readable summaries of the conditions that matched.
    #[must_use]
    pub fn matched_conditions(&self) -> &[String] {
        &self.matched_conditions
    }
}

/// Builder for [`DetectedOpportunity`] instances.
#[derive(Debug, Default)]
pub struct OpportunityBuilder {
    market: Option<Market>,
    predicted_outcome: Option<Outcome>,
    odds: Option<f64>,
    source_rule: Option<String>,
    priority: i32,
    inverted: bool,
    matched_conditions: Vec<String>,
}

impl OpportunityBuilder {
    pub fn market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    pub fn predicted_outcome(mut self, outcome: Outcome) -> Self {
        self.predicted_outcome = Some(outcome);
        self
    }

    pub fn odds(mut self, odds: f64) -> Self {
        self.odds = Some(odds);
        self
    }

    pub fn source_rule(mut self, name: impl Into<String>, priority: i32) -> Self {
        self.source_rule = Some(name.into());
        self.priority = priority;
        self
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn matched_conditions(mut self, summaries: Vec<String>) -> Self {
        self.matched_conditions = summaries;
        self
    }

    /// Build the opportunity.
    ///
    /// # Errors
    ///
    /// Returns `OpportunityBuildError` if any required field is missing.
    pub fn build(self) -> Result<DetectedOpportunity, OpportunityBuildError> {
        Ok(DetectedOpportunity {
            market: self.market.ok_or(OpportunityBuildError::MissingMarket)?,
            predicted_outcome: self
                .predicted_outcome
                .ok_or(OpportunityBuildError::MissingOutcome)?,
            odds: self.odds.ok_or(OpportunityBuildError::MissingOdds)?,
            source_rule: self
                .source_rule
                .ok_or(OpportunityBuildError::MissingSourceRule)?,
            priority: self.priority,
            inverted: self.inverted,
            matched_conditions: self.matched_conditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_creates_opportunity() {
        let opp = DetectedOpportunity::builder()
            .market(Market::OneXTwo)
            .predicted_outcome(Outcome::Home)
            .odds(2.0)
            .source_rule("value home", 5)
            .matched_conditions(vec!["prob_home > 0.5".into()])
            .build()
            .unwrap();

        assert_eq!(opp.market(), Market::OneXTwo);
        assert_eq!(opp.predicted_outcome(), Outcome::Home);
        assert_eq!(opp.odds(), 2.0);
        assert_eq!(opp.source_rule(), "value home");
        assert_eq!(opp.priority(), 5);
        assert!(!opp.is_inverted());
        assert_eq!(opp.matched_conditions(), ["prob_home > 0.5"]);
    }

    #[test]
    fn builder_fails_without_market() {
        let result = DetectedOpportunity::builder()
            .predicted_outcome(Outcome::Home)
            .odds(2.0)
            .source_rule("r", 1)
            .build();
        assert_eq!(result.unwrap_err(), OpportunityBuildError::MissingMarket);
    }

    #[test]
    fn builder_fails_without_odds() {
        let result = DetectedOpportunity::builder()
            .market(Market::Btts)
            .predicted_outcome(Outcome::Yes)
            .source_rule("r", 1)
            .build();
        assert_eq!(result.unwrap_err(), OpportunityBuildError::MissingOdds);
    }

    #[test]
    fn builder_fails_without_source_rule() {
        let result = DetectedOpportunity::builder()
            .market(Market::Btts)
            .predicted_outcome(Outcome::Yes)
            .odds(1.8)
            .build();
        assert_eq!(
            result.unwrap_err(),
            OpportunityBuildError::MissingSourceRule
        );
    }
}
