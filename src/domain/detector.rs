//! Opportunity detection for a single match.
//!
//! Builds the evaluation context, runs every enabled rule through the
//! engine, and translates each matching rule's action into a concrete
//! outcome for its market. The detector never synthesizes a recommendation
//! out of probability heuristics: no matching rule, no opportunity.

use tracing::{debug, trace};

use super::context::RuleEvaluationContext;
use super::engine::RuleEngine;
use super::market::{DoubleChance, Market, Outcome};
use super::match_record::MatchRecord;
use super::odds::{FairMarket, MarketOdds};
use super::opportunity::DetectedOpportunity;
use super::rule::{ConditionalRule, RuleAction};

/// A market's odds and fair probabilities assembled for one pass.
#[derive(Debug, Clone)]
pub struct MarketView {
    pub odds: MarketOdds,
    pub fair: FairMarket,
}

impl MarketView {
    /// Assemble the view for `market` from a match record, or `None` when
    /// the market is not fully priced.
    #[must_use]
    pub fn from_record(record: &MatchRecord, market: Market) -> Option<Self> {
        let odds = record.market_odds(market)?;
        let fair = record.fair_market(market)?;
        Some(Self { odds, fair })
    }
}

/// A structured prediction descriptor: what to back and at what odds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub outcome: Outcome,
    pub odds: f64,
}

/// Detects rule-licensed opportunities for one match.
pub struct OpportunityDetector;

impl OpportunityDetector {
    /// Run every enabled rule against the match and collect candidate
    /// opportunities.
    ///
    /// Rules whose conditions fail, rules with the explicit
    /// `no_recommendation` action, and rules whose action cannot be
    /// realized on the priced markets (e.g. a direct BTTS action on a 1X2
    /// rule, or an unpriced market) all contribute nothing.
    #[must_use]
    pub fn detect(record: &MatchRecord, rules: &[ConditionalRule]) -> Vec<DetectedOpportunity> {
        let ctx = RuleEvaluationContext::from_record(record);

        let mut opportunities = Vec::new();
        for rule in rules.iter().filter(|r| r.enabled) {
            if rule.validate().is_err() {
                debug!(rule = %rule.name, "skipping structurally invalid rule");
                continue;
            }

            let eval = RuleEngine::evaluate(rule, &ctx);
            if !eval.matched {
                continue;
            }

            if rule.action == RuleAction::NoRecommendation {
                // Matched, but explicitly opted out. Distinguishable from
                // "nothing matched" only here in the logs.
                debug!(rule = %rule.name, match_id = %record.id, "rule matched with no_recommendation");
                continue;
            }

            let Some(view) = MarketView::from_record(record, rule.market) else {
                trace!(rule = %rule.name, market = %rule.market, "market not priced, skipping");
                continue;
            };

            let Some(prediction) = Self::predict(rule.action, &view) else {
                trace!(rule = %rule.name, "action not realizable on market, skipping");
                continue;
            };

            let built = DetectedOpportunity::builder()
                .market(rule.market)
                .predicted_outcome(prediction.outcome)
                .odds(prediction.odds)
                .source_rule(rule.name.clone(), rule.priority)
                .inverted(rule.action.is_inverted())
                .matched_conditions(eval.matched_conditions)
                .build();

            match built {
                Ok(opp) => {
                    debug!(
                        rule = %rule.name,
                        match_id = %record.id,
                        outcome = %opp.predicted_outcome(),
                        "opportunity detected"
                    );
                    opportunities.push(opp);
                }
                Err(e) => debug!(rule = %rule.name, error = %e, "dropping malformed opportunity"),
            }
        }
        opportunities
    }

    /// Translate an action tag into a prediction descriptor for a market.
    ///
    /// Argmax/argmin ties are broken by the market's enumeration order.
    #[must_use]
    pub fn predict(action: RuleAction, view: &MarketView) -> Option<Prediction> {
        match action {
            RuleAction::NoRecommendation => None,

            RuleAction::RecommendMostProbable => {
                let (outcome, _) = view.fair.most_probable();
                Self::direct(view, outcome)
            }
            RuleAction::RecommendLeastProbable => {
                let (outcome, _) = view.fair.least_probable();
                Self::direct(view, outcome)
            }

            RuleAction::RecommendDoubleChanceLeastProbable => {
                if view.fair.market() != Market::OneXTwo {
                    return None;
                }
                let (most, _) = view.fair.most_probable();
                let dc = DoubleChance::excluding(most)?;
                Self::direct(view, Outcome::DoubleChance(dc))
            }

            RuleAction::RecommendRefundIfDraw => {
                if view.fair.market() != Market::OneXTwo {
                    return None;
                }
                let p_home = view.fair.prob_for(Outcome::Home)?;
                let p_away = view.fair.prob_for(Outcome::Away)?;
                let side = if p_home >= p_away {
                    Outcome::Home
                } else {
                    Outcome::Away
                };
                Self::direct(view, side)
            }

            RuleAction::RecommendHome => Self::direct(view, Outcome::Home),
            RuleAction::RecommendDraw => Self::direct(view, Outcome::Draw),
            RuleAction::RecommendAway => Self::direct(view, Outcome::Away),
            RuleAction::RecommendYes => Self::direct(view, Outcome::Yes),
            RuleAction::RecommendNo => Self::direct(view, Outcome::No),
            RuleAction::RecommendOver => Self::direct(view, Outcome::Over),
            RuleAction::RecommendUnder => Self::direct(view, Outcome::Under),
        }
    }

    fn direct(view: &MarketView, outcome: Outcome) -> Option<Prediction> {
        let odds = view.odds.odds_for(outcome)?;
        Some(Prediction { outcome, odds })
    }
}
