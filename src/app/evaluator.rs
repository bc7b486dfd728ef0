//! The batch evaluator.
//!
//! Fetches the rule set once per batch (rules do not change mid-batch),
//! fans out per-match detection across tasks, and collects reports keyed by
//! match id. One match failing must not prevent evaluation of the others;
//! only store unavailability propagates to the caller.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::domain::{
    assess, Confidence, ConditionalRule, DetectedOpportunity, Market, MatchRecord,
    OpportunityDetector, Prioritizer, ScoreGrid, ScoreGridConfig,
};
use crate::error::{Error, Result};
use crate::port::{MatchStore, RuleStore};

/// Everything the presentation layer needs for one match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub match_id: String,
    pub label: String,
    /// Every rule-licensed candidate, pre-prioritization.
    pub candidates: Vec<DetectedOpportunity>,
    /// The surfaced recommendation set (commonly length 1, possibly empty).
    pub recommendations: Vec<DetectedOpportunity>,
    /// Confidence for the first surfaced recommendation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    pub grid: ScoreGrid,
}

/// Runs the detection pipeline against the injected stores.
pub struct Evaluator {
    rule_store: Arc<dyn RuleStore>,
    match_store: Arc<dyn MatchStore>,
    grid_config: ScoreGridConfig,
}

impl Evaluator {
    #[must_use]
    pub fn new(
        rule_store: Arc<dyn RuleStore>,
        match_store: Arc<dyn MatchStore>,
        grid_config: ScoreGridConfig,
    ) -> Self {
        Self {
            rule_store,
            match_store,
            grid_config,
        }
    }

    /// The full single-match pipeline: detect, prioritize, score, grid.
    ///
    /// Pure given its inputs; shared by the batch fan-out and the
    /// single-match entry point.
    #[must_use]
    pub fn evaluate_match(
        record: &MatchRecord,
        rules: &[ConditionalRule],
        grid_config: &ScoreGridConfig,
    ) -> MatchReport {
        let candidates = OpportunityDetector::detect(record, rules);
        let recommendations = Prioritizer::select(candidates.clone());

        let confidence = recommendations
            .first()
            .and_then(|rec| Self::confidence_for(record, rec));

        let fair_1x2 = record.fair_market(Market::OneXTwo);
        let fair_ou25 = record.fair_market(Market::Ou25);
        let grid = ScoreGrid::compute(
            fair_1x2.as_ref(),
            fair_ou25.as_ref(),
            recommendations.first(),
            grid_config,
        );

        MatchReport {
            match_id: record.id.clone(),
            label: record.label(),
            candidates,
            recommendations,
            confidence,
            grid,
        }
    }

    fn confidence_for(record: &MatchRecord, rec: &DetectedOpportunity) -> Option<Confidence> {
        let fair = record.fair_market(rec.market())?;
        let probability = fair.prob_for(rec.predicted_outcome())?;
        Some(assess(probability, fair.vig()))
    }

    /// Evaluate one match by id.
    ///
    /// # Errors
    ///
    /// Propagates store failures; an unknown id is [`Error::MatchNotFound`].
    pub async fn evaluate_one(&self, match_id: &str) -> Result<MatchReport> {
        let record = self
            .match_store
            .get_match(match_id)
            .await?
            .ok_or_else(|| Error::MatchNotFound(match_id.to_owned()))?;
        let rules = self.rule_store.get_rules().await?;
        Ok(Self::evaluate_match(&record, &rules, &self.grid_config))
    }

    /// Evaluate every match in the store concurrently.
    ///
    /// Rules are fetched once and shared read-only across tasks; each
    /// match's evaluation is independent, and a panicking task is logged
    /// and skipped rather than failing the batch. Reports come back sorted
    /// by match id since completion order is meaningless.
    ///
    /// # Errors
    ///
    /// Only store unavailability (rule or match fetch) fails the batch.
    pub async fn evaluate_all(&self) -> Result<Vec<MatchReport>> {
        let rules = Arc::new(self.rule_store.get_rules().await?);
        let matches = self.match_store.list_matches().await?;
        info!(
            matches = matches.len(),
            rules = rules.len(),
            "starting batch evaluation"
        );

        let mut tasks = JoinSet::new();
        for record in matches {
            let rules = Arc::clone(&rules);
            let grid_config = self.grid_config.clone();
            tasks.spawn(async move { Self::evaluate_match(&record, &rules, &grid_config) });
        }

        let mut reports = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => warn!(error = %e, "match evaluation task failed, skipping"),
            }
        }

        reports.sort_by(|a, b| a.match_id.cmp(&b.match_id));
        Ok(reports)
    }
}
