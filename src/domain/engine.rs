//! The rule engine.
//!
//! One engine serves every caller: the single-match detector and the
//! concurrent batch path both evaluate through here, so there is exactly
//! one place that defines what a rule means.

use tracing::trace;

use super::context::RuleEvaluationContext;
use super::rule::{Condition, ConditionalRule, Connector};

/// Result of evaluating one rule against one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEvaluation {
    /// Whether the rule's combined conditions held.
    pub matched: bool,
    /// Summaries of the individual conditions that held, for provenance.
    pub matched_conditions: Vec<String>,
}

impl RuleEvaluation {
    fn no_match() -> Self {
        Self {
            matched: false,
            matched_conditions: Vec::new(),
        }
    }
}

/// Evaluates declarative rules against a numeric context.
pub struct RuleEngine;

impl RuleEngine {
    /// Evaluate one rule.
    ///
    /// Per-condition results are combined strictly left to right using the
    /// rule's connectors; there is no AND-before-OR precedence. A rule with
    /// a single condition ignores connectors entirely, and a rule with no
    /// conditions never matches.
    #[must_use]
    pub fn evaluate(rule: &ConditionalRule, ctx: &RuleEvaluationContext) -> RuleEvaluation {
        let Some(first) = rule.conditions.first() else {
            return RuleEvaluation::no_match();
        };

        let mut matched_conditions = Vec::new();
        let mut acc = Self::check(first, ctx, &mut matched_conditions);

        for (i, condition) in rule.conditions.iter().enumerate().skip(1) {
            let held = Self::check(condition, ctx, &mut matched_conditions);
            // Missing connectors default to AND; validation flags them upstream.
            let connector = rule
                .connectors
                .get(i - 1)
                .copied()
                .unwrap_or(Connector::And);
            acc = match connector {
                Connector::And => acc && held,
                Connector::Or => acc || held,
            };
        }

        trace!(rule = %rule.name, matched = acc, "rule evaluated");
        RuleEvaluation {
            matched: acc,
            matched_conditions,
        }
    }

    fn check(
        condition: &Condition,
        ctx: &RuleEvaluationContext,
        matched: &mut Vec<String>,
    ) -> bool {
        let lhs = ctx.resolve(condition.field);
        let held = condition
            .operator
            .apply(lhs, condition.value, condition.value_max);
        if held {
            matched.push(condition.summary());
        }
        held
    }
}
