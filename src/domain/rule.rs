//! Rule definitions as data.
//!
//! A [`ConditionalRule`] is authored by the user, persisted by the rule
//! store, and read-only to the engine. The condition/action vocabulary is a
//! closed set of tagged variants so the engine can dispatch exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::context::ContextField;
use super::market::Market;

/// Comparison operator for a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "not_between")]
    NotBetween,
}

const EQ_TOLERANCE: f64 = 1e-9;

impl Operator {
    /// Apply the operator to a resolved context value.
    ///
    /// `between`/`not_between` read `value_max`; when absent the range
    /// collapses to `[value, value]` and the check degenerates to equality.
    #[must_use]
    pub fn apply(self, lhs: f64, value: f64, value_max: Option<f64>) -> bool {
        match self {
            Self::GreaterThan => lhs > value,
            Self::LessThan => lhs < value,
            Self::GreaterOrEqual => lhs >= value,
            Self::LessOrEqual => lhs <= value,
            Self::Equal => (lhs - value).abs() <= EQ_TOLERANCE,
            Self::NotEqual => (lhs - value).abs() > EQ_TOLERANCE,
            Self::Between => {
                let hi = value_max.unwrap_or(value);
                lhs >= value && lhs <= hi
            }
            Self::NotBetween => {
                let hi = value_max.unwrap_or(value);
                lhs < value || lhs > hi
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Between => "between",
            Self::NotBetween => "not_between",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One numeric predicate over the evaluation context.
///
/// `value` (and `value_max`) are authored in the same decimal convention
/// the context uses: probabilities and vigorish in 0.0-1.0, odds as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: ContextField,
    pub operator: Operator,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_max: Option<f64>,
}

impl Condition {
    /// Human-readable form used for provenance, e.g. `vig_1x2 >= 0.10`.
    #[must_use]
    pub fn summary(&self) -> String {
        match (self.operator, self.value_max) {
            (Operator::Between | Operator::NotBetween, Some(hi)) => {
                format!("{} {} {} and {}", self.field, self.operator, self.value, hi)
            }
            _ => format!("{} {} {}", self.field, self.operator, self.value),
        }
    }
}

/// Logical connector between two adjacent conditions.
///
/// Connectors are folded strictly left to right; there is no AND-before-OR
/// precedence. Rule authors rely on evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a matching rule recommends for its market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// Explicit opt-out: the rule matched but nothing should be surfaced.
    NoRecommendation,
    /// Back the outcome with the highest fair probability.
    RecommendMostProbable,
    /// Contrarian: back the outcome with the lowest fair probability.
    RecommendLeastProbable,
    /// 1X2 only: back the double-chance pair of the two least probable
    /// outcomes.
    RecommendDoubleChanceLeastProbable,
    /// 1X2 only: back whichever of home/away is more probable, draw
    /// excluded from the comparison.
    RecommendRefundIfDraw,
    RecommendHome,
    RecommendDraw,
    RecommendAway,
    RecommendYes,
    RecommendNo,
    RecommendOver,
    RecommendUnder,
}

impl RuleAction {
    /// Whether the action implies a contrarian (inverted) stance.
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        matches!(
            self,
            Self::RecommendLeastProbable | Self::RecommendDoubleChanceLeastProbable
        )
    }

    /// Stable identifier used in rule files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoRecommendation => "no_recommendation",
            Self::RecommendMostProbable => "recommend_most_probable",
            Self::RecommendLeastProbable => "recommend_least_probable",
            Self::RecommendDoubleChanceLeastProbable => {
                "recommend_double_chance_least_probable"
            }
            Self::RecommendRefundIfDraw => "recommend_refund_if_draw",
            Self::RecommendHome => "recommend_home",
            Self::RecommendDraw => "recommend_draw",
            Self::RecommendAway => "recommend_away",
            Self::RecommendYes => "recommend_yes",
            Self::RecommendNo => "recommend_no",
            Self::RecommendOver => "recommend_over",
            Self::RecommendUnder => "recommend_under",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structural problems in an authored rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleValidationError {
    #[error("rule '{name}' has no conditions")]
    NoConditions { name: String },

    #[error("rule '{name}' has {connectors} connectors for {conditions} conditions")]
    ConnectorMismatch {
        name: String,
        conditions: usize,
        connectors: usize,
    },
}

/// A user-authored detection rule.
///
/// Owned and mutated only by the rule store; the engine treats it as
/// read-only data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    pub id: Uuid,
    pub name: String,
    pub market: Market,
    pub conditions: Vec<Condition>,
    /// Connectors between adjacent conditions; length is
    /// `conditions.len() - 1`. A single-condition rule ignores these.
    #[serde(default)]
    pub connectors: Vec<Connector>,
    pub action: RuleAction,
    pub priority: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ConditionalRule {
    /// Check the structural invariants: at least one condition, and exactly
    /// one connector fewer than conditions.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        if self.conditions.is_empty() {
            return Err(RuleValidationError::NoConditions {
                name: self.name.clone(),
            });
        }
        if self.connectors.len() != self.conditions.len() - 1 {
            return Err(RuleValidationError::ConnectorMismatch {
                name: self.name.clone(),
                conditions: self.conditions.len(),
                connectors: self.connectors.len(),
            });
        }
        Ok(())
    }

    /// The whole condition chain in reading order, e.g.
    /// `vig_1x2 >= 0.1 AND prob_home > 0.5`.
    #[must_use]
    pub fn conditions_summary(&self) -> String {
        let mut out = String::new();
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                let connector = self
                    .connectors
                    .get(i - 1)
                    .copied()
                    .unwrap_or(Connector::And);
                out.push(' ');
                out.push_str(connector.as_str());
                out.push(' ');
            }
            out.push_str(&condition.summary());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(field: ContextField, operator: Operator, value: f64) -> Condition {
        Condition {
            field,
            operator,
            value,
            value_max: None,
        }
    }

    #[test]
    fn operators_apply() {
        assert!(Operator::GreaterThan.apply(0.6, 0.5, None));
        assert!(!Operator::GreaterThan.apply(0.5, 0.5, None));
        assert!(Operator::GreaterOrEqual.apply(0.5, 0.5, None));
        assert!(Operator::LessThan.apply(0.4, 0.5, None));
        assert!(Operator::LessOrEqual.apply(0.5, 0.5, None));
        assert!(Operator::Equal.apply(0.5, 0.5, None));
        assert!(Operator::NotEqual.apply(0.51, 0.5, None));
    }

    #[test]
    fn between_is_inclusive() {
        assert!(Operator::Between.apply(0.10, 0.05, Some(0.15)));
        assert!(Operator::Between.apply(0.05, 0.05, Some(0.15)));
        assert!(Operator::Between.apply(0.15, 0.05, Some(0.15)));
        assert!(!Operator::Between.apply(0.16, 0.05, Some(0.15)));
        assert!(Operator::NotBetween.apply(0.16, 0.05, Some(0.15)));
        assert!(!Operator::NotBetween.apply(0.10, 0.05, Some(0.15)));
    }

    #[test]
    fn between_without_max_degenerates_to_equality() {
        assert!(Operator::Between.apply(0.05, 0.05, None));
        assert!(!Operator::Between.apply(0.06, 0.05, None));
        assert!(Operator::NotBetween.apply(0.06, 0.05, None));
    }

    #[test]
    fn operator_serde_uses_symbols() {
        assert_eq!(
            serde_json::from_str::<Operator>("\">=\"").unwrap(),
            Operator::GreaterOrEqual
        );
        assert_eq!(
            serde_json::to_string(&Operator::NotBetween).unwrap(),
            "\"not_between\""
        );
    }

    #[test]
    fn condition_summary_reads_naturally() {
        let c = condition(ContextField::Vig1x2, Operator::GreaterOrEqual, 0.1);
        assert_eq!(c.summary(), "vig_1x2 >= 0.1");

        let ranged = Condition {
            field: ContextField::ProbHome,
            operator: Operator::Between,
            value: 0.4,
            value_max: Some(0.6),
        };
        assert_eq!(ranged.summary(), "prob_home between 0.4 and 0.6");
    }

    #[test]
    fn validate_rejects_empty_conditions() {
        let rule = ConditionalRule {
            id: Uuid::new_v4(),
            name: "empty".into(),
            market: Market::OneXTwo,
            conditions: vec![],
            connectors: vec![],
            action: RuleAction::RecommendHome,
            priority: 1,
            enabled: true,
        };
        assert!(matches!(
            rule.validate(),
            Err(RuleValidationError::NoConditions { .. })
        ));
    }

    #[test]
    fn validate_rejects_connector_mismatch() {
        let rule = ConditionalRule {
            id: Uuid::new_v4(),
            name: "mismatch".into(),
            market: Market::OneXTwo,
            conditions: vec![
                condition(ContextField::ProbHome, Operator::GreaterThan, 0.5),
                condition(ContextField::Vig1x2, Operator::LessThan, 0.05),
            ],
            connectors: vec![],
            action: RuleAction::RecommendHome,
            priority: 1,
            enabled: true,
        };
        assert!(matches!(
            rule.validate(),
            Err(RuleValidationError::ConnectorMismatch {
                conditions: 2,
                connectors: 0,
                ..
            })
        ));
    }

    #[test]
    fn inverted_actions() {
        assert!(RuleAction::RecommendLeastProbable.is_inverted());
        assert!(RuleAction::RecommendDoubleChanceLeastProbable.is_inverted());
        assert!(!RuleAction::RecommendMostProbable.is_inverted());
        assert!(!RuleAction::RecommendHome.is_inverted());
    }
}
