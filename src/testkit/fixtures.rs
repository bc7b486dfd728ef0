//! Fixture builders shared across unit and integration tests.

use uuid::Uuid;

use crate::domain::{
    Condition, ConditionalRule, Connector, ContextField, Market, MatchRecord, Operator, RuleAction,
};

/// A match record with the given fully-priced markets.
#[must_use]
pub fn match_record(id: &str, markets: &[(Market, &[f64])]) -> MatchRecord {
    let mut record = MatchRecord {
        id: id.into(),
        home_team: "Home FC".into(),
        away_team: "Away FC".into(),
        kickoff: None,
        odds: Default::default(),
        fair: Default::default(),
    };
    for (market, odds) in markets {
        record
            .odds
            .insert(*market, odds.iter().copied().map(Some).collect());
    }
    record
}

/// A rule with explicit conditions and connectors.
#[must_use]
pub fn rule(
    name: &str,
    market: Market,
    conditions: Vec<Condition>,
    connectors: Vec<Connector>,
    action: RuleAction,
    priority: i32,
) -> ConditionalRule {
    ConditionalRule {
        id: Uuid::new_v4(),
        name: name.into(),
        market,
        conditions,
        connectors,
        action,
        priority,
        enabled: true,
    }
}

/// A single-condition rule, the common case in tests.
#[must_use]
pub fn simple_rule(
    name: &str,
    market: Market,
    field: ContextField,
    operator: Operator,
    value: f64,
    action: RuleAction,
    priority: i32,
) -> ConditionalRule {
    rule(
        name,
        market,
        vec![Condition {
            field,
            operator,
            value,
            value_max: None,
        }],
        vec![],
        action,
        priority,
    )
}
