//! Rule engine behavior over contexts built from real match records.

use matchedge::domain::{
    Condition, Connector, ContextField, Market, Operator, RuleAction, RuleEngine,
    RuleEvaluationContext,
};
use matchedge::testkit::fixtures;

fn condition(field: ContextField, operator: Operator, value: f64) -> Condition {
    Condition {
        field,
        operator,
        value,
        value_max: None,
    }
}

/// 2.00/3.50/4.00: fair probs ~0.483/0.276/0.241, vig ~0.0357.
fn balanced_context() -> RuleEvaluationContext {
    let record = fixtures::match_record("m1", &[(Market::OneXTwo, &[2.00, 3.50, 4.00])]);
    RuleEvaluationContext::from_record(&record)
}

#[test]
fn single_condition_threshold() {
    let ctx = balanced_context();

    let hit = fixtures::rule(
        "vig over 3 percent",
        Market::OneXTwo,
        vec![condition(ContextField::Vig1x2, Operator::GreaterThan, 0.03)],
        vec![],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(RuleEngine::evaluate(&hit, &ctx).matched);

    let miss = fixtures::rule(
        "vig over 5 percent",
        Market::OneXTwo,
        vec![condition(ContextField::Vig1x2, Operator::GreaterThan, 0.05)],
        vec![],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(!RuleEngine::evaluate(&miss, &ctx).matched);
}

#[test]
fn and_requires_both_conditions() {
    let ctx = balanced_context();

    let rule = fixtures::rule(
        "close favorite with margin",
        Market::OneXTwo,
        vec![
            condition(ContextField::ProbHome, Operator::GreaterThan, 0.45),
            condition(ContextField::Vig1x2, Operator::GreaterOrEqual, 0.03),
        ],
        vec![Connector::And],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(RuleEngine::evaluate(&rule, &ctx).matched);

    let rule = fixtures::rule(
        "strong favorite with margin",
        Market::OneXTwo,
        vec![
            condition(ContextField::ProbHome, Operator::GreaterThan, 0.60),
            condition(ContextField::Vig1x2, Operator::GreaterOrEqual, 0.03),
        ],
        vec![Connector::And],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(!RuleEngine::evaluate(&rule, &ctx).matched);
}

#[test]
fn or_rescues_a_failed_condition() {
    let ctx = balanced_context();

    let rule = fixtures::rule(
        "either signal",
        Market::OneXTwo,
        vec![
            condition(ContextField::ProbHome, Operator::GreaterThan, 0.90),
            condition(ContextField::Vig1x2, Operator::GreaterThan, 0.03),
        ],
        vec![Connector::Or],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(RuleEngine::evaluate(&rule, &ctx).matched);
}

#[test]
fn connectors_fold_left_to_right_without_precedence() {
    // true OR false AND false: with AND-precedence this would be true,
    // left-to-right folding gives (true OR false) AND false = false.
    let ctx = balanced_context();

    let rule = fixtures::rule(
        "no precedence",
        Market::OneXTwo,
        vec![
            condition(ContextField::ProbHome, Operator::GreaterThan, 0.40), // true
            condition(ContextField::ProbDraw, Operator::GreaterThan, 0.90), // false
            condition(ContextField::ProbAway, Operator::GreaterThan, 0.90), // false
        ],
        vec![Connector::Or, Connector::And],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(!RuleEngine::evaluate(&rule, &ctx).matched);
}

#[test]
fn between_range_over_a_probability_field() {
    let ctx = balanced_context();

    let rule = fixtures::rule(
        "coin-flip favorite",
        Market::OneXTwo,
        vec![Condition {
            field: ContextField::ProbHome,
            operator: Operator::Between,
            value: 0.45,
            value_max: Some(0.55),
        }],
        vec![],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(RuleEngine::evaluate(&rule, &ctx).matched);
}

#[test]
fn unknown_field_fails_its_condition() {
    let ctx = balanced_context();

    // A typo'd field name coming out of a rule file resolves to 0.0.
    let field: ContextField = serde_json::from_str("\"vig_pct_1x2\"").unwrap();
    assert_eq!(field, ContextField::Unknown);

    let rule = fixtures::rule(
        "typo rule",
        Market::OneXTwo,
        vec![condition(field, Operator::GreaterThan, 0.01)],
        vec![],
        RuleAction::RecommendMostProbable,
        1,
    );
    assert!(!RuleEngine::evaluate(&rule, &ctx).matched);
}

#[test]
fn unpriced_market_fields_fail_conditions_quietly() {
    // Only 1X2 is priced; a BTTS condition reads 0.0 and simply fails.
    let ctx = balanced_context();

    let rule = fixtures::rule(
        "btts signal",
        Market::Btts,
        vec![condition(
            ContextField::ProbBttsYes,
            Operator::GreaterThan,
            0.50,
        )],
        vec![],
        RuleAction::RecommendYes,
        1,
    );
    assert!(!RuleEngine::evaluate(&rule, &ctx).matched);
}

#[test]
fn matched_conditions_record_the_full_chain() {
    let ctx = balanced_context();

    let rule = fixtures::rule(
        "documented rule",
        Market::OneXTwo,
        vec![
            condition(ContextField::ProbHome, Operator::GreaterThan, 0.45),
            condition(ContextField::Vig1x2, Operator::LessThan, 0.05),
        ],
        vec![Connector::And],
        RuleAction::RecommendMostProbable,
        1,
    );

    let eval = RuleEngine::evaluate(&rule, &ctx);
    assert!(eval.matched);
    assert_eq!(
        eval.matched_conditions,
        ["prob_home > 0.45", "vig_1x2 < 0.05"]
    );
}
