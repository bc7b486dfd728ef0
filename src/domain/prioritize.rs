//! Conflict resolution between candidate opportunities.

use tracing::debug;

use super::opportunity::DetectedOpportunity;

/// Resolves potentially-conflicting candidates into the surfaced
/// recommendation set.
pub struct Prioritizer;

impl Prioritizer {
    /// Keep the highest-priority candidate; ties keep the first in
    /// rule-definition order.
    ///
    /// User-authored priority is authoritative. There is deliberately no
    /// probability-based secondary tie-break: a later-defined rule of equal
    /// priority never overrides an earlier one.
    #[must_use]
    pub fn select(candidates: Vec<DetectedOpportunity>) -> Vec<DetectedOpportunity> {
        let Some(max_priority) = candidates.iter().map(DetectedOpportunity::priority).max() else {
            return Vec::new();
        };

        let winner = candidates
            .into_iter()
            .find(|opp| opp.priority() == max_priority);

        match winner {
            Some(opp) => {
                debug!(
                    rule = %opp.source_rule(),
                    priority = max_priority,
                    "recommendation selected"
                );
                vec![opp]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{Market, Outcome};

    fn opportunity(rule: &str, priority: i32) -> DetectedOpportunity {
        DetectedOpportunity::builder()
            .market(Market::OneXTwo)
            .predicted_outcome(Outcome::Home)
            .odds(2.0)
            .source_rule(rule, priority)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(Prioritizer::select(vec![]).is_empty());
    }

    #[test]
    fn highest_priority_wins() {
        let selected = Prioritizer::select(vec![
            opportunity("a", 3),
            opportunity("b", 5),
            opportunity("c", 2),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].source_rule(), "b");
        assert_eq!(selected[0].priority(), 5);
    }

    #[test]
    fn ties_keep_definition_order() {
        let selected = Prioritizer::select(vec![
            opportunity("a", 3),
            opportunity("first-at-5", 5),
            opportunity("second-at-5", 5),
            opportunity("d", 2),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].source_rule(), "first-at-5");
    }

    #[test]
    fn single_candidate_passes_through() {
        let selected = Prioritizer::select(vec![opportunity("only", 1)]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].source_rule(), "only");
    }
}
