//! Pure detection domain: odds, rules, opportunities, scorelines.
//!
//! Everything in this module is synchronous, side-effect-free computation.
//! Stores and orchestration live in [`crate::port`] and [`crate::app`].

pub mod confidence;
pub mod context;
pub mod detector;
pub mod engine;
pub mod market;
pub mod match_record;
pub mod odds;
pub mod opportunity;
pub mod prioritize;
pub mod rule;
pub mod scoregrid;

pub use confidence::{assess, Confidence, ConfidenceTier};
pub use context::{ContextField, RuleEvaluationContext};
pub use detector::{MarketView, OpportunityDetector, Prediction};
pub use engine::{RuleEngine, RuleEvaluation};
pub use market::{DoubleChance, Market, Outcome};
pub use match_record::MatchRecord;
pub use odds::{FairMarket, MarketOdds};
pub use opportunity::{DetectedOpportunity, OpportunityBuildError, OpportunityBuilder};
pub use prioritize::Prioritizer;
pub use rule::{Condition, ConditionalRule, Connector, Operator, RuleAction, RuleValidationError};
pub use scoregrid::{ScoreCell, ScoreGrid, ScoreGridConfig, DEFAULT_MAX_GOALS, DEFAULT_RHO};
