//! Batch orchestration over the detection domain.

pub mod evaluator;

pub use evaluator::{Evaluator, MatchReport};
