//! Matchedge - Football odds de-margining and rule-based opportunity detection.
//!
//! This crate takes bookmaker odds for a football match, strips the bookmaker
//! margin (vigorish) to recover fair outcome probabilities, evaluates
//! user-authored conditional rules against them, and surfaces at most one
//! recommendation per match. A Dixon-Coles-corrected Poisson scoreline grid
//! corroborates whatever was surfaced.
//!
//! # Architecture
//!
//! The crate is split along a domain/port/adapter boundary:
//!
//! - **`domain`** - Pure computation: odds normalization, the rule engine,
//!   opportunity detection, prioritization, the scoreline grid, confidence
//!   scoring. No I/O, no shared mutable state.
//! - **`port`** - The `RuleStore` and `MatchStore` traits the core depends on.
//! - **`adapter`** - File-backed store implementations (TOML rules, JSON
//!   matches).
//! - **`app`** - The batch evaluator: fetches rules once, fans out per-match
//!   detection, isolates per-match failures.
//! - **`cli`** - Operator commands (`evaluate`, `matrix`, `rules`, `check`).
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Markets, fair probabilities, rules, opportunities, grids
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for injected stores
//! - [`adapter`] - File-backed store implementations
//! - [`app`] - Batch orchestration
//!
//! # Example
//!
//! ```
//! use matchedge::domain::{FairMarket, Market, MarketOdds};
//!
//! let odds = MarketOdds::new(Market::OneXTwo, vec![2.00, 3.50, 4.00]).unwrap();
//! let fair = FairMarket::from_odds(&odds);
//! assert!((fair.probs().iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
