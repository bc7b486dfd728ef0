//! Scoreline probability grid.
//!
//! Computes an (N+1)x(N+1) grid of correct-score probabilities from a
//! match's fair probabilities: Poisson intensities are calibrated so that
//! the independent-Poisson implied home-win and over-2.5 probabilities match
//! the fair 1X2/over-under values, then a Dixon-Coles correction adjusts the
//! four low-score cells, and cells consistent with a surfaced recommendation
//! are boosted and highlighted. The grid is a pure function of its inputs
//! and is recomputed from scratch on every call.

use serde::{Deserialize, Serialize};

use super::market::{DoubleChance, Outcome};
use super::odds::FairMarket;
use super::opportunity::DetectedOpportunity;

/// Default grid extent: scores 0..=5 per side.
pub const DEFAULT_MAX_GOALS: usize = 5;
/// Default low-score correlation parameter.
pub const DEFAULT_RHO: f64 = -0.10;

/// Fallback total-goals intensity when no over/under market is priced.
const TOTAL_GOALS_BASE: f64 = 2.60;
/// Grid extent used while fitting intensities; wide enough that the
/// truncation error is negligible for football intensities.
const FIT_GRID: usize = 12;
const BISECT_STEPS: usize = 60;

/// Boost factors applied to recommendation-consistent cells must stay in
/// this envelope.
const BOOST_MIN: f64 = 1.04;
const BOOST_MAX: f64 = 1.20;

/// Tuning for the scoreline model.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreGridConfig {
    /// Maximum goals per side in the output grid.
    #[serde(default = "default_max_goals")]
    pub max_goals: usize,

    /// Dixon-Coles low-score correlation parameter.
    #[serde(default = "default_rho")]
    pub rho: f64,

    /// Optional single boost factor overriding the per-outcome table;
    /// clamped to 1.04..=1.20.
    #[serde(default)]
    pub boost_override: Option<f64>,
}

fn default_max_goals() -> usize {
    DEFAULT_MAX_GOALS
}

fn default_rho() -> f64 {
    DEFAULT_RHO
}

impl Default for ScoreGridConfig {
    fn default() -> Self {
        Self {
            max_goals: default_max_goals(),
            rho: default_rho(),
            boost_override: None,
        }
    }
}

/// One cell of the scoreline grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCell {
    pub home_goals: u8,
    pub away_goals: u8,
    pub probability: f64,
    pub highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_reason: Option<String>,
}

/// The full scoreline grid with its fitted intensities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreGrid {
    cells: Vec<Vec<ScoreCell>>,
    lambda_home: f64,
    lambda_away: f64,
}

impl ScoreGrid {
    /// Compute the grid for one match.
    ///
    /// `recommendation`, when present, drives the boost-and-highlight pass;
    /// after any boost the whole grid is renormalized to sum to 1 so it
    /// remains a valid probability distribution. Without boosts the grid is
    /// the truncated Poisson mass and sums to at most 1.
    #[must_use]
    pub fn compute(
        fair_1x2: Option<&FairMarket>,
        fair_ou25: Option<&FairMarket>,
        recommendation: Option<&DetectedOpportunity>,
        config: &ScoreGridConfig,
    ) -> Self {
        let p_over = fair_ou25.and_then(|fair| fair.prob_for(Outcome::Over));
        let p_home = fair_1x2.and_then(|fair| fair.prob_for(Outcome::Home));

        let lambda_total = fit_total_goals(p_over);
        let share = fit_home_share(lambda_total, p_home);
        let lambda_home = lambda_total * share;
        let lambda_away = lambda_total - lambda_home;

        let n = config.max_goals;
        let mut cells: Vec<Vec<ScoreCell>> = (0..=n)
            .map(|h| {
                (0..=n)
                    .map(|a| {
                        let raw = poisson_pmf(h, lambda_home) * poisson_pmf(a, lambda_away);
                        let tau = dixon_coles_tau(h, a, lambda_home, lambda_away, config.rho);
                        ScoreCell {
                            home_goals: h as u8,
                            away_goals: a as u8,
                            probability: raw * tau,
                            highlighted: false,
                            highlight_reason: None,
                        }
                    })
                    .collect()
            })
            .collect();

        let mut boosted = false;
        if let Some(rec) = recommendation {
            let outcome = rec.predicted_outcome();
            let boost = config
                .boost_override
                .map(|b| b.clamp(BOOST_MIN, BOOST_MAX))
                .unwrap_or_else(|| boost_for(outcome));
            let reason = format!(
                "consistent with {} recommendation from rule '{}'",
                outcome,
                rec.source_rule()
            );
            for row in &mut cells {
                for cell in row {
                    if cell_matches(outcome, cell.home_goals, cell.away_goals) {
                        cell.probability *= boost;
                        cell.highlighted = true;
                        cell.highlight_reason = Some(reason.clone());
                        boosted = true;
                    }
                }
            }
        }

        if boosted {
            let total: f64 = cells
                .iter()
                .flat_map(|row| row.iter().map(|c| c.probability))
                .sum();
            if total > 0.0 {
                for row in &mut cells {
                    for cell in row {
                        cell.probability /= total;
                    }
                }
            }
        }

        Self {
            cells,
            lambda_home,
            lambda_away,
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Vec<ScoreCell>] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, home_goals: usize, away_goals: usize) -> Option<&ScoreCell> {
        self.cells.get(home_goals)?.get(away_goals)
    }

    #[must_use]
    pub fn max_goals(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    #[must_use]
    pub fn lambda_home(&self) -> f64 {
        self.lambda_home
    }

    #[must_use]
    pub fn lambda_away(&self) -> f64 {
        self.lambda_away
    }

    /// Sum of all cell probabilities; the truncation mass beyond the grid
    /// makes this at most 1 (exactly 1 after a boost pass renormalizes).
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.cells
            .iter()
            .flat_map(|row| row.iter().map(|c| c.probability))
            .sum()
    }

    /// The most probable scoreline.
    #[must_use]
    pub fn mode(&self) -> &ScoreCell {
        self.cells
            .iter()
            .flatten()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
            .expect("grid is never empty")
    }
}

fn factorial(k: usize) -> f64 {
    (1..=k).fold(1.0, |acc, i| acc * i as f64)
}

fn poisson_pmf(k: usize, lambda: f64) -> f64 {
    lambda.powi(k as i32) * (-lambda).exp() / factorial(k)
}

/// Dixon-Coles adjustment factor; identity outside the four low-score
/// cells. The four adjustments cancel exactly, so total mass is preserved.
fn dixon_coles_tau(h: usize, a: usize, lambda_home: f64, lambda_away: f64, rho: f64) -> f64 {
    match (h, a) {
        (0, 0) => 1.0 - rho * lambda_home * lambda_away,
        (0, 1) => 1.0 + rho * lambda_home,
        (1, 0) => 1.0 + rho * lambda_away,
        (1, 1) => 1.0 - rho,
        _ => 1.0,
    }
}

/// P(total goals > 2.5) for a Poisson total; strictly increasing in lambda.
fn over25_probability(lambda_total: f64) -> f64 {
    1.0 - poisson_pmf(0, lambda_total) - poisson_pmf(1, lambda_total) - poisson_pmf(2, lambda_total)
}

/// Fit the total-goals intensity to the fair over-2.5 probability.
fn fit_total_goals(p_over: Option<f64>) -> f64 {
    let Some(target) = p_over else {
        return TOTAL_GOALS_BASE;
    };
    bisect_increasing(0.2, 8.0, target, over25_probability)
}

/// P(home > away) for independent Poisson margins, on a wide truncated grid.
fn home_win_probability(lambda_home: f64, lambda_away: f64) -> f64 {
    let mut p = 0.0;
    for h in 1..=FIT_GRID {
        for a in 0..h {
            p += poisson_pmf(h, lambda_home) * poisson_pmf(a, lambda_away);
        }
    }
    p
}

/// Fit the home share of the total intensity to the fair home-win
/// probability. The objective is strictly increasing in the share, so the
/// bisection is deterministic and monotonic.
fn fit_home_share(lambda_total: f64, p_home: Option<f64>) -> f64 {
    let Some(target) = p_home else {
        return 0.5;
    };
    bisect_increasing(0.05, 0.95, target, |share| {
        home_win_probability(lambda_total * share, lambda_total * (1.0 - share))
    })
}

/// Bisection over a strictly increasing objective; out-of-range targets
/// land on the nearest bound.
fn bisect_increasing(lo: f64, hi: f64, target: f64, f: impl Fn(f64) -> f64) -> f64 {
    if target <= f(lo) {
        return lo;
    }
    if target >= f(hi) {
        return hi;
    }
    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..BISECT_STEPS {
        let mid = (lo + hi) / 2.0;
        if f(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

/// Whether a scoreline settles the recommended outcome as a winner.
fn cell_matches(outcome: Outcome, home_goals: u8, away_goals: u8) -> bool {
    let (h, a) = (home_goals, away_goals);
    match outcome {
        Outcome::Home => h > a,
        Outcome::Draw => h == a,
        Outcome::Away => a > h,
        Outcome::Yes => h >= 1 && a >= 1,
        Outcome::No => h == 0 || a == 0,
        Outcome::Over => h as u16 + a as u16 >= 3,
        Outcome::Under => h as u16 + a as u16 <= 2,
        Outcome::DoubleChance(DoubleChance::HomeOrDraw) => h >= a,
        Outcome::DoubleChance(DoubleChance::HomeOrAway) => h != a,
        Outcome::DoubleChance(DoubleChance::DrawOrAway) => a >= h,
    }
}

/// Corroboration boost per recommendation kind. All values sit inside the
/// 1.04..=1.20 envelope; single-outcome picks get a stronger boost than
/// double-chance combinations, which already cover most of the grid.
fn boost_for(outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Home | Outcome::Away => 1.12,
        Outcome::Draw => 1.10,
        Outcome::Yes | Outcome::No | Outcome::Over | Outcome::Under => 1.10,
        Outcome::DoubleChance(DoubleChance::HomeOrAway) => 1.06,
        Outcome::DoubleChance(_) => 1.08,
    }
}
