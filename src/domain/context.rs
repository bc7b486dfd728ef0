//! The flat numeric snapshot rules are evaluated against.
//!
//! One context is built fresh per match per evaluation pass and never shared
//! across matches.
//!
//! # Unit convention
//!
//! Every probability and vigorish field is in decimal form (0.0-1.0), never
//! percentage. Rule condition values are authored in the same convention.
//! Odds fields carry decimal odds as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::market::{Market, Outcome};
use super::match_record::MatchRecord;

/// A named numeric field of the evaluation context.
///
/// Unknown names deserialize to [`ContextField::Unknown`], which resolves
/// to 0.0: a rule with a typo'd field fails its condition predictably
/// instead of aborting evaluation of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContextField {
    ProbHome,
    ProbDraw,
    ProbAway,
    ProbBttsYes,
    ProbBttsNo,
    ProbOver25,
    ProbUnder25,
    Vig1x2,
    VigBtts,
    VigOu25,
    OddsHome,
    OddsDraw,
    OddsAway,
    OddsBttsYes,
    OddsBttsNo,
    OddsOver25,
    OddsUnder25,
    MaxProb1x2,
    MaxProbBtts,
    MaxProbOu25,
    /// Any name the engine does not recognize.
    Unknown,
}

impl ContextField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProbHome => "prob_home",
            Self::ProbDraw => "prob_draw",
            Self::ProbAway => "prob_away",
            Self::ProbBttsYes => "prob_btts_yes",
            Self::ProbBttsNo => "prob_btts_no",
            Self::ProbOver25 => "prob_over25",
            Self::ProbUnder25 => "prob_under25",
            Self::Vig1x2 => "vig_1x2",
            Self::VigBtts => "vig_btts",
            Self::VigOu25 => "vig_ou25",
            Self::OddsHome => "odds_home",
            Self::OddsDraw => "odds_draw",
            Self::OddsAway => "odds_away",
            Self::OddsBttsYes => "odds_btts_yes",
            Self::OddsBttsNo => "odds_btts_no",
            Self::OddsOver25 => "odds_over25",
            Self::OddsUnder25 => "odds_under25",
            Self::MaxProb1x2 => "max_prob_1x2",
            Self::MaxProbBtts => "max_prob_btts",
            Self::MaxProbOu25 => "max_prob_ou25",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for ContextField {
    fn from(name: String) -> Self {
        match name.as_str() {
            "prob_home" => Self::ProbHome,
            "prob_draw" => Self::ProbDraw,
            "prob_away" => Self::ProbAway,
            "prob_btts_yes" => Self::ProbBttsYes,
            "prob_btts_no" => Self::ProbBttsNo,
            "prob_over25" => Self::ProbOver25,
            "prob_under25" => Self::ProbUnder25,
            "vig_1x2" => Self::Vig1x2,
            "vig_btts" => Self::VigBtts,
            "vig_ou25" => Self::VigOu25,
            "odds_home" => Self::OddsHome,
            "odds_draw" => Self::OddsDraw,
            "odds_away" => Self::OddsAway,
            "odds_btts_yes" => Self::OddsBttsYes,
            "odds_btts_no" => Self::OddsBttsNo,
            "odds_over25" => Self::OddsOver25,
            "odds_under25" => Self::OddsUnder25,
            "max_prob_1x2" => Self::MaxProb1x2,
            "max_prob_btts" => Self::MaxProbBtts,
            "max_prob_ou25" => Self::MaxProbOu25,
            _ => Self::Unknown,
        }
    }
}

impl From<ContextField> for String {
    fn from(field: ContextField) -> Self {
        field.as_str().to_owned()
    }
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flat numeric snapshot of one match's fair probabilities, vigorish and
/// odds, for the three core markets.
///
/// Fields for absent or incompletely priced markets stay at 0.0, so rule
/// conditions over them fail without erroring (missing market data is not
/// an error condition).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleEvaluationContext {
    pub prob_home: f64,
    pub prob_draw: f64,
    pub prob_away: f64,
    pub prob_btts_yes: f64,
    pub prob_btts_no: f64,
    pub prob_over25: f64,
    pub prob_under25: f64,
    pub vig_1x2: f64,
    pub vig_btts: f64,
    pub vig_ou25: f64,
    pub odds_home: f64,
    pub odds_draw: f64,
    pub odds_away: f64,
    pub odds_btts_yes: f64,
    pub odds_btts_no: f64,
    pub odds_over25: f64,
    pub odds_under25: f64,
    pub max_prob_1x2: f64,
    pub max_prob_btts: f64,
    pub max_prob_ou25: f64,
}

impl RuleEvaluationContext {
    /// Build the snapshot for one match from whatever markets it has
    /// priced. Precomputed fair values on the record win over
    /// recomputation from raw odds.
    #[must_use]
    pub fn from_record(record: &MatchRecord) -> Self {
        let mut ctx = Self::default();
        for market in Market::all() {
            let Some(fair) = record.fair_market(market) else {
                continue;
            };
            let (_, max_prob) = fair.most_probable();
            let vig = fair.vig();
            match market {
                Market::OneXTwo => {
                    ctx.prob_home = fair.prob_for(Outcome::Home).unwrap_or(0.0);
                    ctx.prob_draw = fair.prob_for(Outcome::Draw).unwrap_or(0.0);
                    ctx.prob_away = fair.prob_for(Outcome::Away).unwrap_or(0.0);
                    ctx.vig_1x2 = vig;
                    ctx.max_prob_1x2 = max_prob;
                }
                Market::Btts => {
                    ctx.prob_btts_yes = fair.prob_for(Outcome::Yes).unwrap_or(0.0);
                    ctx.prob_btts_no = fair.prob_for(Outcome::No).unwrap_or(0.0);
                    ctx.vig_btts = vig;
                    ctx.max_prob_btts = max_prob;
                }
                Market::Ou25 => {
                    ctx.prob_over25 = fair.prob_for(Outcome::Over).unwrap_or(0.0);
                    ctx.prob_under25 = fair.prob_for(Outcome::Under).unwrap_or(0.0);
                    ctx.vig_ou25 = vig;
                    ctx.max_prob_ou25 = max_prob;
                }
            }
            if let Some(odds) = record.market_odds(market) {
                match market {
                    Market::OneXTwo => {
                        ctx.odds_home = odds.odds_for(Outcome::Home).unwrap_or(0.0);
                        ctx.odds_draw = odds.odds_for(Outcome::Draw).unwrap_or(0.0);
                        ctx.odds_away = odds.odds_for(Outcome::Away).unwrap_or(0.0);
                    }
                    Market::Btts => {
                        ctx.odds_btts_yes = odds.odds_for(Outcome::Yes).unwrap_or(0.0);
                        ctx.odds_btts_no = odds.odds_for(Outcome::No).unwrap_or(0.0);
                    }
                    Market::Ou25 => {
                        ctx.odds_over25 = odds.odds_for(Outcome::Over).unwrap_or(0.0);
                        ctx.odds_under25 = odds.odds_for(Outcome::Under).unwrap_or(0.0);
                    }
                }
            }
        }
        ctx
    }

    /// Resolve a field to its numeric value; [`ContextField::Unknown`]
    /// resolves to 0.0.
    #[must_use]
    pub fn resolve(&self, field: ContextField) -> f64 {
        match field {
            ContextField::ProbHome => self.prob_home,
            ContextField::ProbDraw => self.prob_draw,
            ContextField::ProbAway => self.prob_away,
            ContextField::ProbBttsYes => self.prob_btts_yes,
            ContextField::ProbBttsNo => self.prob_btts_no,
            ContextField::ProbOver25 => self.prob_over25,
            ContextField::ProbUnder25 => self.prob_under25,
            ContextField::Vig1x2 => self.vig_1x2,
            ContextField::VigBtts => self.vig_btts,
            ContextField::VigOu25 => self.vig_ou25,
            ContextField::OddsHome => self.odds_home,
            ContextField::OddsDraw => self.odds_draw,
            ContextField::OddsAway => self.odds_away,
            ContextField::OddsBttsYes => self.odds_btts_yes,
            ContextField::OddsBttsNo => self.odds_btts_no,
            ContextField::OddsOver25 => self.odds_over25,
            ContextField::OddsUnder25 => self.odds_under25,
            ContextField::MaxProb1x2 => self.max_prob_1x2,
            ContextField::MaxProbBtts => self.max_prob_btts,
            ContextField::MaxProbOu25 => self.max_prob_ou25,
            ContextField::Unknown => 0.0,
        }
    }
}
