//! Closed market and outcome vocabulary.
//!
//! Markets and outcomes are modeled as closed enums so that action dispatch
//! and context resolution stay exhaustively checkable, instead of the
//! string-matching this kind of system tends to accumulate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A betting market on a single football match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Market {
    /// Match result: home win / draw / away win.
    #[serde(rename = "1x2")]
    OneXTwo,
    /// Both teams to score: yes / no.
    #[serde(rename = "btts")]
    Btts,
    /// Total goals over/under 2.5.
    #[serde(rename = "ou25")]
    Ou25,
}

impl Market {
    /// The market's outcomes in canonical enumeration order.
    ///
    /// This order doubles as the tie-break order for argmax/argmin picks:
    /// home before draw before away, yes before no, over before under.
    #[must_use]
    pub const fn outcomes(self) -> &'static [Outcome] {
        match self {
            Self::OneXTwo => &[Outcome::Home, Outcome::Draw, Outcome::Away],
            Self::Btts => &[Outcome::Yes, Outcome::No],
            Self::Ou25 => &[Outcome::Over, Outcome::Under],
        }
    }

    /// Stable identifier used in rule files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneXTwo => "1x2",
            Self::Btts => "btts",
            Self::Ou25 => "ou25",
        }
    }

    /// All supported markets.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::OneXTwo, Self::Btts, Self::Ou25]
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OneXTwo => "1X2",
            Self::Btts => "BTTS",
            Self::Ou25 => "O/U 2.5",
        };
        write!(f, "{label}")
    }
}

/// A double-chance bet covering two of the three 1X2 outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleChance {
    /// Home or draw (`1X`).
    HomeOrDraw,
    /// Home or away (`12`).
    HomeOrAway,
    /// Draw or away (`X2`).
    DrawOrAway,
}

impl DoubleChance {
    /// Conventional bookmaker code for this combination.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::HomeOrDraw => "1X",
            Self::HomeOrAway => "12",
            Self::DrawOrAway => "X2",
        }
    }

    /// The combination covering everything except `excluded`.
    ///
    /// Returns `None` when `excluded` is not a 1X2 outcome.
    #[must_use]
    pub const fn excluding(excluded: Outcome) -> Option<Self> {
        match excluded {
            Outcome::Home => Some(Self::DrawOrAway),
            Outcome::Draw => Some(Self::HomeOrAway),
            Outcome::Away => Some(Self::HomeOrDraw),
            _ => None,
        }
    }

    /// The two 1X2 outcomes this combination pays out on.
    #[must_use]
    pub const fn legs(self) -> (Outcome, Outcome) {
        match self {
            Self::HomeOrDraw => (Outcome::Home, Outcome::Draw),
            Self::HomeOrAway => (Outcome::Home, Outcome::Away),
            Self::DrawOrAway => (Outcome::Draw, Outcome::Away),
        }
    }
}

impl fmt::Display for DoubleChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A concrete outcome a recommendation can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Home,
    Draw,
    Away,
    Yes,
    No,
    Over,
    Under,
    DoubleChance(DoubleChance),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "1"),
            Self::Draw => write!(f, "X"),
            Self::Away => write!(f, "2"),
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
            Self::Over => write!(f, "Over 2.5"),
            Self::Under => write!(f, "Under 2.5"),
            Self::DoubleChance(dc) => write!(f, "{dc}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_order_is_the_tie_break_order() {
        assert_eq!(
            Market::OneXTwo.outcomes(),
            &[Outcome::Home, Outcome::Draw, Outcome::Away]
        );
        assert_eq!(Market::Btts.outcomes(), &[Outcome::Yes, Outcome::No]);
        assert_eq!(Market::Ou25.outcomes(), &[Outcome::Over, Outcome::Under]);
    }

    #[test]
    fn double_chance_excludes_single_outcome() {
        assert_eq!(
            DoubleChance::excluding(Outcome::Home),
            Some(DoubleChance::DrawOrAway)
        );
        assert_eq!(
            DoubleChance::excluding(Outcome::Draw),
            Some(DoubleChance::HomeOrAway)
        );
        assert_eq!(
            DoubleChance::excluding(Outcome::Away),
            Some(DoubleChance::HomeOrDraw)
        );
        assert_eq!(DoubleChance::excluding(Outcome::Yes), None);
    }

    #[test]
    fn market_serde_uses_stable_identifiers() {
        assert_eq!(serde_json::to_string(&Market::OneXTwo).unwrap(), "\"1x2\"");
        assert_eq!(
            serde_json::from_str::<Market>("\"ou25\"").unwrap(),
            Market::Ou25
        );
    }

    #[test]
    fn double_chance_codes() {
        assert_eq!(DoubleChance::HomeOrDraw.to_string(), "1X");
        assert_eq!(DoubleChance::HomeOrAway.to_string(), "12");
        assert_eq!(DoubleChance::DrawOrAway.to_string(), "X2");
    }
}
