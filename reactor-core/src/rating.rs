//! Division ratings with promotion and demotion
//!
//! Each division keeps its own independent counter; moving between
//! divisions never resets or averages progress.

use crate::session::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Promotion/demotion thresholds, checked in this order after a rated game
const SILVER_PROMOTE_AT: i32 = 1200;
const GOLD_PROMOTE_AT: i32 = 1500;
const GOLD_DEMOTE_AT: i32 = 1100;
const PLATINUM_DEMOTE_AT: i32 = 1400;

/// Rating tier. Each tier has its own bot strength and rating counter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Division {
    Silver,
    Gold,
    Platinum,
}

impl Division {
    pub const ALL: [Division; 3] = [Division::Silver, Division::Gold, Division::Platinum];

    pub fn initial_rating(self) -> i32 {
        match self {
            Division::Silver => 1000,
            Division::Gold => 1300,
            Division::Platinum => 1600,
        }
    }

    pub fn win_delta(self) -> i32 {
        match self {
            Division::Silver => 10,
            Division::Gold => 15,
            Division::Platinum => 20,
        }
    }

    pub fn loss_delta(self) -> i32 {
        match self {
            Division::Silver => -8,
            Division::Gold => -12,
            Division::Platinum => -15,
        }
    }

    fn index(self) -> usize {
        match self {
            Division::Silver => 0,
            Division::Gold => 1,
            Division::Platinum => 2,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Division::Silver => write!(f, "silver"),
            Division::Gold => write!(f, "gold"),
            Division::Platinum => write!(f, "platinum"),
        }
    }
}

#[derive(Clone, Debug, Error)]
#[error("unknown division: {0} (expected silver, gold, or platinum)")]
pub struct ParseDivisionError(String);

impl FromStr for Division {
    type Err = ParseDivisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silver" => Ok(Division::Silver),
            "gold" => Ok(Division::Gold),
            "platinum" => Ok(Division::Platinum),
            other => Err(ParseDivisionError(other.to_string())),
        }
    }
}

/// Per-division ratings plus the player's current division. Lives for the
/// whole process; sessions come and go around it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RatingProfile {
    ratings: [i32; 3],
    current: Option<Division>,
    last_delta: i32,
}

impl Default for RatingProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingProfile {
    pub fn new() -> Self {
        Self {
            ratings: [
                Division::Silver.initial_rating(),
                Division::Gold.initial_rating(),
                Division::Platinum.initial_rating(),
            ],
            current: None,
            last_delta: 0,
        }
    }

    pub fn rating(&self, division: Division) -> i32 {
        self.ratings[division.index()]
    }

    /// None while playing casually
    pub fn current_division(&self) -> Option<Division> {
        self.current
    }

    /// Delta applied by the most recent rated game (0 on draw)
    pub fn last_delta(&self) -> i32 {
        self.last_delta
    }

    /// Select a division for rated play. Does not touch the counters.
    pub fn enter_division(&mut self, division: Division) {
        self.current = Some(division);
    }

    /// Back to casual play
    pub fn leave_rated(&mut self) {
        self.current = None;
    }

    /// Read-only `{division: rating}` view
    pub fn snapshot(&self) -> BTreeMap<Division, i32> {
        Division::ALL
            .iter()
            .map(|&division| (division, self.rating(division)))
            .collect()
    }

    /// Apply a rated game's result to the division it was played in, then
    /// check for a division change. At most one transition fires, in fixed
    /// priority order, judged against the played division's own counter.
    /// Returns the applied delta.
    pub fn record_game(&mut self, division: Division, outcome: Outcome) -> i32 {
        let delta = match outcome {
            Outcome::HumanWins => division.win_delta(),
            Outcome::BotWins => division.loss_delta(),
            Outcome::Draw => 0,
        };

        self.ratings[division.index()] += delta;
        self.last_delta = delta;

        let rating = self.rating(division);
        self.current = Some(match division {
            Division::Silver if rating >= SILVER_PROMOTE_AT => Division::Gold,
            Division::Gold if rating >= GOLD_PROMOTE_AT => Division::Platinum,
            Division::Gold if rating < GOLD_DEMOTE_AT => Division::Silver,
            Division::Platinum if rating < PLATINUM_DEMOTE_AT => Division::Gold,
            unchanged => unchanged,
        });

        delta
    }
}
