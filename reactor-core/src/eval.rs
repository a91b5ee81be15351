//! Candidate-move scoring
//!
//! Both bot policies share the same neighbor-scan base value; they differ
//! only in the shaping applied on top (phase/threat vs. difficulty factor).

use crate::board::{Board, Cell, Player};
use serde::{Deserialize, Serialize};

/// Heuristic weights for move scoring
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Weights {
    /// Per human-owned neighbor (cells worth flipping)
    pub enemy_adjacent: f32,
    /// Per empty neighbor (expansion room)
    pub empty_adjacent: f32,
    /// Per bot-owned neighbor (reinforcement, nearly wasted)
    pub own_adjacent: f32,
    /// Early-game bonus for the central 3x3
    pub center_bonus: f32,
    /// Multiplier on the worst single exposure to a counter-flip
    pub threat_scale: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            enemy_adjacent: 10.0,
            empty_adjacent: 4.0,
            own_adjacent: 1.0,
            center_bonus: 4.0,
            threat_scale: 5.0,
        }
    }
}

/// Base value of placing a bot reactor on `cell`: one term per in-bounds
/// orthogonal neighbor, weighted by who owns it.
pub fn base_value(board: &Board, cell: Cell, weights: &Weights) -> f32 {
    let mut value = 0.0;
    for neighbor in cell.neighbors() {
        value += match board.owner(neighbor) {
            Some(Player::Human) => weights.enemy_adjacent,
            None => weights.empty_adjacent,
            Some(Player::Bot) => weights.own_adjacent,
        };
    }
    value
}

/// Threat value: for each human-owned neighbor, count how many of its own
/// neighbors the bot already holds (cells a human reactor there would flip
/// back). Only the worst single exposure counts, deliberately not the sum.
pub fn threat_value(board: &Board, cell: Cell, weights: &Weights) -> f32 {
    let mut threat = 0.0f32;
    for neighbor in cell.neighbors() {
        if board.owner(neighbor) != Some(Player::Human) {
            continue;
        }
        let future_damage = neighbor
            .neighbors()
            .filter(|&n| board.owner(n) == Some(Player::Bot))
            .count();
        threat = threat.max(future_damage as f32 * weights.threat_scale);
    }
    threat
}
