//! Turn state machine and move legality

use crate::board::{Board, Cell, Player, TOTAL_MOVES};
use crate::rating::{Division, RatingProfile};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a game is scored at the end
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Casual,
    Rated(Division),
}

/// Final result of a finished game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    BotWins,
    Draw,
}

/// Why a move was rejected. All variants are recoverable; the session is
/// left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: i8, col: i8 },
    #[error("cell ({row}, {col}) is already owned")]
    Occupied { row: i8, col: i8 },
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Player),
    #[error("the game is over")]
    GameOver,
}

/// Receipt for an applied move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReceipt {
    pub cell: Cell,
    /// Cells whose owner changed (the placed cell plus flipped neighbors)
    pub cells_changed: u32,
    /// True when this was the final ply of the game
    pub finished: bool,
}

/// One game's lifecycle: board, turn order, move count, outcome.
///
/// Created fresh per game and discarded at the next reset. The rating
/// profile outlives sessions and is only touched by rated finalization.
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    mode: GameMode,
    move_count: u32,
    current_turn: Player,
    active: bool,
    winner: Option<Outcome>,
}

impl Session {
    pub fn new(mode: GameMode, first: Player) -> Self {
        Self {
            board: Board::new(),
            mode,
            move_count: 0,
            current_turn: first,
            active: true,
            winner: None,
        }
    }

    /// Uniform 50/50 first-mover pick. The animation around it belongs to
    /// the driver; the engine's contract is only the coin flip.
    pub fn toss<R: Rng>(rng: &mut R) -> Player {
        if rng.gen::<bool>() {
            Player::Human
        } else {
            Player::Bot
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Valid only once the session is inactive
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    /// Live (human, bot) cell counts, recomputed from the board
    pub fn scores(&self) -> (u32, u32) {
        (
            self.board.count_owned(Player::Human),
            self.board.count_owned(Player::Bot),
        )
    }

    // ========================================================================
    // MOVE ENGINE
    // ========================================================================

    /// Validate and apply one ply. Validation fully precedes mutation, so a
    /// rejected move leaves no partial state behind.
    ///
    /// The profile is only consulted when the final ply of a rated game
    /// triggers rating finalization.
    pub fn submit_move(
        &mut self,
        cell: Cell,
        player: Player,
        profile: &mut RatingProfile,
    ) -> Result<MoveReceipt, MoveError> {
        if !cell.is_valid() {
            return Err(MoveError::OutOfBounds {
                row: cell.row,
                col: cell.col,
            });
        }
        if !self.active {
            return Err(MoveError::GameOver);
        }
        if player != self.current_turn {
            return Err(MoveError::NotYourTurn(player));
        }
        if !self.board.is_empty(cell) {
            return Err(MoveError::Occupied {
                row: cell.row,
                col: cell.col,
            });
        }

        let cells_changed = self.board.activate_reactor(cell, player);
        self.move_count += 1;

        let finished = self.move_count >= TOTAL_MOVES;
        if finished {
            self.finalize(profile);
        } else {
            self.current_turn = self.current_turn.opponent();
        }

        Ok(MoveReceipt {
            cell,
            cells_changed,
            finished,
        })
    }

    fn finalize(&mut self, profile: &mut RatingProfile) {
        self.active = false;

        let (human, bot) = self.scores();
        let outcome = if human > bot {
            Outcome::HumanWins
        } else if bot > human {
            Outcome::BotWins
        } else {
            Outcome::Draw
        };
        self.winner = Some(outcome);

        if let GameMode::Rated(division) = self.mode {
            profile.record_game(division, outcome);
        }
    }
}
