//! Driver-facing facade
//!
//! Composes session, bot, and rating profile into one handle. Sessions are
//! rebuilt on every new game; the profile and the bot's RNG persist for the
//! life of the engine.

use crate::ai::BotAi;
use crate::board::{Cell, Player};
use crate::rating::RatingProfile;
use crate::session::{GameMode, MoveError, MoveReceipt, Outcome, Session};
use rand::Rng;

pub struct Engine {
    session: Session,
    profile: RatingProfile,
    ai: BotAi,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            session: Session::new(GameMode::Casual, Player::Human),
            profile: RatingProfile::new(),
            ai: BotAi::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            session: Session::new(GameMode::Casual, Player::Human),
            profile: RatingProfile::new(),
            ai: BotAi::with_seed(seed),
        }
    }

    /// Start a fresh game. The board and turn state reset; the rating
    /// profile carries over (its current division follows the mode).
    pub fn new_game(&mut self, mode: GameMode, first: Player) {
        match mode {
            GameMode::Rated(division) => self.profile.enter_division(division),
            GameMode::Casual => self.profile.leave_rated(),
        }
        self.session = Session::new(mode, first);
    }

    /// Start a fresh game with a coin-flip first mover, returning the
    /// winner of the toss for the driver to display.
    pub fn new_game_with_toss<R: Rng>(&mut self, mode: GameMode, rng: &mut R) -> Player {
        let first = Session::toss(rng);
        self.new_game(mode, first);
        first
    }

    pub fn submit_human_move(&mut self, row: i8, col: i8) -> Result<MoveReceipt, MoveError> {
        self.session
            .submit_move(Cell::new(row, col), Player::Human, &mut self.profile)
    }

    /// Advance the bot one ply. None when it is not the bot's turn, the
    /// game is over, or no legal move exists.
    pub fn run_bot_turn(&mut self) -> Option<MoveReceipt> {
        self.ai.take_turn(&mut self.session, &mut self.profile)
    }

    // ========================================================================
    // STATE SNAPSHOTS
    // ========================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_turn(&self) -> Player {
        self.session.current_turn()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn winner(&self) -> Option<Outcome> {
        self.session.winner()
    }

    /// Live (human, bot) scores
    pub fn scores(&self) -> (u32, u32) {
        self.session.scores()
    }

    pub fn rating_profile(&self) -> &RatingProfile {
        &self.profile
    }

    /// Replace the profile wholesale, e.g. with one a driver loaded from
    /// disk. Persistence itself stays outside the engine.
    pub fn set_rating_profile(&mut self, profile: RatingProfile) {
        self.profile = profile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TOTAL_MOVES;
    use crate::rating::Division;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Drive a game to completion: bot plays itself, the "human" side takes
    /// the first empty cell.
    fn finish_game(engine: &mut Engine) {
        while engine.is_active() {
            if engine.current_turn() == Player::Bot {
                assert!(engine.run_bot_turn().is_some());
            } else {
                let cell = engine
                    .session()
                    .board()
                    .empty_cells()
                    .next()
                    .unwrap();
                engine.submit_human_move(cell.row, cell.col).unwrap();
            }
        }
    }

    #[test]
    fn test_new_game_resets_session_not_profile() {
        let mut engine = Engine::with_seed(1);
        engine.new_game(GameMode::Rated(Division::Silver), Player::Human);
        finish_game(&mut engine);
        let silver_after = engine.rating_profile().rating(Division::Silver);

        engine.new_game(GameMode::Casual, Player::Human);
        assert!(engine.is_active());
        assert_eq!(engine.scores(), (0, 0));
        assert_eq!(engine.session().move_count(), 0);
        assert_eq!(engine.rating_profile().rating(Division::Silver), silver_after);
        assert_eq!(engine.rating_profile().current_division(), None);
    }

    #[test]
    fn test_rated_game_sets_current_division() {
        let mut engine = Engine::with_seed(1);
        engine.new_game(GameMode::Rated(Division::Gold), Player::Human);
        assert_eq!(
            engine.rating_profile().current_division(),
            Some(Division::Gold)
        );
    }

    #[test]
    fn test_bot_noop_out_of_turn() {
        let mut engine = Engine::with_seed(1);
        engine.new_game(GameMode::Casual, Player::Human);
        assert!(engine.run_bot_turn().is_none());
        assert_eq!(engine.session().move_count(), 0);
    }

    #[test]
    fn test_full_game_reaches_total_moves() {
        let mut engine = Engine::with_seed(5);
        engine.new_game(GameMode::Casual, Player::Bot);
        finish_game(&mut engine);
        assert_eq!(engine.session().move_count(), TOTAL_MOVES);
        assert!(engine.winner().is_some());
    }

    #[test]
    fn test_toss_starts_game_with_returned_player() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut engine = Engine::with_seed(1);
        let first = engine.new_game_with_toss(GameMode::Casual, &mut rng);
        assert_eq!(engine.current_turn(), first);
    }
}
