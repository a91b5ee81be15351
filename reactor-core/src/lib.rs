//! REACTOR Core - Game engine and AI
//!
//! This crate provides the core game logic for REACTOR:
//! - Board state (7x7 grid with reactor marks)
//! - Move legality and turn state machine
//! - Move scoring heuristics for the computer opponent
//! - Two bot policies (phase-aware standard, difficulty-scaled rated)
//! - Division ratings with promotion/demotion

pub mod ai;
pub mod board;
pub mod engine;
pub mod eval;
pub mod rating;
pub mod session;

// Re-exports for convenient access
pub use ai::{difficulty_factor, BotAi};
pub use board::{Board, Cell, Player, DIRECTIONS, SIZE, TOTAL_MOVES};
pub use engine::Engine;
pub use eval::{base_value, threat_value, Weights};
pub use rating::{Division, RatingProfile};
pub use session::{GameMode, MoveError, MoveReceipt, Outcome, Session};
