//! Simulate command - batch games between a scripted opponent and the bot
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_all(), report_results(), profile load/save
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use reactor_core::{
    Cell, Division, Engine, GameMode, Outcome, Player, RatingProfile,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Play rated games in this division (silver, gold, platinum)
    #[arg(long, value_name = "DIVISION")]
    pub rated: Option<Division>,

    /// RNG seed (bot, toss, and scripted opponent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load/save the rating profile as JSON at this path
    #[arg(long, value_name = "FILE")]
    pub ratings: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, serde::Serialize)]
struct GameRecord {
    game_number: usize,
    outcome: Outcome,
    human_score: u32,
    bot_score: u32,
    first: Player,
    rating_delta: i32,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SimResults {
    games: Vec<GameRecord>,
    human_wins: usize,
    bot_wins: usize,
    draws: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Build the engine (optionally restoring a saved rating profile)
/// 2. Play the requested games
/// 3. Persist ratings and report results
pub fn run(args: SimulateArgs) -> Result<()> {
    let mut rng = create_rng(args.seed);
    let mut engine = Engine::with_seed(args.seed.unwrap_or(42));

    if let Some(path) = &args.ratings {
        if path.exists() {
            engine.set_rating_profile(load_profile(path)?);
            tracing::info!("Loaded rating profile from {}", path.display());
        }
    }

    tracing::info!(
        "Starting simulation: {} games, mode={}",
        args.games,
        match args.rated {
            Some(division) => format!("rated/{division}"),
            None => "casual".to_string(),
        }
    );

    let results = play_all(&mut engine, &mut rng, &args)?;

    if let Some(path) = &args.ratings {
        save_profile(engine.rating_profile(), path)?;
        tracing::info!("Saved rating profile to {}", path.display());
    }

    report_results(&results, engine.rating_profile(), &args);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_all(
    engine: &mut Engine,
    rng: &mut ChaCha8Rng,
    args: &SimulateArgs,
) -> Result<SimResults> {
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(engine, rng, args.rated, game_num + 1)?;

        tracing::info!(
            "Game {}: {:?} ({}-{})",
            record.game_number,
            record.outcome,
            record.human_score,
            record.bot_score
        );

        games.push(record);
    }

    Ok(compute_statistics(games))
}

fn load_profile(path: &Path) -> Result<RatingProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rating profile: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse rating profile: {}", path.display()))
}

fn save_profile(profile: &RatingProfile, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write rating profile: {}", path.display()))
}

fn report_results(results: &SimResults, profile: &RatingProfile, args: &SimulateArgs) {
    if args.json {
        print_json_results(results, profile);
    } else {
        print_text_results(results, profile, args.rated);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game: the scripted opponent picks uniformly among empty cells,
/// the bot uses its policy. Casual games toss for the first mover; rated
/// games start with the scripted side, like the original menu flow.
fn play_single_game(
    engine: &mut Engine,
    rng: &mut ChaCha8Rng,
    rated: Option<Division>,
    game_number: usize,
) -> Result<GameRecord> {
    let first = match rated {
        Some(division) => {
            engine.new_game(GameMode::Rated(division), Player::Human);
            Player::Human
        }
        None => engine.new_game_with_toss(GameMode::Casual, rng),
    };

    while engine.is_active() {
        if engine.current_turn() == Player::Bot {
            engine.run_bot_turn();
        } else {
            let cells: Vec<Cell> = engine.session().board().empty_cells().collect();
            let cell = cells[rng.gen_range(0..cells.len())];
            engine
                .submit_human_move(cell.row, cell.col)
                .context("scripted move was rejected")?;
        }
    }

    let (human_score, bot_score) = engine.scores();
    let outcome = engine
        .winner()
        .context("finished game has no winner recorded")?;

    Ok(GameRecord {
        game_number,
        outcome,
        human_score,
        bot_score,
        first,
        rating_delta: if rated.is_some() {
            engine.rating_profile().last_delta()
        } else {
            0
        },
    })
}

fn compute_statistics(games: Vec<GameRecord>) -> SimResults {
    let human_wins = games
        .iter()
        .filter(|g| g.outcome == Outcome::HumanWins)
        .count();
    let bot_wins = games
        .iter()
        .filter(|g| g.outcome == Outcome::BotWins)
        .count();
    let draws = games.iter().filter(|g| g.outcome == Outcome::Draw).count();

    SimResults {
        games,
        human_wins,
        bot_wins,
        draws,
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn print_json_results(results: &SimResults, profile: &RatingProfile) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        human_wins: usize,
        bot_wins: usize,
        draws: usize,
        bot_win_rate: f32,
        ratings: std::collections::BTreeMap<Division, i32>,
        games: &'a [GameRecord],
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        human_wins: results.human_wins,
        bot_wins: results.bot_wins,
        draws: results.draws,
        bot_win_rate: rate(results.bot_wins, total),
        ratings: profile.snapshot(),
        games: &results.games,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!("Failed to serialize results: {e}"),
    }
}

fn print_text_results(results: &SimResults, profile: &RatingProfile, rated: Option<Division>) {
    let total = results.games.len();

    println!("\n=== Simulation Results ===");
    println!("Total games:    {total}");
    println!(
        "Opponent wins:  {} ({:.1}%)",
        results.human_wins,
        rate(results.human_wins, total) * 100.0
    );
    println!(
        "Bot wins:       {} ({:.1}%)",
        results.bot_wins,
        rate(results.bot_wins, total) * 100.0
    );
    println!("Draws:          {}", results.draws);

    if let Some(division) = rated {
        println!(
            "\n{division} rating: {} (division now: {})",
            profile.rating(division),
            match profile.current_division() {
                Some(current) => current.to_string(),
                None => "none".to_string(),
            }
        );
    }
}

fn rate(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32
    } else {
        0.0
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
