//! Play command - interactive game against the bot

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use reactor_core::{
    Cell, Division, Engine, GameMode, Outcome, Player, Session, SIZE, TOTAL_MOVES,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Play a rated game in this division (silver, gold, platinum)
    #[arg(long, value_name = "DIVISION")]
    pub rated: Option<Division>,

    /// Flip a coin for who moves first (casual games; rated games start
    /// with you)
    #[arg(long)]
    pub toss: bool,

    /// RNG seed for the bot and the toss
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let mut rng = create_rng(args.seed);
    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(seed),
        None => Engine::with_seed(rand::random()),
    };

    let mode = match args.rated {
        Some(division) => GameMode::Rated(division),
        None => GameMode::Casual,
    };

    let first = if args.toss && args.rated.is_none() {
        let first = engine.new_game_with_toss(mode, &mut rng);
        println!(
            "Toss: {} moves first",
            if first == Player::Human { "you" } else { "the bot" }
        );
        first
    } else {
        engine.new_game(mode, Player::Human);
        Player::Human
    };

    if let Some(division) = args.rated {
        println!(
            "Rated game, {division} division (rating {})",
            engine.rating_profile().rating(division)
        );
    }
    tracing::debug!(?mode, ?first, "game started");

    let stdin = io::stdin();
    while engine.is_active() {
        render(engine.session());

        if engine.current_turn() == Player::Bot {
            if let Some(receipt) = engine.run_bot_turn() {
                println!(
                    "Bot places a reactor at {} {}",
                    receipt.cell.row, receipt.cell.col
                );
            }
            continue;
        }

        match read_move(&stdin)? {
            Some(cell) => {
                if let Err(reason) = engine.submit_human_move(cell.row, cell.col) {
                    println!("Rejected: {reason}");
                }
            }
            None => println!("Enter a move as: row col (0-{})", SIZE - 1),
        }
    }

    render(engine.session());
    report_outcome(&engine, args.rated);
    Ok(())
}

/// Prompt for and parse one "row col" line. Ok(None) on unparseable input.
fn read_move(stdin: &io::Stdin) -> Result<Option<Cell>> {
    print!("Your move (row col): ");
    io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    let read = stdin
        .lock()
        .read_line(&mut line)
        .context("reading move from stdin")?;
    if read == 0 {
        bail!("input closed before the game ended");
    }

    let mut parts = line.split_whitespace();
    let (Some(row), Some(col)) = (parts.next(), parts.next()) else {
        return Ok(None);
    };
    match (row.parse::<i8>(), col.parse::<i8>()) {
        (Ok(row), Ok(col)) => Ok(Some(Cell::new(row, col))),
        _ => Ok(None),
    }
}

fn render(session: &Session) {
    let (human, bot) = session.scores();
    println!(
        "\nYou {human} - Bot {bot}   (move {}/{})",
        session.move_count(),
        TOTAL_MOVES
    );

    print!("  ");
    for col in 0..SIZE {
        print!(" {col}");
    }
    println!();
    for row in 0..SIZE as i8 {
        print!(" {row}");
        for col in 0..SIZE as i8 {
            let cell = Cell::new(row, col);
            let glyph = match (session.board().owner(cell), session.board().has_reactor(cell)) {
                (Some(Player::Human), true) => 'H',
                (Some(Player::Human), false) => 'h',
                (Some(Player::Bot), true) => 'B',
                (Some(Player::Bot), false) => 'b',
                (None, _) => '.',
            };
            print!(" {glyph}");
        }
        println!();
    }
}

fn report_outcome(engine: &Engine, rated: Option<Division>) {
    match engine.winner() {
        Some(Outcome::HumanWins) => println!("\nYou win!"),
        Some(Outcome::BotWins) => println!("\nThe bot wins."),
        Some(Outcome::Draw) => println!("\nDraw."),
        None => {}
    }

    if let Some(division) = rated {
        let profile = engine.rating_profile();
        let delta = profile.last_delta();
        println!(
            "Rating: {} ({}{delta})",
            profile.rating(division),
            if delta >= 0 { "+" } else { "" }
        );
        match profile.current_division() {
            Some(current) if current != division => {
                println!("Division change: {division} -> {current}");
            }
            _ => {}
        }
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
