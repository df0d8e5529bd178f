//! Standalone random-vs-random match runner.
//!
//! Run with:
//! `cargo run --release --bin random_match -- --variant 960 --seed 42`
//! `RUST_LOG=debug cargo run --bin random_match`

use clap::Parser;

use quantum_chess::engines::engine_random::RandomOpponent;
use quantum_chess::errors::ChessResult;
use quantum_chess::game_state::variants::Variant;
use quantum_chess::utils::match_harness::{play_match, MatchConfig, MatchOutcome};
use quantum_chess::utils::render_game_state::render_game_state;

#[derive(Parser, Debug)]
#[command(about = "Play two random opponents against each other")]
struct Args {
    /// Seeds the starting position and both opponents.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// `standard` or `960`.
    #[arg(long, default_value = "standard")]
    variant: Variant,

    #[arg(long, default_value_t = 300)]
    max_plies: u16,

    /// Print every move played.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let mut white = RandomOpponent::seeded(args.seed.wrapping_mul(2));
    let mut black = RandomOpponent::seeded(args.seed.wrapping_mul(2).wrapping_add(1));
    let config = MatchConfig {
        variant: args.variant,
        max_plies: args.max_plies,
    };

    let result = play_match(&mut white, &mut black, args.seed, &config)?;

    println!("{}\n", render_game_state(&result.initial_state));
    if args.verbose {
        for (ply, mv) in result.moves.iter().enumerate() {
            println!("{:>4}. {mv}", ply + 1);
        }
        println!();
    }
    println!("{}\n", render_game_state(&result.final_state));

    let summary = match result.outcome {
        MatchOutcome::Win(color) => format!("{color} wins"),
        MatchOutcome::Forfeit { offender } => format!("{offender} forfeits"),
        MatchOutcome::DrawMaxPlies => format!("draw after {} plies", args.max_plies),
    };
    println!("plies={} result: {summary}", result.moves.len());
    println!(
        "white_ms={:.3} black_ms={:.3}",
        result.white_total_time_ns as f64 / 1_000_000.0,
        result.black_total_time_ns as f64 / 1_000_000.0
    );
    Ok(())
}
