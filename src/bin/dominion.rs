use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use rust_dominion::{Engine, EngineOptions};

#[derive(Parser)]
#[command(name = "dominion")]
#[command(about = "Play batches of AI-only deck-building games and tally the winners")]
struct Cli {
    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 5)]
    num_games: usize,

    /// Players per game (2-6)
    #[arg(short = 'p', long, default_value_t = 5)]
    num_players: usize,

    /// Base seed; game i uses seed + i
    #[arg(short, long)]
    seed: Option<u64>,

    /// End each game after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn play_one(cli: &Cli, game: usize) -> Result<Vec<String>> {
    let mut options = EngineOptions::new().num_players(cli.num_players);
    if let Some(seed) = cli.seed {
        options = options.seed(seed.wrapping_add(game as u64));
    }
    if let Some(rounds) = cli.max_rounds {
        options = options.max_rounds(rounds);
    }

    let mut engine = Engine::new(options).with_context(|| format!("setting up game {game}"))?;
    engine
        .play_game()
        .with_context(|| format!("playing game {game}"))?;
    log::info!(
        "game {} finished after {} rounds: {}",
        game,
        engine.round(),
        engine.winner_names().join(", ")
    );
    Ok(engine.winner_names())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .format_timestamp(None)
        .init();

    let results: Vec<Vec<String>> = (0..cli.num_games)
        .into_par_iter()
        .map(|game| play_one(&cli, game))
        .collect::<Result<_>>()?;

    let mut wins: FxHashMap<String, usize> = FxHashMap::default();
    for name in results.into_iter().flatten() {
        *wins.entry(name).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = wins.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!(
        "Results over {} games with {} players:",
        cli.num_games, cli.num_players
    );
    for (name, count) in ranked {
        println!("{name:>24}: {count}");
    }
    Ok(())
}
