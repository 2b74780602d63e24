mod catalog;
mod config;
mod play;
mod scores;
mod terminal;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quiz_core::model::PlayerName;
use services::{LeaderboardService, QuizLoop, QuizSession};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::play::{PlayOutcome, Stopwatch};
use crate::terminal::TerminalPresentation;

#[derive(Parser, Debug)]
#[command(name = "audio-quiz", author, version, about = "Guess the song before the clip runs out")]
struct Cli {
    /// Config file (TOML); defaults to the platform config directory
    #[arg(long, global = true, env = "AUDIO_QUIZ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Name recorded on the leaderboard
        #[arg(long)]
        player: String,
        /// Fix the question order
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the best scores
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let leaderboard_path = config.leaderboard_path();
    info!(path = %leaderboard_path.display(), "using leaderboard");
    let storage = Storage::json_file(&leaderboard_path);

    match cli.command {
        Commands::Play { player, seed } => run_game(&config, &storage, &player, seed),
        Commands::Leaderboard { top } => {
            let board = LeaderboardService::load(Arc::clone(&storage.leaderboard));
            scores::print_top(&board, top, &mut io::stdout().lock())?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn run_game(config: &AppConfig, storage: &Storage, player: &str, seed: Option<u64>) -> Result<()> {
    let player = PlayerName::new(player).context("invalid --player")?;
    let pool = catalog::load_pool(config)?;
    let mut session = QuizSession::for_pool(
        config.song_duration_secs,
        config.question_count,
        config.option_count,
        pool,
        TerminalPresentation::new(io::stdout()),
    )
    .context("config does not fit the clip catalog")?;
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }

    let mut quiz = QuizLoop::new(
        session,
        LeaderboardService::load(Arc::clone(&storage.leaderboard)),
    );
    let mut stopwatch = Stopwatch::start();
    let outcome = play::run_play(
        &mut quiz,
        player,
        io::stdin().lock(),
        &mut io::stdout(),
        || stopwatch.lap(),
    )?;

    if let Some(err) = quiz.presentation_mut().take_error() {
        return Err(err).context("failed to write to the terminal");
    }

    match outcome {
        PlayOutcome::Finished(record) => {
            let seconds = quiz
                .session()
                .report()
                .map_or(0, |report| report.elapsed().num_seconds());
            println!("saved {record} after {seconds}s");
        }
        PlayOutcome::Quit => println!("quit, score not saved"),
    }
    Ok(())
}
