//! Command-line front end for the scoring engine.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use moooves::{score_line, AppConfig, GameMode, GameStatus, Match, Opponent, Pos};

/// Score lines, watch the computer play itself, or replay a move list.
#[derive(Parser)]
#[command(name = "moooves", version, about = "30x30 move-sequence scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single line of marks, e.g. "XXXXXOOOOO"
    ScoreLine {
        /// Up to 30 cells; X and O are marks, anything else is empty
        line: String,
    },

    /// Let the computer opponent play both sides of a fresh match
    SelfPlay {
        /// Stop after this many moves
        #[arg(long)]
        moves: Option<usize>,

        /// Path to TOML configuration file
        #[arg(long, default_value = "moooves.toml")]
        config: PathBuf,
    },

    /// Write the default configuration as a starter TOML file
    InitConfig {
        /// Destination file
        #[arg(default_value = "moooves.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Apply a JSON list of [row, col] moves, X first, and print the snapshot
    Replay {
        /// JSON file holding the move list
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::ScoreLine { line } => {
            let scores = score_line(&line).context("scoring line")?;
            println!("X: {}  O: {}", scores.x, scores.o);
        }
        Command::SelfPlay { moves, config } => self_play(moves, &config)?,
        Command::InitConfig { path, force } => init_config(&path, force)?,
        Command::Replay { file } => replay(&file)?,
    }
    Ok(())
}

fn self_play(max_moves: Option<usize>, config_path: &Path) -> Result<()> {
    let config = AppConfig::load_or_default(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let opponent = Opponent::with_config(config.opponent);
    let mut game = Match::with_config(config.game);
    info!("opponent settings: {:?}", opponent.config());
    game.start();
    let clock = Instant::now();

    while game.status() == GameStatus::Playing {
        if game.time_limit().is_some_and(|limit| clock.elapsed() >= limit) {
            info!("time limit reached");
            game.end();
            break;
        }
        if max_moves.is_some_and(|n| game.history().len() >= n) {
            game.end();
            break;
        }

        let Some(record) = game.play_opponent(&opponent)? else {
            break;
        };
        if record.sequences_scored > 0 {
            info!(
                "move {}: {} at {} scored {} (X={} O={})",
                game.history().len(),
                record.player,
                record.pos,
                record.sequences_scored,
                game.scores().x,
                game.scores().o
            );
        }
    }

    println!("{}", game.board());
    let result = game.result();
    println!(
        "Moves: {}  X: {}  O: {}",
        result.total_moves, result.final_scores.x, result.final_scores.o
    );
    match result.winner {
        Some(winner) => println!("Winner: {winner}"),
        None => println!("Draw"),
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let content = AppConfig::default_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("writing config to {}", path.display()))?;
    info!("wrote default config to {}", path.display());
    Ok(())
}

fn replay(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading moves from {}", path.display()))?;
    let moves: Vec<Pos> = serde_json::from_str(&content)
        .with_context(|| format!("parsing moves in {}", path.display()))?;

    let mut game = Match::new(GameMode::FullGrid);
    game.start();
    for (i, &pos) in moves.iter().enumerate() {
        game.make_move(pos)
            .with_context(|| format!("move {} at {pos}", i + 1))?;
    }
    info!("replayed {} moves", moves.len());

    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}
