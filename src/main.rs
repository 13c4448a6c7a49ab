use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use taskboard::{Action, Board, BoardConfig, BoardEngine, mock_board, sample_board};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "taskboard", about = "Replay task board actions and print the resulting board")]
struct Cli {
    /// Start from a board snapshot (JSON) instead of the sample board.
    #[arg(long, conflicts_with = "mock_tasks")]
    snapshot: Option<PathBuf>,

    /// Start from a board holding this many random tasks.
    #[arg(long)]
    mock_tasks: Option<usize>,

    /// Seed for --mock-tasks.
    #[arg(long, requires = "mock_tasks")]
    seed: Option<u64>,

    /// JSON array of actions to apply in order.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print compact instead of pretty JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = BoardConfig::from_env();
    let board = initial_board(&cli)?;
    tracing::info!(columns = board.columns().len(), tasks = board.len(), "board ready");

    let mut engine = BoardEngine::with_config(board, config);
    if let Some(path) = &cli.script {
        let actions: Vec<Action> = serde_json::from_str(&read(path)?)?;
        for (step, action) in actions.iter().enumerate() {
            let change = engine.dispatch(action);
            tracing::info!(step, op = action.name(), ?change, "replayed");
        }
    }

    for column in engine.board().columns() {
        if let Some(wip) = engine.wip(column.id.as_str()) {
            tracing::info!(column = %column.id, count = wip.count, limit = wip.limit, level = ?wip.level, "wip");
        }
    }

    let board = engine.into_board();
    let rendered = if cli.compact { serde_json::to_string(&board)? } else { serde_json::to_string_pretty(&board)? };
    println!("{rendered}");
    Ok(())
}

fn initial_board(cli: &Cli) -> Result<Board, CliError> {
    if let Some(path) = &cli.snapshot {
        return Ok(serde_json::from_str(&read(path)?)?);
    }
    Ok(match (cli.mock_tasks, cli.seed) {
        (Some(count), Some(seed)) => mock_board(count, &mut StdRng::seed_from_u64(seed)),
        (Some(count), None) => mock_board(count, &mut rand::rng()),
        (None, _) => sample_board(),
    })
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}
