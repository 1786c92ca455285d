//! Chess Perft - counts move-generator leaf nodes.
//!
//! Runs perft on a single position, optionally split per root move, or
//! checks every position of a suite file against its reference counts.

mod config;

use anyhow::{bail, Context};
use chess_engine::{perft, perft_divide, Position};
use clap::Parser;
use config::Suite;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Chess Perft - validates the move generator by counting leaf nodes.
#[derive(Parser)]
#[command(name = "chess-perft")]
#[command(about = "Counts legal move-tree leaf nodes for chess positions")]
struct Args {
    /// Position to search, in FEN (defaults to the starting position)
    #[arg(long, conflicts_with = "suite")]
    fen: Option<String>,

    /// Search depth in plies; caps the suite depth when running a suite
    #[arg(long)]
    depth: Option<u32>,

    /// Print the node count below every root move
    #[arg(long, conflicts_with = "suite")]
    divide: bool,

    /// TOML suite of positions with reference counts ("standard" for the bundled one)
    #[arg(long)]
    suite: Option<PathBuf>,
}

const DEFAULT_DEPTH: u32 = 4;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    match &args.suite {
        Some(path) => run_suite(path, args.depth),
        None => run_single(&args),
    }
}

fn run_single(args: &Args) -> anyhow::Result<()> {
    let position = match &args.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("invalid FEN: {}", fen))?,
        None => Position::startpos(),
    };
    let depth = args.depth.unwrap_or(DEFAULT_DEPTH);
    tracing::info!("Position: {}", position.to_fen());
    tracing::info!("Depth: {}", depth);

    let start = Instant::now();
    let nodes = if args.divide {
        let results = perft_divide(&position, depth);
        for (mv, count) in &results {
            println!("{}: {}", mv, count);
        }
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft(&position, depth)
    };
    let elapsed = start.elapsed();

    println!();
    println!("Nodes searched: {}", nodes);
    tracing::info!("Finished in {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_suite(path: &Path, depth_cap: Option<u32>) -> anyhow::Result<()> {
    let suite = if path.as_os_str() == "standard" {
        Suite::standard()?
    } else {
        Suite::load(path).with_context(|| format!("loading suite {:?}", path))?
    };
    tracing::info!("Suite: {:?} ({} positions)", path, suite.positions.len());

    let mut failures = 0usize;
    for entry in &suite.positions {
        let position = entry.position()?;
        for (depth, expected) in entry.checks() {
            if depth_cap.is_some_and(|cap| depth > cap) {
                break;
            }
            let start = Instant::now();
            let nodes = perft(&position, depth);
            let verdict = if nodes == expected { "ok" } else { "FAIL" };
            println!(
                "{:<12} depth {:>2}  {:>12}  expected {:>12}  {}",
                entry.name, depth, nodes, expected, verdict
            );
            tracing::debug!(
                name = %entry.name,
                depth,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "perft finished"
            );
            if nodes != expected {
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} perft check(s) failed", failures);
    }
    tracing::info!("All suite checks passed");
    Ok(())
}
