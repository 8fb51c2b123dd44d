//! Kifu-Rust: command-line front end for the game record engine.
//!
//! ## Usage
//!
//! - `kifu board game.sgf --moves 50` - Show the position after 50 moves
//! - `kifu moves game.sgf` - List main-line moves
//! - `kifu mainline game.sgf` - Print the record without variations
//! - `kifu turn game.sgf` - Print whose move is next
//! - `kifu check game.sgf` - Report structural defects
//! - `kifu coord pd` - Convert between SGF and display coordinates
//!
//! Every FILE argument accepts `-` for stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use kifu_rust::board::Color;
use kifu_rust::coord::{display_to_xy, sgf_to_xy, xy_to_display, xy_to_sgf};
use kifu_rust::mainline::extract_main_route;
use kifu_rust::moves::{GameRecord, Move};
use kifu_rust::sgf::parse_report;
use kifu_rust::turn::next_turn_with;

/// Kifu-Rust: Go game record engine
#[derive(Parser)]
#[command(name = "kifu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log skipped moves and tolerated defects to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the board after replaying the main line
    Board {
        file: PathBuf,
        /// Replay only the first N moves
        #[arg(long)]
        moves: Option<usize>,
        /// Print the grid as JSON (black 1, white -1, empty 0, indexed [x][y])
        #[arg(long)]
        json: bool,
    },
    /// List the main-line moves
    Moves {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the record with every variation removed
    Mainline { file: PathBuf },
    /// Print whose move is next
    Turn {
        file: PathBuf,
        /// Number of moves already played
        #[arg(long)]
        moves: Option<usize>,
        /// Explicit turn, overriding everything else
        #[arg(long)]
        turn: Option<Color>,
    },
    /// Check a record for structural defects
    Check { file: PathBuf },
    /// Convert a coordinate between SGF ("pd") and display ("Q16") form
    Coord { coord: String },
}

#[derive(Serialize)]
struct BoardReport {
    size: usize,
    applied: usize,
    grid: Vec<Vec<i8>>,
    last_move: Option<Move>,
}

#[derive(Serialize)]
struct MoveReport {
    number: usize,
    color: Color,
    x: usize,
    y: usize,
    sgf: Option<String>,
    display: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Board { file, moves, json } => {
            let record = GameRecord::from_sgf(&read_record(&file)?);
            let sim = record.simulate(moves);
            if json {
                let report = BoardReport {
                    size: sim.board.size(),
                    applied: sim.applied,
                    grid: sim.board.to_matrix(),
                    last_move: sim.last_move,
                };
                println!("{}", serde_json::to_string(&report)?);
            } else {
                print!("{}", sim.board.render(sim.last_move.map(|m| m.point())));
                println!(
                    "moves {}/{}  black {}  white {}",
                    sim.applied,
                    record.moves.len(),
                    sim.board.count(Color::Black),
                    sim.board.count(Color::White)
                );
            }
        }
        Commands::Moves { file, json } => {
            let record = GameRecord::from_sgf(&read_record(&file)?);
            let reports: Vec<MoveReport> = record
                .moves
                .iter()
                .enumerate()
                .map(|(i, mv)| MoveReport {
                    number: i + 1,
                    color: mv.color,
                    x: mv.x,
                    y: mv.y,
                    sgf: mv.sgf_coord(record.size),
                    display: mv.display_coord(record.size),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string(&reports)?);
            } else {
                for r in &reports {
                    println!(
                        "{:>4} {} {} ({})",
                        r.number,
                        r.color.letter(),
                        r.display.as_deref().unwrap_or("?"),
                        r.sgf.as_deref().unwrap_or("?")
                    );
                }
            }
        }
        Commands::Mainline { file } => {
            println!("{}", extract_main_route(&read_record(&file)?));
        }
        Commands::Turn { file, moves, turn } => {
            println!("{}", next_turn_with(&read_record(&file)?, turn, moves));
        }
        Commands::Check { file } => {
            let text = read_record(&file)?;
            let (collection, issues) = parse_report(&text);
            for issue in &issues {
                eprintln!("{}: {issue}", file.display());
            }
            if !issues.is_empty() {
                bail!("{} structural defect(s)", issues.len());
            }
            if collection.is_empty() {
                bail!("{}: no game tree found", file.display());
            }
            let record = GameRecord::from_sgf(&text);
            println!(
                "ok: {} tree(s), {} nodes, {} moves on {}x{}",
                collection.roots().len(),
                collection.node_count(),
                record.moves.len(),
                record.size,
                record.size
            );
        }
        Commands::Coord { coord } => convert_coord(&coord)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_record(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read record from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn convert_coord(coord: &str) -> Result<()> {
    if let Some((x, y)) = display_to_xy(coord) {
        let sgf = xy_to_sgf(x, y).context("display coordinate has no SGF form")?;
        println!("{sgf} ({x}, {y})");
    } else if let Some((x, y)) = sgf_to_xy(coord) {
        let display = xy_to_display(x, y).context("SGF coordinate has no display form")?;
        println!("{display} ({x}, {y})");
    } else {
        bail!("'{coord}' is neither an SGF nor a display coordinate");
    }
    Ok(())
}
