#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and solves maze-forge mazes.

use std::{fs, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use maze_forge_core::{CellIndex, MazeRecord};
use maze_forge_grid::Grid;
use maze_forge_rendering::render_maze;
use maze_forge_system_carving::{Carver, Config};
use maze_forge_system_solving::{solve, Solution};
use rand::Rng;
use serde::Serialize;

/// Dimension at or above which the generated maze is no longer printed.
const DEFAULT_RENDER_LIMIT: u32 = 25;

#[derive(Parser, Debug)]
#[command(name = "maze-forge", about = "Generate and solve perfect mazes", version)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Carve a random maze and write its record to a file.
    Generate(GenerateArgs),
    /// Solve a previously generated maze record.
    Solve(SolveArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of rows of the maze.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,
    /// Number of columns of the maze.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,
    /// File the encoded maze record is written to.
    output: PathBuf,
    /// Seed for the carving walk; drawn from system entropy when absent.
    #[arg(long)]
    seed: Option<u64>,
    /// Dimension at or above which the ASCII maze is not printed.
    #[arg(long, default_value_t = DEFAULT_RENDER_LIMIT)]
    render_limit: u32,
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// File containing the encoded maze record.
    input: PathBuf,
    /// Emit the solution as a JSON object instead of text.
    #[arg(long)]
    json: bool,
}

/// Entry point for the maze-forge command-line interface.
fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        CliCommand::Generate(args) => generate(args),
        CliCommand::Solve(args) => solve_record(args),
    }
}

fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut grid = Grid::new(args.rows, args.cols)?;
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut carver = Carver::new(Config::new(seed));
    let carved = carver.carve(&mut grid);
    let record = grid.to_record(carved.start, carved.end);

    if args.rows < args.render_limit && args.cols < args.render_limit {
        println!("{}", render_maze(&grid, carved.start, carved.end, None));
        println!();
    }
    println!("seed: {seed}");

    fs::write(&args.output, record.encode())
        .with_context(|| format!("could not write maze record to {}", args.output.display()))?;
    println!("maze record written to {}", args.output.display());

    Ok(())
}

fn solve_record(args: SolveArgs) -> anyhow::Result<()> {
    let started = Instant::now();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("could not read maze record from {}", args.input.display()))?;
    let record = MazeRecord::decode(&text)
        .with_context(|| format!("invalid maze record in {}", args.input.display()))?;
    let grid = Grid::from_record(&record)?;
    let solution = solve(&grid, record.start, record.end)?;
    let elapsed_ms = started.elapsed().as_millis();

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&SolveReport::new(&solution, elapsed_ms))?
        );
    } else {
        println!(
            "{}",
            render_maze(&grid, record.start, record.end, Some(&solution.path))
        );
        println!();
        println!("( {} )", format_path(&solution.path));
        println!("solution length: {}", solution.solution_length);
        println!("steps taken: {}", solution.steps_taken);
        println!("elapsed: {elapsed_ms}ms");
    }

    Ok(())
}

fn format_path(path: &[CellIndex]) -> String {
    path.iter()
        .map(|index| index.get().to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

/// Machine-readable solve report emitted by the `--json` flag.
#[derive(Debug, Serialize)]
struct SolveReport {
    path: Vec<u32>,
    solution_length: usize,
    steps_taken: usize,
    elapsed_ms: u128,
}

impl SolveReport {
    fn new(solution: &Solution, elapsed_ms: u128) -> Self {
        Self {
            path: solution.path.iter().map(|index| index.get()).collect(),
            solution_length: solution.solution_length,
            steps_taken: solution.steps_taken,
            elapsed_ms,
        }
    }
}
