//! CLI for maze generation

use clap::Parser;
use dig_maze::{find_route, MazeGenerator, TerminalViewport};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Perfect maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated field width
    #[arg(long, default_value_t = 21)]
    width: usize,

    /// Generated field height
    #[arg(long, default_value_t = 15)]
    height: usize,

    /// Fit the maze to the terminal, ignoring width and height
    #[arg(long)]
    fit: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Mark the shortest route on the maze
    #[arg(long)]
    solve: bool,

    /// Log generation progress
    #[arg(short, long)]
    verbose: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .env()
        .init()?;

    let mut gen = MazeGenerator::new(args.seed);
    let mut maze = if args.fit {
        gen.generate_responsive(&TerminalViewport)?
    } else {
        gen.generate_fixed(args.width, args.height)?
    };

    if args.solve {
        let route = find_route(&maze);
        let steps = route.len().saturating_sub(1);
        maze.set_route(route)?;
        println!("{}", maze);
        println!("The shortest path is {} steps.", steps);
    } else {
        println!("{}", maze);
    }
    Ok(())
}
