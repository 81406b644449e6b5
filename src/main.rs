//! CLI for maze solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use dig_maze::{find_route, Maze};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Find the shortest way through a rendered maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log solver progress
    #[arg(short, long)]
    verbose: bool,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print output
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

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Could not read {}", args.file.display()))?
    };
    let mut maze = Maze::parse(text.trim())?;

    let route = find_route(&maze);
    if route.is_empty() {
        println!("There is no way from the start to the goal.");
        return Ok(());
    }
    let steps = route.len() - 1;
    maze.set_route(route)?;
    println!("{}", maze);
    println!("The shortest path is {} steps.", steps);
    Ok(())
}
