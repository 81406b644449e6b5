//! Generate perfect mazes and find the way through them
//!
//! Mazes are dug by a randomized backtracker on an odd-sized grid, so every
//! pair of passage squares is joined by exactly one path. The entrance and
//! the exit sit on opposite borders.
//!
//! # Examples
//! ## Generate and solve
//! ```
//! use dig_maze::{find_route, Cell, MazeGenerator};
//!
//! let mut gen = MazeGenerator::new(Some(0));
//! let mut maze = gen.generate_fixed(21, 11).unwrap();
//! let route = find_route(&maze);
//! assert_eq!(route.first(), Some(&maze.start()));
//! assert_eq!(route.last(), Some(&maze.goal()));
//!
//! maze.set_route(route).unwrap();
//! println!("{}", maze);
//! ```
//!
//! ## Walk a maze
//! ```
//! use dig_maze::{Direction, Game, Maze, MoveOutcome};
//!
//! let maze = Maze::parse("
//! 🟫🏃🟫🟫🟫
//! 🟫🟩🟩🟩🟫
//! 🟫🟫🟫🟩🟫
//! 🟫🟩🟩🟩🟫
//! 🟫❎🟫🟫🟫".trim()).unwrap();
//! let mut game = Game::new(maze);
//! assert_eq!(game.move_player(Direction::Left), MoveOutcome::Blocked);
//! assert!(matches!(game.move_player(Direction::Down), MoveOutcome::Moved(_)));
//! ```

pub mod error;
pub mod game;
pub mod maze;
pub mod maze_generator;
pub mod route_finder;
pub mod viewport;

pub use error::{MazeError, Result};
pub use game::{Game, MoveOutcome, PlayerState};
pub use maze::{Cell, Direction, Location, Maze};
pub use maze_generator::{MazeGenerator, Orientation};
pub use route_finder::find_route;
pub use viewport::{FixedViewport, TerminalViewport, Viewport};
