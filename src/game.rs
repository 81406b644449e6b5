//! Player movement through a generated maze

use log::debug;

use crate::maze::{Direction, Location, Maze};
use crate::route_finder::find_route;

/// Where the player is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Active(Location),
    /// Player gave up; no further moves are accepted
    Retired,
}

/// Result of a movement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Location),
    /// Wall or grid edge in the way
    Blocked,
    ReachedGoal(Location),
    /// Player has retired, the request was ignored
    Retired,
}

/// A single play-through of a maze
pub struct Game {
    maze: Maze,
    player: PlayerState,
    /// Number of moves that the player has made
    steps: usize,
}

impl Game {
    pub fn new(maze: Maze) -> Self {
        let player = PlayerState::Active(maze.start());
        Self {
            maze,
            player,
            steps: 0,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> PlayerState {
        self.player
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Player stands on the goal
    pub fn is_won(&self) -> bool {
        self.player == PlayerState::Active(self.maze.goal())
    }

    /// Move the player one square, unless a wall is in the way
    ///
    /// Once the goal is reached, further moves are still accepted; it is up
    /// to the caller to end the game.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let PlayerState::Active(position) = self.player else {
            return MoveOutcome::Retired;
        };
        let target = position
            .step(direction, self.maze.width(), self.maze.height())
            .filter(|next| {
                self.maze
                    .cell_at(next.x, next.y)
                    .is_ok_and(|cell| cell.is_traversable())
            });
        let Some(target) = target else {
            return MoveOutcome::Blocked;
        };

        self.player = PlayerState::Active(target);
        self.steps += 1;
        if target == self.maze.goal() {
            debug!("Goal reached in {} steps", self.steps);
            MoveOutcome::ReachedGoal(target)
        } else {
            MoveOutcome::Moved(target)
        }
    }

    /// Give up the game
    pub fn retire(&mut self) {
        self.player = PlayerState::Retired;
    }

    /// Solve the maze and show the solution on the grid
    ///
    /// The route is computed only once per game.
    pub fn reveal_route(&mut self) -> &[Location] {
        if !self.maze.has_route() {
            let route = find_route(&self.maze);
            // Route squares come from the maze itself
            if let Err(err) = self.maze.set_route(route) {
                debug!("Could not overlay route: {}", err);
            }
        }
        self.maze.route()
    }
}
