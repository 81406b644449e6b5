//! Map generation

use log::{debug, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::{MazeError, Result};
use crate::maze::{Cell, Direction, Location, Maze};
use crate::viewport::Viewport;

/// Border pair on which the entrance and the exit are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Start on the top row, goal on the bottom row
    Vertical,
    /// Start on the left column, goal on the right column
    Horizontal,
}

/// Perfect maze generator
///
/// Holds a single random source that is threaded through every generation
/// run, so a seeded generator yields a reproducible sequence of mazes.
pub struct MazeGenerator {
    random: StdRng,
    max_cells: usize,
}

impl MazeGenerator {
    /// Smallest side length of a generated maze
    pub const MIN_SIZE: usize = 5;
    /// Largest grid that is generated unless configured otherwise
    pub const DEFAULT_MAX_CELLS: usize = 1 << 26;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
            max_cells: Self::DEFAULT_MAX_CELLS,
        }
    }

    /// Set the memory ceiling, in grid squares
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Round a requested side length to the nearest usable one below it
    ///
    /// Even lengths are decremented, anything below [Self::MIN_SIZE] is
    /// raised to it.
    pub fn normalize(size: usize) -> usize {
        let size = size.max(Self::MIN_SIZE);
        if size % 2 == 0 {
            size - 1
        } else {
            size
        }
    }

    /// Generate a perfect maze of (roughly) the requested size
    ///
    /// Dimensions are normalized with [Self::normalize]. Fails with
    /// [MazeError::MazeTooLarge] if the grid exceeds the configured ceiling or
    /// cannot be allocated; the caller may retry with a smaller size.
    ///
    /// # Examples
    /// ```
    /// use dig_maze::MazeGenerator;
    ///
    /// let mut gen = MazeGenerator::new(Some(7));
    /// let maze = gen.generate_fixed(10, 9).unwrap();
    /// assert_eq!((maze.width(), maze.height()), (9, 9));
    /// ```
    pub fn generate_fixed(&mut self, width: usize, height: usize) -> Result<Maze> {
        let width = Self::normalize(width);
        let height = Self::normalize(height);

        let too_large = MazeError::MazeTooLarge { width, height };
        let size = match width.checked_mul(height) {
            Some(size) if size <= self.max_cells => size,
            _ => {
                warn!("Refusing to generate {}x{} maze", width, height);
                return Err(too_large);
            }
        };
        let mut cells = Vec::new();
        if cells.try_reserve_exact(size).is_err() {
            warn!("Could not allocate {}x{} maze", width, height);
            return Err(too_large);
        }
        cells.resize(size, Cell::Wall);

        let orientation = if self.random.gen_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        debug!(
            "Generating {}x{} maze, orientation {:?}",
            width, height, orientation
        );

        let mut carver = Carver {
            width,
            height,
            cells,
            branch_cells: Vec::new(),
            random: &mut self.random,
        };
        carver.carve();
        let (start, goal) = carver.place_terminals(orientation);
        debug!("Placed start at {}, goal at {}", start, goal);

        Maze::new(width, height, carver.cells, start, goal)
    }

    /// Generate a maze filling the viewport
    pub fn generate_responsive(&mut self, viewport: &impl Viewport) -> Result<Maze> {
        let (width, height) = viewport.size()?;
        debug!("Viewport is {}x{} cells", width, height);
        self.generate_fixed(width, height)
    }
}

/// State of a single generation run
struct Carver<'a> {
    width: usize,
    height: usize,
    /// Grid being carved, row-major
    cells: Vec<Cell>,
    /// Odd/odd squares to resume carving from once the walk gets stuck
    branch_cells: Vec<Location>,
    random: &'a mut StdRng,
}

impl Carver<'_> {
    fn index(&self, loc: Location) -> usize {
        loc.y * self.width + loc.x
    }

    fn is_border(&self, loc: Location) -> bool {
        loc.x == 0 || loc.y == 0 || loc.x == self.width - 1 || loc.y == self.height - 1
    }

    fn cell(&self, loc: Location) -> Cell {
        self.cells[self.index(loc)]
    }

    fn set_path(&mut self, loc: Location) {
        let index = self.index(loc);
        self.cells[index] = Cell::Path;
        if loc.x % 2 == 1 && loc.y % 2 == 1 {
            self.branch_cells.push(loc);
        }
    }

    /// Squares one and two steps towards `direction`, if both are walls
    fn diggable(&self, from: Location, direction: Direction) -> Option<(Location, Location)> {
        let near = from.step(direction, self.width, self.height)?;
        let far = near.step(direction, self.width, self.height)?;
        (self.cell(near) == Cell::Wall && self.cell(far) == Cell::Wall).then_some((near, far))
    }

    /// Dig passages from (1, 1) until every branch cell is exhausted
    ///
    /// The border is opened during carving so that the walk never breaks
    /// through it, and closed again afterwards.
    fn carve(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let loc = Location::new(x, y);
                if self.is_border(loc) {
                    let index = self.index(loc);
                    self.cells[index] = Cell::Path;
                }
            }
        }

        let mut current = Location::new(1, 1);
        self.set_path(current);
        let mut resumed = 0;
        loop {
            let options: Vec<_> = Direction::ALL
                .iter()
                .filter_map(|&direction| self.diggable(current, direction))
                .collect();

            match options.choose(&mut *self.random) {
                Some(&(near, far)) => {
                    trace!("Digging from {} to {}", current, far);
                    // Still may have unexplored sides
                    self.branch_cells.push(current);
                    self.set_path(near);
                    self.set_path(far);
                    current = far;
                }
                None => {
                    if self.branch_cells.is_empty() {
                        break;
                    }
                    let index = self.random.gen_range(0..self.branch_cells.len());
                    current = self.branch_cells.swap_remove(index);
                    resumed += 1;
                }
            }
        }
        debug!("Carving done after {} resumptions", resumed);

        for y in 0..self.height {
            for x in 0..self.width {
                let loc = Location::new(x, y);
                if self.is_border(loc) {
                    let index = self.index(loc);
                    self.cells[index] = Cell::Wall;
                }
            }
        }
    }

    /// Open the entrance and the exit on opposite borders
    ///
    /// Each is placed on a border square whose inward neighbour is a passage.
    fn place_terminals(&mut self, orientation: Orientation) -> (Location, Location) {
        let (w, h) = (self.width, self.height);
        let (start, goal) = match orientation {
            Orientation::Vertical => (
                self.pick_opening((0..w).map(|x| (Location::new(x, 0), Location::new(x, 1)))),
                self.pick_opening(
                    (0..w).map(|x| (Location::new(x, h - 1), Location::new(x, h - 2))),
                ),
            ),
            Orientation::Horizontal => (
                self.pick_opening((0..h).map(|y| (Location::new(0, y), Location::new(1, y)))),
                self.pick_opening(
                    (0..h).map(|y| (Location::new(w - 1, y), Location::new(w - 2, y))),
                ),
            ),
        };
        let start_index = self.index(start);
        let goal_index = self.index(goal);
        self.cells[start_index] = Cell::Start;
        self.cells[goal_index] = Cell::Goal;
        (start, goal)
    }

    /// Uniformly choose a border square whose inner neighbour is a passage
    ///
    /// Carving always opens (1, 1) and every odd square along each border, so
    /// there is at least one candidate.
    fn pick_opening(&mut self, pairs: impl Iterator<Item = (Location, Location)>) -> Location {
        let candidates: Vec<Location> = pairs
            .filter(|&(_, inner)| self.cell(inner) == Cell::Path)
            .map(|(border, _)| border)
            .collect();
        *candidates
            .choose(&mut *self.random)
            .unwrap_or(&Location::new(1, 0))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::viewport::FixedViewport;

    /// Squares reachable from `from` over non-wall cells
    fn reachable(maze: &Maze, from: Location) -> usize {
        let mut seen = vec![false; maze.width() * maze.height()];
        let mut queue = VecDeque::from([from]);
        seen[maze.index_of(from).unwrap()] = true;
        let mut count = 0;
        while let Some(loc) = queue.pop_front() {
            count += 1;
            for direction in Direction::ALL {
                if let Some(next) = loc.step(direction, maze.width(), maze.height()) {
                    let index = maze.index_of(next).unwrap();
                    if !seen[index] && maze.cells()[index].is_traversable() {
                        seen[index] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    /// Number of adjacent pairs of non-wall squares
    fn open_edges(maze: &Maze) -> usize {
        let mut edges = 0;
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                if !maze.cell_at(x, y).unwrap().is_traversable() {
                    continue;
                }
                if x + 1 < maze.width() && maze.cell_at(x + 1, y).unwrap().is_traversable() {
                    edges += 1;
                }
                if y + 1 < maze.height() && maze.cell_at(x, y + 1).unwrap().is_traversable() {
                    edges += 1;
                }
            }
        }
        edges
    }

    #[test]
    fn normalize_sizes() {
        assert_eq!(MazeGenerator::normalize(0), 5);
        assert_eq!(MazeGenerator::normalize(4), 5);
        assert_eq!(MazeGenerator::normalize(6), 5);
        assert_eq!(MazeGenerator::normalize(9), 9);
        assert_eq!(MazeGenerator::normalize(10), 9);
    }

    #[test]
    fn odd_normalization() {
        let mut gen = MazeGenerator::new(Some(0));
        let maze = gen.generate_fixed(4, 4).unwrap();
        assert_eq!((maze.width(), maze.height()), (5, 5));
        let maze = gen.generate_fixed(10, 9).unwrap();
        assert_eq!((maze.width(), maze.height()), (9, 9));
    }

    #[test]
    fn generated_mazes_are_perfect() {
        let mut gen = MazeGenerator::new(Some(1));
        for (w, h) in [(5, 5), (7, 7), (9, 21), (31, 11), (41, 41)] {
            for _ in 0..10 {
                let maze = gen.generate_fixed(w, h).unwrap();
                let open = maze.cells().iter().filter(|c| c.is_traversable()).count();
                assert_eq!(reachable(&maze, maze.start()), open);
                assert_eq!(open_edges(&maze), open - 1);
            }
        }
    }

    #[test]
    fn every_lattice_square_is_carved() {
        let mut gen = MazeGenerator::new(Some(2));
        let maze = gen.generate_fixed(25, 15).unwrap();
        for y in (1..maze.height()).step_by(2) {
            for x in (1..maze.width()).step_by(2) {
                assert_eq!(maze.cell_at(x, y).unwrap(), Cell::Path);
            }
        }
    }

    #[test]
    fn border_is_wall_except_terminals() {
        let mut gen = MazeGenerator::new(Some(3));
        for _ in 0..20 {
            let maze = gen.generate_fixed(11, 13).unwrap();
            let (w, h) = (maze.width(), maze.height());
            let mut openings = Vec::new();
            for y in 0..h {
                for x in 0..w {
                    let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
                    let cell = maze.cell_at(x, y).unwrap();
                    if border && cell != Cell::Wall {
                        openings.push((Location::new(x, y), cell));
                    }
                }
            }
            assert_eq!(
                openings,
                {
                    let mut expected = vec![(maze.start(), Cell::Start), (maze.goal(), Cell::Goal)];
                    expected.sort_by_key(|(loc, _)| (loc.y, loc.x));
                    expected
                }
            );
        }
    }

    #[test]
    fn terminals_on_opposite_borders() {
        let mut gen = MazeGenerator::new(Some(4));
        let mut seen = (false, false);
        for _ in 0..50 {
            let maze = gen.generate_fixed(7, 7).unwrap();
            let (start, goal) = (maze.start(), maze.goal());
            if start.y == 0 {
                assert_eq!(goal.y, 6);
                assert_eq!(maze.cell_at(start.x, 1).unwrap(), Cell::Path);
                assert_eq!(maze.cell_at(goal.x, 5).unwrap(), Cell::Path);
                seen.0 = true;
            } else {
                assert_eq!((start.x, goal.x), (0, 6));
                assert_eq!(maze.cell_at(1, start.y).unwrap(), Cell::Path);
                assert_eq!(maze.cell_at(5, goal.y).unwrap(), Cell::Path);
                seen.1 = true;
            }
        }
        assert_eq!(seen, (true, true));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(Some(42)).generate_fixed(21, 21).unwrap();
        let b = MazeGenerator::new(Some(42)).generate_fixed(21, 21).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn too_large_is_reported() {
        let mut gen = MazeGenerator::new(Some(5)).with_max_cells(1000);
        assert!(matches!(
            gen.generate_fixed(41, 41),
            Err(MazeError::MazeTooLarge {
                width: 41,
                height: 41
            })
        ));
        // Caller retries smaller
        assert!(gen.generate_fixed(31, 31).is_ok());
        assert!(matches!(
            gen.generate_fixed(usize::MAX, usize::MAX),
            Err(MazeError::MazeTooLarge { .. })
        ));
    }

    #[test]
    fn responsive_uses_viewport_size() {
        let mut gen = MazeGenerator::new(Some(6));
        let maze = gen.generate_responsive(&FixedViewport(40, 24)).unwrap();
        assert_eq!((maze.width(), maze.height()), (39, 23));
    }
}
