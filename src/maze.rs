//! Grid model of a generated maze

use std::fmt;

use itertools::Itertools;

use crate::error::{MazeError, Result};

/// Content of a single grid square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Path,
    Start,
    Goal,
    /// Path square that lies on a discovered route
    RouteMarker,
}

impl Cell {
    const S_WALL: char = '🟫';
    const S_PATH: char = '🟩';
    const S_START: char = '🏃';
    const S_GOAL: char = '❎';
    const S_ROUTE: char = '🟨';

    /// Anything but a wall can be walked on
    pub fn is_traversable(self) -> bool {
        self != Cell::Wall
    }

    /// Emoji used when rendering the cell
    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => Self::S_WALL,
            Cell::Path => Self::S_PATH,
            Cell::Start => Self::S_START,
            Cell::Goal => Self::S_GOAL,
            Cell::RouteMarker => Self::S_ROUTE,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            Self::S_WALL => Some(Cell::Wall),
            Self::S_PATH => Some(Cell::Path),
            Self::S_START => Some(Cell::Start),
            Self::S_GOAL => Some(Cell::Goal),
            Self::S_ROUTE => Some(Cell::RouteMarker),
            _ => None,
        }
    }
}

/// Location in the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Square one step towards `direction`, if it stays within a
    /// `width` x `height` grid.
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Self> {
        let (x, y) = match direction {
            Direction::Up => (Some(self.x), self.y.checked_sub(1)),
            Direction::Down => (Some(self.x), self.y.checked_add(1)),
            Direction::Left => (self.x.checked_sub(1), Some(self.y)),
            Direction::Right => (self.x.checked_add(1), Some(self.y)),
        };
        match (x, y) {
            (Some(x), Some(y)) if x < width && y < height => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Manhattan distance between two locations
    pub fn distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the route solver expands them
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Rectangular maze with an entrance, an exit and an optional solution
///
/// Squares are stored row by row; square (x, y) lives at the linear index
/// `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Location,
    goal: Location,
    route: Option<Vec<Location>>,
}

impl Maze {
    /// Create maze from a populated grid
    ///
    /// - `width`, `height`: Grid dimensions, both nonzero.
    /// - `cells`: Row-major grid content, `width * height` squares.
    /// - `start`, `goal`: Entrance and exit, both within the grid.
    ///
    /// The grid is taken as is; no markers are stamped.
    pub fn new(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        start: Location,
        goal: Location,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(MazeError::InvalidDimensions { width, height })?;
        if cells.len() != expected {
            return Err(MazeError::GridSizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        let maze = Maze {
            width,
            height,
            cells,
            start,
            goal,
            route: None,
        };
        maze.check_bounds(start)?;
        maze.check_bounds(goal)?;
        Ok(maze)
    }

    /// Parse maze from its rendered representation
    ///
    /// Returns error, if maze contains unknown characters, rows of unequal
    /// length or lacks the start or the goal.
    ///
    /// # Examples
    /// ```
    /// use dig_maze::{Cell, Maze};
    ///
    /// let maze = Maze::parse("
    /// 🟫🏃🟫🟫🟫
    /// 🟫🟩🟩🟩🟫
    /// 🟫🟫🟫🟩🟫
    /// 🟫🟩🟩🟩🟫
    /// 🟫❎🟫🟫🟫".trim()).unwrap();
    /// assert_eq!((maze.width(), maze.height()), (5, 5));
    /// assert_eq!(maze.cell_at(1, 4).unwrap(), Cell::Goal);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut start = None;
        let mut goal = None;
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (y, row) in text.lines().enumerate() {
            let row_start = cells.len();
            for (x, symbol) in row.chars().enumerate() {
                let cell =
                    Cell::from_symbol(symbol).ok_or(MazeError::UnknownSymbol { symbol, x, y })?;
                match cell {
                    Cell::Start => start = Some(Location::new(x, y)),
                    Cell::Goal => goal = Some(Location::new(x, y)),
                    _ => (),
                }
                cells.push(cell);
            }
            let row_width = cells.len() - row_start;
            if y == 0 {
                width = row_width;
            } else if row_width != width {
                return Err(MazeError::RaggedRows { row: y });
            }
            height += 1;
        }

        let start = start.ok_or(MazeError::MissingMarker("Start"))?;
        let goal = goal.ok_or(MazeError::MissingMarker("Goal"))?;
        Maze::new(width, height, cells, start, goal)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn goal(&self) -> Location {
        self.goal
    }

    /// Route overlaid by [Self::set_route], empty if none was set
    pub fn route(&self) -> &[Location] {
        self.route.as_deref().unwrap_or_default()
    }

    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }

    /// Square at (x, y)
    pub fn cell_at(&self, x: usize, y: usize) -> Result<Cell> {
        let index = self.index_of(Location::new(x, y))?;
        Ok(self.cells[index])
    }

    pub fn contains(&self, location: Location) -> bool {
        location.x < self.width && location.y < self.height
    }

    /// Linear index `y * width + x` of a location
    pub fn index_of(&self, location: Location) -> Result<usize> {
        self.check_bounds(location)?;
        Ok(location.y * self.width + location.x)
    }

    /// Inverse of [Self::index_of]; the index must be below `width * height`
    pub fn location_of(&self, index: usize) -> Location {
        Location::new(index % self.width, index / self.width)
    }

    /// Row-major view of all squares
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Store a route and mark its squares on the grid
    ///
    /// Every location except the start and the goal is stamped with
    /// [Cell::RouteMarker]. Stamping only ever writes the same marker, so
    /// setting a route again leaves the grid unchanged. The grid is untouched
    /// if any location lies outside it.
    pub fn set_route(&mut self, route: Vec<Location>) -> Result<()> {
        let indices = route
            .iter()
            .filter(|&&loc| loc != self.start && loc != self.goal)
            .map(|&loc| self.index_of(loc))
            .collect::<Result<Vec<_>>>()?;
        for index in indices {
            self.cells[index] = Cell::RouteMarker;
        }
        self.route = Some(route);
        Ok(())
    }

    fn check_bounds(&self, location: Location) -> Result<()> {
        if self.contains(location) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                x: location.x,
                y: location.y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.symbol()).join(""))
            .join("\n");
        write!(f, "{}", rows)
    }
}
