//! Error kinds of the maze library

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MazeError {
    /// Maze constructed directly with a zero-sized side
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("grid holds {actual} cells, expected {expected}")]
    GridSizeMismatch { expected: usize, actual: usize },

    /// Cell access outside the grid
    #[error("location ({x}, {y}) is outside the {width}x{height} maze")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Generation request too large to allocate. Retry with a smaller size.
    #[error("maze of {width}x{height} cells is too large to generate")]
    MazeTooLarge { width: usize, height: usize },

    #[error("failed to query viewport size: {0}")]
    Viewport(#[from] io::Error),

    #[error("unexpected character `{symbol}` at x={x}, y={y}")]
    UnknownSymbol { symbol: char, x: usize, y: usize },

    #[error("{0} is not found in maze")]
    MissingMarker(&'static str),

    #[error("row {row} differs in length from the first row")]
    RaggedRows { row: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
