//! Display surface that a responsive maze is fitted to

use crossterm::terminal;

use crate::error::Result;

/// Something that can report how many maze squares it can show
pub trait Viewport {
    /// Visible area as (width, height), in squares
    fn size(&self) -> Result<(usize, usize)>;
}

/// The controlling terminal
///
/// Every square is rendered as a double-width emoji, and the last row is
/// left free for the status line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn size(&self) -> Result<(usize, usize)> {
        let (columns, rows) = terminal::size()?;
        Ok((columns as usize / 2, (rows as usize).saturating_sub(1)))
    }
}

/// Viewport of a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport(pub usize, pub usize);

impl Viewport for FixedViewport {
    fn size(&self) -> Result<(usize, usize)> {
        Ok((self.0, self.1))
    }
}
