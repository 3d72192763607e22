//! Sparse cell canvas: the ground truth of what is painted.
//!
//! A [`CellCanvas`] maps integer grid [`Cell`]s to a [`ColorTag`]. Cells that
//! are absent from the map are unpainted and read back as
//! [`ColorTag::Background`]. Every mutation is also appended to a change
//! journal so a renderer can pick up exactly the cells that changed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell displaced by `(dx, dy)`, or `None` past the `i32` range.
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self { x: self.x.checked_add(dx)?, y: self.y.checked_add(dy)? })
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when a `x,y` coordinate string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell '{0}', expected 'x,y' with integer coordinates")]
pub struct ParseCellError(String);

impl FromStr for Cell {
    type Err = ParseCellError;

    /// Parse `"x,y"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| ParseCellError(s.to_string()))?;
        let x = x.trim().parse().map_err(|_| ParseCellError(s.to_string()))?;
        let y = y.trim().parse().map_err(|_| ParseCellError(s.to_string()))?;
        Ok(Cell { x, y })
    }
}

/// What a painted cell means.
///
/// Regions are identified by role rather than by display color, so two
/// roles that happen to share a display color never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    /// Unpainted. Never stored in the canvas map.
    Background,
    Boundary,
    Fill,
    Seed,
    /// Any other paint, identified by its packed `0xRRGGBB` value.
    Other(u32),
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTag::Background => write!(f, "background"),
            ColorTag::Boundary => write!(f, "boundary"),
            ColorTag::Fill => write!(f, "fill"),
            ColorTag::Seed => write!(f, "seed"),
            ColorTag::Other(rgb) => write!(f, "#{:06X}", rgb),
        }
    }
}

/// A single recorded canvas mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasChange {
    Painted { cell: Cell, tag: ColorTag },
    Erased { cell: Cell },
}

/// Sparse mapping from [`Cell`] to [`ColorTag`].
///
/// Enumeration order is unspecified; callers that need a stable order must
/// sort.
#[derive(Debug, Default, Clone)]
pub struct CellCanvas {
    cells: HashMap<Cell, ColorTag>,
    changes: Vec<CanvasChange>,
}

impl CellCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert `tag` at `cell`. Last write wins.
    ///
    /// Painting [`ColorTag::Background`] erases the cell. Repainting a cell
    /// with the tag it already holds records no change.
    pub fn paint(&mut self, cell: Cell, tag: ColorTag) {
        if tag == ColorTag::Background {
            self.erase(cell);
            return;
        }
        if self.cells.insert(cell, tag) != Some(tag) {
            self.changes.push(CanvasChange::Painted { cell, tag });
        }
    }

    /// Remove whatever is painted at `cell`.
    pub fn erase(&mut self, cell: Cell) {
        if self.cells.remove(&cell).is_some() {
            self.changes.push(CanvasChange::Erased { cell });
        }
    }

    /// The tag at `cell`, or [`ColorTag::Background`] if unpainted.
    pub fn color_at(&self, cell: Cell) -> ColorTag {
        self.cells.get(&cell).copied().unwrap_or(ColorTag::Background)
    }

    pub fn is_painted_with(&self, cell: Cell, tag: ColorTag) -> bool {
        self.color_at(cell) == tag
    }

    /// Remove every painted cell.
    pub fn clear(&mut self) {
        let mut erased: Vec<Cell> = self.cells.drain().map(|(cell, _)| cell).collect();
        erased.sort();
        self.changes.extend(erased.into_iter().map(|cell| CanvasChange::Erased { cell }));
    }

    /// Remove only the cells whose tag is in `tags`, keeping everything else.
    ///
    /// Returns the number of cells removed.
    pub fn clear_matching(&mut self, tags: &[ColorTag]) -> usize {
        let mut erased: Vec<Cell> = self
            .cells
            .iter()
            .filter(|(_, tag)| tags.contains(tag))
            .map(|(cell, _)| *cell)
            .collect();
        erased.sort();
        for cell in &erased {
            self.cells.remove(cell);
        }
        let count = erased.len();
        self.changes.extend(erased.into_iter().map(|cell| CanvasChange::Erased { cell }));
        count
    }

    /// Number of painted cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate painted cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, ColorTag)> + '_ {
        self.cells.iter().map(|(cell, tag)| (*cell, *tag))
    }

    /// Count the cells holding `tag`.
    pub fn count(&self, tag: ColorTag) -> usize {
        self.cells.values().filter(|t| **t == tag).count()
    }

    /// Drain the change journal, oldest first.
    pub fn take_changes(&mut self) -> Vec<CanvasChange> {
        std::mem::take(&mut self.changes)
    }
}

/// Inclusive rectangle of cells that bounds every fill search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// The tight extent of `cells`, or `None` if there are none.
    pub fn enclosing<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Option<Self> {
        let mut iter = cells.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
        for cell in iter {
            bounds.min_x = bounds.min_x.min(cell.x);
            bounds.min_y = bounds.min_y.min(cell.y);
            bounds.max_x = bounds.max_x.max(cell.x);
            bounds.max_y = bounds.max_y.max(cell.y);
        }
        Some(bounds)
    }

    /// Grow by `padding` cells on every side.
    pub fn padded(self, padding: i32) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(padding),
            min_y: self.min_y.saturating_sub(padding),
            max_x: self.max_x.saturating_add(padding),
            max_y: self.max_y.saturating_add(padding),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min_x && cell.x <= self.max_x && cell.y >= self.min_y && cell.y <= self.max_y
    }

    pub fn width(&self) -> u64 {
        (i64::from(self.max_x) - i64::from(self.min_x) + 1).max(0) as u64
    }

    pub fn height(&self) -> u64 {
        (i64::from(self.max_y) - i64::from(self.min_y) + 1).max(0) as u64
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}] x [{}..={}]", self.min_x, self.max_x, self.min_y, self.max_y)
    }
}
