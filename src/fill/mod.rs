//! Region fill engines.
//!
//! Three algorithms compute which cells of an enclosed region should be
//! filled, each returning an ordered [`FillRun`]:
//!
//! - [`FloodFill`]: BFS over cells matching the seed's original color
//! - [`BoundaryFill`]: BFS stopping only at boundary- or fill-tagged cells
//! - [`ScanlineFill`]: edge table / active edge list polygon sweep
//!
//! Computation is synchronous and never mutates the canvas. Revealing a run
//! onto the canvas is the job of [`crate::scheduler::FillScheduler`].

mod boundary;
mod flood;
mod scanline;

pub use boundary::BoundaryFill;
pub use flood::FloodFill;
pub use scanline::{simplify_vertices, ScanlineFill};

use crate::canvas::{Bounds, Cell, CellCanvas, ColorTag};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Neighbor expansion mode for seeded fills.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// The 4 orthogonal neighbors.
    #[default]
    #[value(alias = "4")]
    Four,
    /// Orthogonal plus the 4 diagonal neighbors.
    #[value(alias = "8")]
    Eight,
}

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const WITH_DIAGONALS: [(i32, i32); 8] =
    [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (-1, -1), (1, -1), (-1, 1)];

impl Connectivity {
    /// Neighbor offsets in expansion order. The order fixes the BFS
    /// visitation order and therefore the reveal order.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &ORTHOGONAL,
            Connectivity::Eight => &WITH_DIAGONALS,
        }
    }

    /// Neighbors of `cell` in expansion order. Neighbors outside the `i32`
    /// coordinate range are skipped.
    pub fn neighbors(self, cell: Cell) -> impl Iterator<Item = Cell> {
        self.offsets().iter().filter_map(move |&(dx, dy)| cell.checked_offset(dx, dy))
    }
}

/// Error returned when a connectivity name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid connectivity '{0}', expected 4, 8, four or eight")]
pub struct ParseConnectivityError(String);

impl FromStr for Connectivity {
    type Err = ParseConnectivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "four" => Ok(Connectivity::Four),
            "8" | "eight" => Ok(Connectivity::Eight),
            _ => Err(ParseConnectivityError(s.to_string())),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Four => write!(f, "4-connected"),
            Connectivity::Eight => write!(f, "8-connected"),
        }
    }
}

/// Which fill engine to run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Flood,
    Boundary,
    Scanline,
}

impl Algorithm {
    /// Whether the algorithm starts from a seed cell.
    pub fn needs_seed(self) -> bool {
        !matches!(self, Algorithm::Scanline)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Flood => write!(f, "flood fill"),
            Algorithm::Boundary => write!(f, "boundary fill"),
            Algorithm::Scanline => write!(f, "scanline fill"),
        }
    }
}

/// Why a fill produced no cells.
///
/// These are advisory conditions: the fill is simply not started and the
/// canvas is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("seed {seed} is outside the fill bounds {bounds}")]
    OutOfBounds { seed: Cell, bounds: Bounds },
    #[error("seed {0} is already filled")]
    AlreadyFilled(Cell),
    #[error("seed {0} is on the boundary, cannot fill")]
    OnBoundary(Cell),
    #[error("polygon needs at least 3 non-collinear vertices, found {vertices}")]
    PolygonTooSmall { vertices: usize },
    #[error("no seed selected")]
    NoSeed,
}

impl FillError {
    /// Short machine-readable name for status output.
    pub fn kind(&self) -> &'static str {
        match self {
            FillError::OutOfBounds { .. } => "out_of_bounds",
            FillError::AlreadyFilled(_) => "already_filled",
            FillError::OnBoundary(_) => "on_boundary",
            FillError::PolygonTooSmall { .. } => "polygon_too_small",
            FillError::NoSeed => "no_seed",
        }
    }
}

/// The ordered result of a fill, awaiting reveal.
///
/// The cursor marks how many cells have been revealed; it only moves
/// forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRun {
    cells: Vec<Cell>,
    color: ColorTag,
    cursor: usize,
}

impl FillRun {
    pub fn new(cells: Vec<Cell>, color: ColorTag) -> Self {
        Self { cells, color, cursor: 0 }
    }

    /// All cells of the run in reveal order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The tag revealed cells are painted with.
    pub fn color(&self) -> ColorTag {
        self.color
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.cells.len() - self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.cells.len()
    }

    /// Take up to `n` unrevealed cells and advance the cursor past them.
    pub fn advance(&mut self, n: usize) -> &[Cell] {
        let start = self.cursor;
        let end = start.saturating_add(n).min(self.cells.len());
        self.cursor = end;
        &self.cells[start..end]
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Bounding box for seeded fills: the vertex extent padded by `padding`, or
/// the padded canvas extent when there are no vertices.
pub fn fill_bounds(vertices: &[Cell], canvas_extent: Bounds, padding: i32) -> Bounds {
    Bounds::enclosing(vertices).unwrap_or(canvas_extent).padded(padding)
}

/// Everything an engine needs to compute one fill.
#[derive(Debug, Clone, Copy)]
pub struct FillRequest<'a> {
    pub algorithm: Algorithm,
    pub seed: Option<Cell>,
    pub vertices: &'a [Cell],
    pub bounds: Bounds,
    pub connectivity: Connectivity,
    pub boundary: ColorTag,
    pub fill: ColorTag,
}

impl FillRequest<'_> {
    /// Run the requested engine against `canvas`.
    pub fn compute(&self, canvas: &CellCanvas) -> Result<FillRun, FillError> {
        match self.algorithm {
            Algorithm::Flood => {
                let seed = self.seed.ok_or(FillError::NoSeed)?;
                FloodFill::new(self.bounds).run(
                    canvas,
                    seed,
                    self.connectivity,
                    self.boundary,
                    self.fill,
                )
            }
            Algorithm::Boundary => {
                let seed = self.seed.ok_or(FillError::NoSeed)?;
                BoundaryFill::new(self.bounds).run(
                    canvas,
                    seed,
                    self.connectivity,
                    self.boundary,
                    self.fill,
                )
            }
            Algorithm::Scanline => {
                ScanlineFill::new(self.vertices).run(canvas, self.boundary, self.fill)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_parse() {
        assert_eq!("4".parse::<Connectivity>(), Ok(Connectivity::Four));
        assert_eq!("Eight".parse::<Connectivity>(), Ok(Connectivity::Eight));
        assert!("6".parse::<Connectivity>().is_err());
    }

    #[test]
    fn test_connectivity_neighbor_order() {
        let neighbors: Vec<Cell> = Connectivity::Four.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(
            neighbors,
            vec![Cell::new(1, 0), Cell::new(-1, 0), Cell::new(0, 1), Cell::new(0, -1)]
        );
        assert_eq!(Connectivity::Eight.neighbors(Cell::new(0, 0)).count(), 8);
    }

    #[test]
    fn test_fill_run_advance() {
        let cells = vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
        let mut run = FillRun::new(cells, ColorTag::Fill);
        assert_eq!(run.advance(2), &[Cell::new(0, 0), Cell::new(1, 0)]);
        assert_eq!(run.remaining(), 1);
        assert_eq!(run.advance(5), &[Cell::new(2, 0)]);
        assert!(run.is_complete());
        assert!(run.advance(1).is_empty());
        assert_eq!(run.cursor(), 3);
    }

    #[test]
    fn test_fill_bounds_from_vertices() {
        let vertices = [Cell::new(0, 0), Cell::new(4, 4)];
        let bounds = fill_bounds(&vertices, Bounds::new(-100, -100, 100, 100), 2);
        assert_eq!(bounds, Bounds::new(-2, -2, 6, 6));
    }

    #[test]
    fn test_fill_bounds_falls_back_to_canvas() {
        let bounds = fill_bounds(&[], Bounds::new(-10, -10, 10, 10), 2);
        assert_eq!(bounds, Bounds::new(-12, -12, 12, 12));
    }

    #[test]
    fn test_request_without_seed() {
        let canvas = CellCanvas::new();
        let request = FillRequest {
            algorithm: Algorithm::Flood,
            seed: None,
            vertices: &[],
            bounds: Bounds::new(0, 0, 4, 4),
            connectivity: Connectivity::Four,
            boundary: ColorTag::Boundary,
            fill: ColorTag::Fill,
        };
        assert_eq!(request.compute(&canvas), Err(FillError::NoSeed));
    }
}
