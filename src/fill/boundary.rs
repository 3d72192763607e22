//! Boundary fill: stop only at an explicit boundary color.

use super::{Connectivity, FillError, FillRun};
use crate::canvas::{Bounds, Cell, CellCanvas, ColorTag};
use std::collections::{HashSet, VecDeque};

/// Breadth-first boundary fill confined to a bounding box.
///
/// Unlike [`super::FloodFill`], cells of any color are taken over; the
/// region ends only at cells holding the boundary or fill tag.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryFill {
    bounds: Bounds,
}

impl BoundaryFill {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// Compute the cells enclosed with `seed`, in BFS visitation order.
    pub fn run(
        &self,
        canvas: &CellCanvas,
        seed: Cell,
        connectivity: Connectivity,
        boundary: ColorTag,
        fill: ColorTag,
    ) -> Result<FillRun, FillError> {
        if !self.bounds.contains(seed) {
            return Err(FillError::OutOfBounds { seed, bounds: self.bounds });
        }
        if canvas.is_painted_with(seed, boundary) {
            return Err(FillError::OnBoundary(seed));
        }
        if canvas.is_painted_with(seed, fill) {
            return Err(FillError::AlreadyFilled(seed));
        }

        let blocked = |cell: Cell| {
            let color = canvas.color_at(cell);
            color == boundary || color == fill
        };

        let mut filled = Vec::new();
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        queue.push_back(seed);
        visited.insert(seed);

        while let Some(cell) = queue.pop_front() {
            // Checked again per cell: the entry guard only covers the seed.
            if blocked(cell) {
                continue;
            }
            filled.push(cell);

            for next in connectivity.neighbors(cell) {
                if self.bounds.contains(next) && !visited.contains(&next) && !blocked(next) {
                    visited.insert(next);
                    queue.push_back(next);
                }
            }
        }

        log::debug!("boundary fill from {} computed {} cells", seed, filled.len());
        Ok(FillRun::new(filled, fill))
    }
}
