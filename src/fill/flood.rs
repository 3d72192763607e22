//! Flood fill: match against the seed's original color.

use super::{Connectivity, FillError, FillRun};
use crate::canvas::{Bounds, Cell, CellCanvas, ColorTag};
use std::collections::{HashSet, VecDeque};

/// Breadth-first flood fill confined to a bounding box.
///
/// A neighbor joins the region only if it currently holds exactly the color
/// the seed started with, so the fill stops at *any* different color, not
/// only at the boundary tag.
#[derive(Debug, Clone, Copy)]
pub struct FloodFill {
    bounds: Bounds,
}

impl FloodFill {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// Compute the cells reachable from `seed`, in BFS visitation order.
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

        let start = canvas.color_at(seed);
        if start == fill {
            return Err(FillError::AlreadyFilled(seed));
        }
        if start == boundary {
            return Err(FillError::OnBoundary(seed));
        }

        let mut filled = Vec::new();
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        queue.push_back(seed);
        visited.insert(seed);

        while let Some(cell) = queue.pop_front() {
            filled.push(cell);

            for next in connectivity.neighbors(cell) {
                if !self.bounds.contains(next) || visited.contains(&next) {
                    continue;
                }
                let color = canvas.color_at(next);
                if color != start || color == fill {
                    continue;
                }
                visited.insert(next);
                queue.push_back(next);
            }
        }

        log::debug!("flood fill from {} computed {} cells", seed, filled.len());
        Ok(FillRun::new(filled, fill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryBuilder;

    fn square_canvas() -> (CellCanvas, Bounds) {
        let mut canvas = CellCanvas::new();
        let mut builder = BoundaryBuilder::new();
        for (x, y) in [(0, 0), (4, 0), (4, 4), (0, 4)] {
            builder.add_vertex(&mut canvas, Cell::new(x, y));
        }
        builder.draw_edges(&mut canvas, true);
        let bounds = crate::fill::fill_bounds(builder.vertices(), Bounds::new(0, 0, 0, 0), 2);
        (canvas, bounds)
    }

    fn fill(canvas: &CellCanvas, bounds: Bounds, seed: Cell) -> Result<FillRun, FillError> {
        FloodFill::new(bounds).run(
            canvas,
            seed,
            Connectivity::Four,
            ColorTag::Boundary,
            ColorTag::Fill,
        )
    }

    #[test]
    fn test_fills_square_interior() {
        let (canvas, bounds) = square_canvas();
        let run = fill(&canvas, bounds, Cell::new(2, 2)).expect("interior seed fills");
        assert_eq!(run.len(), 9);
        assert_eq!(run.color(), ColorTag::Fill);
        for cell in run.cells() {
            assert!((1..=3).contains(&cell.x) && (1..=3).contains(&cell.y));
        }
    }

    #[test]
    fn test_bfs_order() {
        let (canvas, bounds) = square_canvas();
        let run = fill(&canvas, bounds, Cell::new(2, 2)).expect("interior seed fills");
        let expected: Vec<Cell> = [
            (2, 2),
            (3, 2),
            (1, 2),
            (2, 3),
            (2, 1),
            (3, 3),
            (3, 1),
            (1, 3),
            (1, 1),
        ]
        .into_iter()
        .map(Cell::from)
        .collect();
        assert_eq!(run.cells(), expected.as_slice());
    }

    #[test]
    fn test_outside_seed_fills_to_bounds() {
        let (canvas, bounds) = square_canvas();
        let run = fill(&canvas, bounds, Cell::new(-2, -2)).expect("exterior seed fills");
        // 9x9 box minus the 16 boundary cells minus the 9 enclosed cells.
        assert_eq!(run.len(), 81 - 16 - 9);
        assert!(!run.cells().contains(&Cell::new(2, 2)));
    }

    #[test]
    fn test_out_of_bounds_seed() {
        let (canvas, bounds) = square_canvas();
        let err = fill(&canvas, bounds, Cell::new(50, 2)).unwrap_err();
        assert!(matches!(err, FillError::OutOfBounds { seed, .. } if seed == Cell::new(50, 2)));
    }

    #[test]
    fn test_seed_on_boundary() {
        let (canvas, bounds) = square_canvas();
        assert_eq!(fill(&canvas, bounds, Cell::new(0, 2)), Err(FillError::OnBoundary(Cell::new(0, 2))));
    }

    #[test]
    fn test_seed_already_filled() {
        let (mut canvas, bounds) = square_canvas();
        canvas.paint(Cell::new(2, 2), ColorTag::Fill);
        assert_eq!(
            fill(&canvas, bounds, Cell::new(2, 2)),
            Err(FillError::AlreadyFilled(Cell::new(2, 2)))
        );
    }

    #[test]
    fn test_stops_at_any_other_color() {
        let (mut canvas, bounds) = square_canvas();
        // A wall of foreign paint splits the interior at x = 2.
        for y in 1..=3 {
            canvas.paint(Cell::new(2, y), ColorTag::Other(0xFF0000));
        }
        let run = fill(&canvas, bounds, Cell::new(1, 2)).expect("left half fills");
        assert_eq!(run.len(), 3);
        assert!(run.cells().iter().all(|c| c.x == 1));
    }

    #[test]
    fn test_eight_connectivity_leaks_through_diagonal_gap() {
        let mut canvas = CellCanvas::new();
        // Diagonal wall: 4-connected fill stays on one side, 8-connected crosses.
        for i in 0..=4 {
            canvas.paint(Cell::new(i, i), ColorTag::Boundary);
        }
        let bounds = Bounds::new(0, 0, 4, 4);
        let four = FloodFill::new(bounds)
            .run(&canvas, Cell::new(1, 0), Connectivity::Four, ColorTag::Boundary, ColorTag::Fill)
            .expect("fills");
        let eight = FloodFill::new(bounds)
            .run(&canvas, Cell::new(1, 0), Connectivity::Eight, ColorTag::Boundary, ColorTag::Fill)
            .expect("fills");
        assert_eq!(four.len(), 10);
        assert_eq!(eight.len(), 20);
    }

    #[test]
    fn test_deterministic() {
        let (canvas, bounds) = square_canvas();
        let first = fill(&canvas, bounds, Cell::new(-1, 3)).expect("fills");
        let second = fill(&canvas, bounds, Cell::new(-1, 3)).expect("fills");
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_at_coordinate_limit() {
        let mut canvas = CellCanvas::new();
        let mut builder = BoundaryBuilder::new();
        builder.add_vertex(&mut canvas, Cell::new(i32::MAX - 1, 0));
        builder.add_vertex(&mut canvas, Cell::new(i32::MAX - 1, 1));
        let bounds =
            crate::fill::fill_bounds(builder.vertices(), Bounds::new(0, 0, 0, 0), 2);
        assert_eq!(bounds.max_x, i32::MAX);

        let run = fill(&canvas, bounds, Cell::new(i32::MAX, 0)).expect("fills");
        // Four columns (clamped at i32::MAX) by six rows, minus the two vertices.
        assert_eq!(run.len(), 22);
        assert!(run.cells().iter().all(|c| c.x >= i32::MAX - 3));
    }
}
