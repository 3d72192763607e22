//! Line rasterization primitives.
//!
//! Converts segments between integer cells into the ordered sequence of
//! cells on the segment using Bresenham's algorithm. Only integer arithmetic
//! is used, so results are reproducible bit-for-bit.

use crate::canvas::Cell;

/// Rasterize a line using Bresenham's line algorithm.
///
/// Returns every cell from `p0` to `p1` inclusive, in order from `p0`. The
/// axis with the larger delta advances on every step. Swapping the endpoints
/// yields the same cells in reverse order.
///
/// # Examples
///
/// ```
/// use gridfill::canvas::Cell;
/// use gridfill::shapes::rasterize_line;
///
/// let cells = rasterize_line(Cell::new(0, 0), Cell::new(3, 3));
/// assert_eq!(cells.len(), 4);
/// assert_eq!(cells[0], Cell::new(0, 0));
/// assert_eq!(cells[3], Cell::new(3, 3));
/// ```
pub fn rasterize_line(p0: Cell, p1: Cell) -> Vec<Cell> {
    // Always walk from the smaller endpoint so both directions agree.
    if p1 < p0 {
        let mut cells = walk_line(p1, p0);
        cells.reverse();
        return cells;
    }
    walk_line(p0, p1)
}

fn walk_line(from: Cell, to: Cell) -> Vec<Cell> {
    let dx = (i64::from(to.x) - i64::from(from.x)).abs();
    let dy = -(i64::from(to.y) - i64::from(from.y)).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let (mut x, mut y) = (from.x, from.y);

    loop {
        cells.push(Cell::new(x, y));

        if x == to.x && y == to.y {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    cells
}

/// Rasterize the outline through `vertices`, edge by edge.
///
/// When `closed` is set the last vertex is joined back to the first. Cells
/// shared by consecutive edges appear once per edge; painting is idempotent
/// so callers need not deduplicate.
pub fn rasterize_polyline(vertices: &[Cell], closed: bool) -> Vec<Cell> {
    let mut cells = Vec::new();
    for pair in vertices.windows(2) {
        cells.extend(rasterize_line(pair[0], pair[1]));
    }
    if closed && vertices.len() > 2 {
        if let (Some(&last), Some(&first)) = (vertices.last(), vertices.first()) {
            cells.extend(rasterize_line(last, first));
        }
    }
    cells
}
