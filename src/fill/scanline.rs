//! Scanline polygon fill with an edge table and an active edge list.

use super::{FillError, FillRun};
use crate::canvas::{Cell, CellCanvas, ColorTag};
use std::collections::HashSet;

/// A non-horizontal polygon edge, oriented bottom (lower y) to top.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    /// Scanline at which the edge leaves the active list.
    y_max: i32,
    /// Intersection with the current scanline; starts at the lower endpoint.
    x: f64,
    /// dx/dy, added to `x` once per scanline.
    inverse_slope: f64,
}

/// Drop repeated and collinear vertices.
///
/// Consecutive duplicates (including a last vertex equal to the first) are
/// collapsed, then a vertex is kept only if the cross product of its
/// incoming and outgoing edges is non-zero. Neighbors wrap around.
pub fn simplify_vertices(vertices: &[Cell]) -> Vec<Cell> {
    let mut unique: Vec<Cell> = Vec::with_capacity(vertices.len());
    for &v in vertices {
        if unique.last() != Some(&v) {
            unique.push(v);
        }
    }
    while unique.len() > 1 && unique.first() == unique.last() {
        unique.pop();
    }

    let n = unique.len();
    if n < 3 {
        return unique;
    }

    (0..n)
        .filter(|&i| {
            let prev = unique[(i + n - 1) % n];
            let curr = unique[i];
            let next = unique[(i + 1) % n];
            let dx1 = i128::from(curr.x) - i128::from(prev.x);
            let dy1 = i128::from(curr.y) - i128::from(prev.y);
            let dx2 = i128::from(next.x) - i128::from(curr.x);
            let dy2 = i128::from(next.y) - i128::from(curr.y);
            dx1 * dy2 - dy1 * dx2 != 0
        })
        .map(|i| unique[i])
        .collect()
}

/// Scanline fill of the polygon described by a vertex list.
///
/// Needs no seed: the interior is derived from the vertices alone. Cells
/// already holding the boundary or fill tag are skipped.
#[derive(Debug, Clone)]
pub struct ScanlineFill<'a> {
    vertices: &'a [Cell],
}

impl<'a> ScanlineFill<'a> {
    pub fn new(vertices: &'a [Cell]) -> Self {
        Self { vertices }
    }

    /// Compute the interior cells, scanline by scanline from the lowest y.
    pub fn run(
        &self,
        canvas: &CellCanvas,
        boundary: ColorTag,
        fill: ColorTag,
    ) -> Result<FillRun, FillError> {
        let polygon = simplify_vertices(self.vertices);
        log::debug!(
            "scanline fill: {} vertices simplified to {}",
            self.vertices.len(),
            polygon.len()
        );
        if polygon.len() < 3 {
            return Err(FillError::PolygonTooSmall { vertices: polygon.len() });
        }

        let (y_min, y_max) = polygon
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), v| (lo.min(v.y), hi.max(v.y)));

        let edge_table = build_edge_table(&polygon, y_min, y_max);

        let mut active: Vec<Edge> = Vec::new();
        let mut visited = HashSet::new();
        let mut filled = Vec::new();

        for (y, starting) in (y_min..=y_max).zip(edge_table) {
            active.extend(starting);
            active.retain(|e| e.y_max != y);
            // Stable: equal x keeps edge-table insertion order.
            active.sort_by(|a, b| a.x.total_cmp(&b.x));

            for pair in active.chunks_exact(2) {
                let (start, end) = span(pair[0].x, pair[1].x);
                for x in start..=end {
                    let cell = Cell::new(x, y);
                    let color = canvas.color_at(cell);
                    if color == boundary || color == fill {
                        continue;
                    }
                    if visited.insert(cell) {
                        filled.push(cell);
                    }
                }
            }

            for edge in &mut active {
                edge.x += edge.inverse_slope;
            }
        }

        log::debug!("scanline fill computed {} cells", filled.len());
        Ok(FillRun::new(filled, fill))
    }
}

/// Bucket every non-horizontal edge (wrapping last to first) by the
/// scanline of its lower endpoint, relative to `y_min`.
fn build_edge_table(polygon: &[Cell], y_min: i32, y_max: i32) -> Vec<Vec<Edge>> {
    let rows = (i64::from(y_max) - i64::from(y_min) + 1) as usize;
    let mut table: Vec<Vec<Edge>> = vec![Vec::new(); rows];

    let n = polygon.len();
    for i in 0..n {
        let (mut lower, mut upper) = (polygon[i], polygon[(i + 1) % n]);
        if lower.y == upper.y {
            continue;
        }
        if lower.y > upper.y {
            std::mem::swap(&mut lower, &mut upper);
        }

        let edge = Edge {
            y_max: upper.y,
            x: f64::from(lower.x),
            inverse_slope: (f64::from(upper.x) - f64::from(lower.x))
                / (f64::from(upper.y) - f64::from(lower.y)),
        };
        table[(i64::from(lower.y) - i64::from(y_min)) as usize].push(edge);
    }

    table
}

/// Integer span between two edge intersections.
///
/// Each end rounds to the nearest cell; an exact half rounds toward the
/// inside of the span so the span never pokes past either intersection
/// on a tie.
fn span(x0: f64, x1: f64) -> (i32, i32) {
    let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    ((left + 0.5).floor() as i32, (right - 0.5).ceil() as i32)
}
