//! Boundary construction from clicked vertices.
//!
//! [`BoundaryBuilder`] owns the ordered vertex list (click order is the
//! polygon winding order) and paints the boundary layer of a
//! [`CellCanvas`]: the vertices themselves plus any rasterized edges.

use crate::canvas::{Cell, CellCanvas, ColorTag};
use crate::shapes::{rasterize_line, rasterize_polyline};

/// Which edges have been rasterized onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EdgeState {
    /// Only vertex cells are painted.
    #[default]
    None,
    /// Edges between the first `n` vertices are painted.
    Open(usize),
    /// All edges including last-to-first are painted.
    Closed,
}

/// Ordered list of boundary vertices and the boundary cells derived from it.
#[derive(Debug, Clone, Default)]
pub struct BoundaryBuilder {
    vertices: Vec<Cell>,
    edges: EdgeState,
    /// Extra single edges drawn with [`BoundaryBuilder::draw_last_edge`].
    extra_edges: Vec<(Cell, Cell)>,
}

impl BoundaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vertices in click order.
    pub fn vertices(&self) -> &[Cell] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a vertex and paint it with the boundary tag.
    pub fn add_vertex(&mut self, canvas: &mut CellCanvas, cell: Cell) {
        self.vertices.push(cell);
        canvas.paint(cell, ColorTag::Boundary);
    }

    /// Remove the most recent vertex. No-op on an empty list.
    ///
    /// The boundary layer is repainted from the remaining vertices so that
    /// edges touching the removed vertex disappear with it. The caller is
    /// responsible for discarding any fill computed against the old shape.
    pub fn undo_last(&mut self, canvas: &mut CellCanvas) -> Option<Cell> {
        let removed = self.vertices.pop()?;
        let len = self.vertices.len();

        self.edges = match self.edges {
            EdgeState::None => EdgeState::None,
            EdgeState::Open(n) => EdgeState::Open(n.min(len)),
            // Removing a vertex opens the polygon back up.
            EdgeState::Closed => EdgeState::Open(len),
        };
        self.extra_edges.retain(|(a, b)| *a != removed && *b != removed);

        self.repaint(canvas);
        Some(removed)
    }

    /// Rasterize every consecutive edge, plus last-to-first when `closed`.
    ///
    /// Returns the number of cells painted (shared cells counted per edge).
    pub fn draw_edges(&mut self, canvas: &mut CellCanvas, closed: bool) -> usize {
        self.edges = if closed { EdgeState::Closed } else { EdgeState::Open(self.vertices.len()) };
        let cells = self.edge_cells();
        for cell in &cells {
            canvas.paint(*cell, ColorTag::Boundary);
        }
        cells.len()
    }

    /// Rasterize only the edge between the two most recent vertices.
    ///
    /// Returns the number of cells painted, 0 with fewer than two vertices.
    pub fn draw_last_edge(&mut self, canvas: &mut CellCanvas) -> usize {
        let [.., a, b] = self.vertices[..] else {
            return 0;
        };
        self.extra_edges.push((a, b));
        let cells = rasterize_line(a, b);
        for cell in &cells {
            canvas.paint(*cell, ColorTag::Boundary);
        }
        cells.len()
    }

    /// All boundary cells currently implied by the vertex list and drawn
    /// edges, in drawing order. May contain repeats.
    pub fn boundary_cells(&self) -> Vec<Cell> {
        let mut cells = self.vertices.clone();
        cells.extend(self.edge_cells());
        cells
    }

    /// Forget all vertices and drawn edges. The canvas is left untouched.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges = EdgeState::None;
        self.extra_edges.clear();
    }

    fn edge_cells(&self) -> Vec<Cell> {
        let mut cells = match self.edges {
            EdgeState::None => Vec::new(),
            EdgeState::Open(n) => rasterize_polyline(&self.vertices[..n], false),
            EdgeState::Closed => rasterize_polyline(&self.vertices, true),
        };
        for (a, b) in &self.extra_edges {
            cells.extend(rasterize_line(*a, *b));
        }
        cells
    }

    fn repaint(&self, canvas: &mut CellCanvas) {
        canvas.clear_matching(&[ColorTag::Boundary]);
        for cell in self.boundary_cells() {
            canvas.paint(cell, ColorTag::Boundary);
        }
    }
}
