//! Fill session: the boundary between the engine and a view/controller.
//!
//! A [`FillSession`] owns the canvas, the boundary builder and the reveal
//! scheduler, and exposes the inbound events a UI produces (vertex and seed
//! clicks, fill/reset/clear requests, ticks). Outbound effects are the
//! canvas change journal and a queue of [`SessionEvent`]s; fill conditions
//! such as a seed on the boundary are reported there, never returned as
//! errors.

use crate::boundary::BoundaryBuilder;
use crate::canvas::{Bounds, CanvasChange, Cell, CellCanvas, ColorTag};
use crate::config::GridfillConfig;
use crate::fill::{fill_bounds, Algorithm, Connectivity, FillError, FillRequest};
use crate::scheduler::{FillScheduler, Tick};
use serde::Serialize;

/// Something the surrounding UI may want to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    VertexAdded { cell: Cell },
    VertexRemoved { cell: Cell },
    SeedSelected { cell: Cell },
    EdgesDrawn { cells: usize },
    FillStarted { algorithm: Algorithm, cells: usize },
    /// The fill was not started; `reason` is the display message.
    FillRejected { kind: &'static str, reason: String },
    FillCancelled { unrevealed: usize },
    FillCompleted { painted: usize },
    FillReset,
    Cleared,
}

/// Interactive fill state driven by explicit method calls.
#[derive(Debug)]
pub struct FillSession {
    canvas: CellCanvas,
    boundary: BoundaryBuilder,
    scheduler: FillScheduler,
    seed: Option<Cell>,
    canvas_extent: Bounds,
    padding: i32,
    mark_seed: bool,
    close_polygon: bool,
    events: Vec<SessionEvent>,
}

impl Default for FillSession {
    fn default() -> Self {
        Self::new(&GridfillConfig::default())
    }
}

impl FillSession {
    pub fn new(config: &GridfillConfig) -> Self {
        Self {
            canvas: CellCanvas::new(),
            boundary: BoundaryBuilder::new(),
            scheduler: FillScheduler::new(config.interval(), config.animation.batch),
            seed: None,
            canvas_extent: config.canvas_extent(),
            padding: config.canvas.padding,
            mark_seed: config.fill.mark_seed,
            close_polygon: config.fill.close_polygon,
            events: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &CellCanvas {
        &self.canvas
    }

    /// Mutable canvas access, e.g. for painting obstacles with
    /// [`ColorTag::Other`].
    pub fn canvas_mut(&mut self) -> &mut CellCanvas {
        &mut self.canvas
    }

    pub fn vertices(&self) -> &[Cell] {
        self.boundary.vertices()
    }

    pub fn seed(&self) -> Option<Cell> {
        self.seed
    }

    pub fn scheduler(&self) -> &FillScheduler {
        &self.scheduler
    }

    pub fn is_filling(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Bounding box that seeded fills are confined to.
    pub fn bounds(&self) -> Bounds {
        fill_bounds(self.boundary.vertices(), self.canvas_extent, self.padding)
    }

    /// Add a boundary vertex.
    pub fn vertex_clicked(&mut self, cell: Cell) {
        self.boundary.add_vertex(&mut self.canvas, cell);
        log::debug!("vertex {} added ({} total)", cell, self.boundary.len());
        self.events.push(SessionEvent::VertexAdded { cell });
    }

    /// Remove the last boundary vertex. Any live fill is cancelled since it
    /// was computed for the old shape.
    pub fn undo_vertex(&mut self) {
        let Some(cell) = self.boundary.undo_last(&mut self.canvas) else {
            return;
        };
        self.cancel_live_run();
        self.events.push(SessionEvent::VertexRemoved { cell });
    }

    /// Select the seed cell for flood and boundary fill.
    pub fn seed_clicked(&mut self, cell: Cell) {
        self.clear_seed_marker();
        self.seed = Some(cell);
        if self.mark_seed && self.canvas.color_at(cell) == ColorTag::Background {
            self.canvas.paint(cell, ColorTag::Seed);
        }
        log::debug!("seed set at {}", cell);
        self.events.push(SessionEvent::SeedSelected { cell });
    }

    /// Rasterize all boundary edges, closing the polygon if configured.
    pub fn draw_edges(&mut self) {
        let cells = self.boundary.draw_edges(&mut self.canvas, self.close_polygon);
        self.events.push(SessionEvent::EdgesDrawn { cells });
    }

    /// Rasterize the edge between the two most recent vertices.
    pub fn draw_last_edge(&mut self) {
        let cells = self.boundary.draw_last_edge(&mut self.canvas);
        if cells > 0 {
            log::debug!("drew line: {} cells", cells);
            self.events.push(SessionEvent::EdgesDrawn { cells });
        }
    }

    /// Compute a fill and schedule it for reveal.
    ///
    /// Returns the number of cells scheduled; 0 when the fill was rejected,
    /// in which case a [`SessionEvent::FillRejected`] explains why.
    pub fn start_fill(
        &mut self,
        algorithm: Algorithm,
        connectivity: Connectivity,
        boundary: ColorTag,
        fill: ColorTag,
    ) -> usize {
        self.cancel_live_run();

        let request = FillRequest {
            algorithm,
            seed: self.seed,
            vertices: self.boundary.vertices(),
            bounds: self.bounds(),
            connectivity,
            boundary,
            fill,
        };
        log::info!("starting {} ({})", algorithm, connectivity);

        // The seed marker must not take part in color matching, but it stays
        // on the canvas if the fill is rejected.
        let marker = self
            .seed
            .filter(|&seed| self.canvas.is_painted_with(seed, ColorTag::Seed));
        let result = match marker {
            Some(seed) => {
                let mut unmarked = self.canvas.clone();
                unmarked.erase(seed);
                request.compute(&unmarked)
            }
            None => request.compute(&self.canvas),
        };
        if result.is_ok() {
            self.clear_seed_marker();
        }

        match result {
            Ok(run) if run.is_empty() => {
                log::info!("{}: no cells to fill", algorithm);
                self.events.push(SessionEvent::FillStarted { algorithm, cells: 0 });
                0
            }
            Ok(run) => {
                let cells = run.len();
                self.scheduler.start(run);
                self.events.push(SessionEvent::FillStarted { algorithm, cells });
                cells
            }
            Err(e) => {
                self.reject(e);
                0
            }
        }
    }

    /// Reveal the next batch of the live fill. Returns whether a fill is
    /// still in progress afterwards.
    pub fn tick(&mut self) -> bool {
        match self.scheduler.tick(&mut self.canvas) {
            Tick::Idle => false,
            Tick::Painted(_) => true,
            Tick::Finished { total, .. } => {
                self.events.push(SessionEvent::FillCompleted { painted: total });
                false
            }
        }
    }

    /// Tick until the live fill is fully revealed. Returns the tick count.
    pub fn finish(&mut self) -> usize {
        let mut ticks = 0;
        while self.is_filling() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Cancel the live fill, forget the seed and erase the fill and seed
    /// layers. The boundary is kept.
    pub fn reset_fill(&mut self) {
        self.cancel_live_run();
        self.seed = None;
        let erased = self.canvas.clear_matching(&[ColorTag::Fill, ColorTag::Seed]);
        log::info!("reset fill, {} cells erased", erased);
        self.events.push(SessionEvent::FillReset);
    }

    /// Cancel the live fill and forget everything.
    pub fn clear_all(&mut self) {
        self.cancel_live_run();
        self.seed = None;
        self.boundary.clear();
        self.canvas.clear();
        log::info!("canvas cleared");
        self.events.push(SessionEvent::Cleared);
    }

    /// Drain pending UI events, oldest first.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain pending canvas changes for the renderer, oldest first.
    pub fn take_changes(&mut self) -> Vec<CanvasChange> {
        self.canvas.take_changes()
    }

    fn reject(&mut self, error: FillError) {
        log::warn!("{}", error);
        self.events.push(SessionEvent::FillRejected {
            kind: error.kind(),
            reason: error.to_string(),
        });
    }

    fn cancel_live_run(&mut self) {
        if let Some(run) = self.scheduler.cancel() {
            self.events.push(SessionEvent::FillCancelled { unrevealed: run.remaining() });
        }
    }

    fn clear_seed_marker(&mut self) {
        if let Some(seed) = self.seed {
            if self.canvas.is_painted_with(seed, ColorTag::Seed) {
                self.canvas.erase(seed);
            }
        }
    }
}
