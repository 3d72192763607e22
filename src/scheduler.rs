//! Incremental reveal of a computed fill.
//!
//! [`FillScheduler`] holds at most one live [`FillRun`] and paints it onto a
//! [`CellCanvas`] a fixed batch of cells per [`tick`](FillScheduler::tick).
//! It is not bound to any clock: a UI timer, a loop sleeping
//! [`interval`](FillScheduler::interval), or a test can drive the ticks.

use crate::canvas::{Cell, CellCanvas};
use crate::fill::FillRun;
use std::time::Duration;

/// Default delay between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5);

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// No run is live.
    Idle,
    /// Cells were painted and more remain.
    Painted(Vec<Cell>),
    /// The last cells were painted; the scheduler has stopped.
    Finished { painted: Vec<Cell>, total: usize },
}

/// Cooperative, single-run reveal scheduler.
#[derive(Debug)]
pub struct FillScheduler {
    run: Option<FillRun>,
    interval: Duration,
    batch: usize,
}

impl Default for FillScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, 1)
    }
}

impl FillScheduler {
    /// A scheduler painting `batch` cells per tick (at least one).
    pub fn new(interval: Duration, batch: usize) -> Self {
        Self { run: None, interval, batch: batch.max(1) }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn batch(&self) -> usize {
        self.batch
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// The live run, if any.
    pub fn current(&self) -> Option<&FillRun> {
        self.run.as_ref()
    }

    /// Make `run` the live run, cancelling any run already in progress.
    ///
    /// An empty run is discarded immediately and nothing becomes live.
    pub fn start(&mut self, run: FillRun) {
        if let Some(previous) = self.cancel() {
            log::info!(
                "cancelled fill with {} of {} cells unrevealed",
                previous.remaining(),
                previous.len()
            );
        }
        if run.is_empty() {
            return;
        }
        log::info!("revealing {} cells, {} per tick", run.len(), self.batch);
        self.run = Some(run);
    }

    /// Stop ticking and discard the live run without painting further.
    pub fn cancel(&mut self) -> Option<FillRun> {
        self.run.take()
    }

    /// Paint the next batch of the live run onto `canvas`.
    pub fn tick(&mut self, canvas: &mut CellCanvas) -> Tick {
        let Some(run) = self.run.as_mut() else {
            return Tick::Idle;
        };

        let color = run.color();
        let painted = run.advance(self.batch).to_vec();
        for cell in &painted {
            canvas.paint(*cell, color);
        }

        if run.is_complete() {
            let total = run.len();
            self.run = None;
            log::info!("fill completed, {} cells painted", total);
            Tick::Finished { painted, total }
        } else {
            Tick::Painted(painted)
        }
    }

    /// Tick until the live run is done. Returns the number of ticks taken.
    pub fn drain(&mut self, canvas: &mut CellCanvas) -> usize {
        let mut ticks = 0;
        while self.is_active() {
            self.tick(canvas);
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ColorTag;

    fn run_of(n: i32) -> FillRun {
        FillRun::new((0..n).map(|x| Cell::new(x, 0)).collect(), ColorTag::Fill)
    }

    #[test]
    fn test_idle_without_run() {
        let mut scheduler = FillScheduler::default();
        let mut canvas = CellCanvas::new();
        assert_eq!(scheduler.tick(&mut canvas), Tick::Idle);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_one_cell_per_tick() {
        let mut scheduler = FillScheduler::default();
        let mut canvas = CellCanvas::new();
        scheduler.start(run_of(3));

        assert_eq!(scheduler.tick(&mut canvas), Tick::Painted(vec![Cell::new(0, 0)]));
        assert_eq!(canvas.count(ColorTag::Fill), 1);
        assert_eq!(scheduler.tick(&mut canvas), Tick::Painted(vec![Cell::new(1, 0)]));
        assert_eq!(
            scheduler.tick(&mut canvas),
            Tick::Finished { painted: vec![Cell::new(2, 0)], total: 3 }
        );
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.tick(&mut canvas), Tick::Idle);
        assert_eq!(canvas.count(ColorTag::Fill), 3);
    }

    #[test]
    fn test_batched_ticks() {
        let mut scheduler = FillScheduler::new(Duration::from_millis(1), 4);
        let mut canvas = CellCanvas::new();
        scheduler.start(run_of(10));
        assert_eq!(scheduler.drain(&mut canvas), 3);
        assert_eq!(canvas.count(ColorTag::Fill), 10);
    }

    #[test]
    fn test_zero_batch_is_clamped() {
        let scheduler = FillScheduler::new(DEFAULT_INTERVAL, 0);
        assert_eq!(scheduler.batch(), 1);
    }

    #[test]
    fn test_cancel_stops_painting() {
        let mut scheduler = FillScheduler::default();
        let mut canvas = CellCanvas::new();
        scheduler.start(run_of(5));
        scheduler.tick(&mut canvas);

        let cancelled = scheduler.cancel().expect("run was live");
        assert_eq!(cancelled.cursor(), 1);
        assert_eq!(scheduler.tick(&mut canvas), Tick::Idle);
        assert_eq!(canvas.count(ColorTag::Fill), 1);
    }

    #[test_log::test]
    fn test_start_replaces_live_run() {
        let mut scheduler = FillScheduler::default();
        let mut canvas = CellCanvas::new();
        scheduler.start(run_of(5));
        scheduler.tick(&mut canvas);

        let replacement = FillRun::new(vec![Cell::new(0, 9)], ColorTag::Seed);
        scheduler.start(replacement);
        assert_eq!(
            scheduler.tick(&mut canvas),
            Tick::Finished { painted: vec![Cell::new(0, 9)], total: 1 }
        );
        // Only the first cell of the cancelled run was ever revealed.
        assert_eq!(canvas.count(ColorTag::Fill), 1);
        assert_eq!(canvas.count(ColorTag::Seed), 1);
    }

    #[test]
    fn test_empty_run_never_goes_live() {
        let mut scheduler = FillScheduler::default();
        scheduler.start(FillRun::new(Vec::new(), ColorTag::Fill));
        assert!(!scheduler.is_active());
    }
}
