//! gridfill - Raster region filling on a cell grid
//!
//! This library provides:
//! - A sparse cell canvas with tagged region colors and a change journal
//! - Bresenham line rasterization for building polygon boundaries
//! - Flood fill, boundary fill and scanline polygon fill engines
//! - A tick-driven scheduler that reveals a computed fill incrementally
//! - A session type exposing the whole workflow as explicit method calls

pub mod boundary;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod fill;
pub mod palette;
pub mod scheduler;
pub mod session;
pub mod shapes;
