//! asciify library crate.
//!
//! Converts raster images into grids of ASCII glyphs and renders those
//! grids back to text or to an image.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod raster;
