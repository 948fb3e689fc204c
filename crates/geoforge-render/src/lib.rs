//! geoforge render crate.
//!
//! Owns the GPU device layer and the cell-geometry rendering pipeline that
//! draws the geodata grid for the editor shell.

pub mod camera;
pub mod config;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
