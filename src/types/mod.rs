// src/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendete externe Typen
pub use glam::DVec2;

// Einheitlicher Punkttyp für das gesamte Crate (double precision)
pub type Point2D = DVec2;
