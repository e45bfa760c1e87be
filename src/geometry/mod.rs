// src/geometry/mod.rs

pub mod path;
pub mod polygon;

// Re-Exporte für den einfachen Zugriff
pub use self::path::{BezierCurve, Path, PathElement, PathSampler};
pub use self::polygon::{Orientation, Polygon, PolygonProperties};
