// src/lib.rs

//! Clipping-Kern eines interaktiven Vektor-/Flussdiagramm-Editors:
//! berechnet den geometrischen Schnitt eines beliebigen geschlossenen
//! Umrisses mit einer Clip-Region (Rechteck oder Freiform-Polygon).
//!
//! Der analytische Weg (Kanten-Schnitt plus Winkel-Rekonstruktion) wird
//! validiert und fällt bei Ablehnung auf eine Rasterisierung mit
//! Randverfolgung zurück; ein leeres Ergebnis bedeutet "kein Schnitt",
//! nie einen Fehler. Einstieg ist [`clipping::ClipEngine`].

pub mod clipping;
pub mod error;
pub mod geometry;
pub mod shape;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{ClipError, ClipResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        clipping::{
            ClipAnalysis, ClipConfig, ClipEngine, ClipEvent, ClipObserver, ClipStats,
            NullObserver, PolygonIntersector, RasterClipper, RectClipper, RejectReason,
            ResultValidator, TracingObserver,
        },
        error::{ClipError, ClipResult},
        geometry::{BezierCurve, Orientation, Path, PathElement, PathSampler, Polygon, PolygonProperties},
        shape::ShapeOutline,
        types::*,
    };
}
