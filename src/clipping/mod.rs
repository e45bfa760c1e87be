// src/clipping/mod.rs

// Deklaration der Untermodule der Clip-Pipeline
pub mod engine; // Fassade, Konfiguration und Statistiken
pub mod observer; // Injizierte Beobachter-Fähigkeit
pub mod polygon; // Allgemeiner Polygon-Schnitt (Winkel-Rekonstruktion)
pub mod raster; // Rasterisierender Fallback
pub mod rect; // Rechteck-Clipping (Cohen-Sutherland, Sutherland-Hodgman)
pub mod validate; // Plausibilitätsprüfung analytischer Ergebnisse

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Elemente
pub use self::engine::{ClipAnalysis, ClipConfig, ClipEngine, ClipStats};
pub use self::observer::{ClipEvent, ClipObserver, NullObserver, TracingObserver};
pub use self::polygon::{EdgeIntersection, PolygonIntersector};
pub use self::raster::{Bitmap, RasterClipper};
pub use self::rect::RectClipper;
pub use self::validate::{RejectReason, ResultValidator};
