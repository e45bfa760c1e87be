// src/geometry/path/mod.rs

// Deklaration der Untermodule für Pfad-Funktionalität
pub mod bezier; // Bézier-Kurven (Auswertung und Unterteilung)
pub mod core; // Enthält die Path-Struktur selbst
pub mod sampler; // Abflachung Pfad <-> Polygon

// Re-Exporte für den einfachen Zugriff
pub use self::bezier::BezierCurve;
pub use self::core::{Path, PathElement};
pub use self::sampler::PathSampler;
