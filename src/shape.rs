// src/shape.rs

use crate::geometry::path::{Path, PathSampler};
use crate::geometry::polygon::{Polygon, PolygonProperties};
use crate::types::{Bounds2D, Point2D};

/// Umriss-Varianten, über die Formklassen mit dem Clip-Kern sprechen.
///
/// Nach einem Clip entscheidet [`ShapeOutline::rebuild_from`] per
/// Variantenabgleich, ob das Ergebnis wieder in die Rechteck-Primitive
/// kollabiert oder eine Freiform wird. Die eigentliche
/// Rekonstruktions-Politik (wann ein Aufrufer überhaupt rekonstruiert)
/// bleibt außerhalb des Kerns.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeOutline {
    /// Achsenparalleles Rechteck
    Rectangle(Bounds2D),
    /// Freiform als geschlossenes Polygon
    Freeform(Polygon),
}

impl ShapeOutline {
    /// Umriss als Pfad für den Clip-Kern
    pub fn to_path(&self) -> Path {
        match self {
            Self::Rectangle(bounds) => Path::rect(*bounds),
            Self::Freeform(polygon) => {
                PathSampler::new().build(polygon.effective_vertices(), true)
            }
        }
    }

    /// Baut aus einer Clip-Ergebnis-Punktliste wieder einen Umriss.
    ///
    /// Degenerierte Eingaben (< 3 Punkte) ergeben `None`; der Aufrufer
    /// behandelt das als "Clip ohne Wirkung" und lässt die Form unverändert.
    pub fn rebuild_from(points: &[Point2D], tolerance: f64) -> Option<ShapeOutline> {
        let polygon = Polygon::closed(points.to_vec()).ok()?;

        if polygon.is_rectangular(tolerance) {
            let bounds = polygon.bounds()?;
            Some(Self::Rectangle(bounds))
        } else {
            Some(Self::Freeform(polygon))
        }
    }
}
