// src/geometry/path/core.rs

use crate::types::{Bounds2D, Point2D};

/// Ein einzelnes Element eines Pfads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// Setzt den Startpunkt eines (Sub-)Pfads ohne zu zeichnen.
    MoveTo(Point2D),
    /// Gerades Segment zum Zielpunkt.
    LineTo(Point2D),
    /// Quadratisches Bézier-Segment mit einem Kontrollpunkt.
    QuadTo { control: Point2D, to: Point2D },
    /// Kubisches Bézier-Segment mit zwei Kontrollpunkten.
    CubicTo {
        control1: Point2D,
        control2: Point2D,
        to: Point2D,
    },
    /// Schließt den aktuellen Subpfad zurück zum Startpunkt.
    Close,
}

/// Eine Umriss-Beschreibung aus Pfad-Elementen.
///
/// Ein Pfad kann mehrere Subpfade enthalten; der Clipping-Kern arbeitet
/// pro Aufruf mit genau einer äußeren Schleife (siehe [`super::PathSampler`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Erstellt einen leeren Pfad.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zugriff auf die Elemente.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Ist der Pfad leer?
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Anzahl der Elemente.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Setzt den Startpunkt eines neuen Subpfads.
    pub fn move_to(mut self, to: Point2D) -> Self {
        self.elements.push(PathElement::MoveTo(to));
        self
    }

    /// Gerades Segment zum Zielpunkt.
    pub fn line_to(mut self, to: Point2D) -> Self {
        self.elements.push(PathElement::LineTo(to));
        self
    }

    /// Quadratisches Bézier-Segment.
    pub fn quad_to(mut self, control: Point2D, to: Point2D) -> Self {
        self.elements.push(PathElement::QuadTo { control, to });
        self
    }

    /// Kubisches Bézier-Segment.
    pub fn cubic_to(mut self, control1: Point2D, control2: Point2D, to: Point2D) -> Self {
        self.elements.push(PathElement::CubicTo {
            control1,
            control2,
            to,
        });
        self
    }

    /// Schließt den aktuellen Subpfad.
    pub fn close(mut self) -> Self {
        self.elements.push(PathElement::Close);
        self
    }

    /// Geschlossener Rechteck-Pfad aus einer Bounding Box.
    pub fn rect(bounds: Bounds2D) -> Self {
        let [a, b, c, d] = bounds.corners();
        Self::new().move_to(a).line_to(b).line_to(c).line_to(d).close()
    }
}
