// src/geometry/polygon/properties.rs

use crate::geometry::polygon::core::Polygon;
use crate::types::Point2D;
use crate::utils::{comparison, tolerances};

/// Trait für geometrische Eigenschaften von Polygonen.
pub trait PolygonProperties {
    /// Berechnet die Fläche des Polygons unter Verwendung der Shoelace-Formel.
    /// Offene Polygone werden für die Flächenberechnung implizit geschlossen.
    fn area(&self) -> f64;

    /// Berechnet den Umfang des Polygons.
    fn perimeter(&self) -> f64;

    /// Prüft, ob ein Punkt innerhalb des Polygons liegt (Ray-Casting).
    /// Funktioniert für einfache Polygone (nicht selbst-überschneidend).
    fn contains_point(&self, point: Point2D) -> bool;

    /// Bestimmt die Orientierung des Polygons.
    /// Basiert auf dem Vorzeichen der (doppelten) Fläche.
    fn orientation(&self) -> Orientation;

    /// Berechnet den geometrischen Schwerpunkt (Massenmittelpunkt).
    /// Gibt `None` zurück, wenn das Polygon degeneriert ist.
    fn geometric_centroid(&self) -> Option<Point2D>;

    /// Prüft, ob das Polygon ein achsenparalleles Rechteck ist: wahr,
    /// wenn die Polygonfläche der Fläche seiner Bounding Box entspricht
    /// (relative Toleranz).
    fn is_rectangular(&self, tolerance: f64) -> bool;
}

/// Gibt die Orientierung eines Polygons an.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear, // Alle Punkte liegen auf einer Linie
}

/// Doppelte vorzeichenbehaftete Fläche über die eindeutigen Vertices.
fn signed_area_doubled(vertices: &[Point2D]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let p1 = vertices[i];
        let p2 = vertices[(i + 1) % n];
        sum += (p1.x * p2.y) - (p2.x * p1.y);
    }
    sum
}

impl PolygonProperties for Polygon {
    fn area(&self) -> f64 {
        (signed_area_doubled(self.effective_vertices()) * 0.5).abs()
    }

    fn perimeter(&self) -> f64 {
        let vertices = self.effective_vertices();
        let n = vertices.len();

        if n < 2 {
            return 0.0;
        }

        let mut perimeter_sum = 0.0;
        let num_segments = if self.is_closed() { n } else { n - 1 };

        for i in 0..num_segments {
            perimeter_sum += vertices[i].distance(vertices[(i + 1) % n]);
        }
        perimeter_sum
    }

    fn contains_point(&self, point: Point2D) -> bool {
        let vertices = self.effective_vertices();
        let n = vertices.len();

        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;

        for i in 0..n {
            let vi = vertices[i];
            let vj = vertices[j];

            // Ray-Casting: Prüfe, ob der Strahl von `point` nach rechts die
            // Kante (vi, vj) schneidet. Epsilon im Nenner zur Vermeidung von
            // DivByZero bei horizontalen Kanten.
            let intersect = ((vi.y > point.y) != (vj.y > point.y))
                && (point.x
                    < (vj.x - vi.x) * (point.y - vi.y)
                        / (vj.y - vi.y + tolerances::PARALLEL_EPSILON)
                        + vi.x);

            if intersect {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn orientation(&self) -> Orientation {
        let vertices = self.effective_vertices();
        let n = vertices.len();

        if n < 3 {
            return Orientation::Collinear;
        }

        let signed = signed_area_doubled(vertices);

        // Toleranz basierend auf Anzahl der Punkte
        if signed.abs() < tolerances::EPSILON * n as f64 {
            Orientation::Collinear
        } else if signed > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    fn geometric_centroid(&self) -> Option<Point2D> {
        let vertices = self.effective_vertices();
        let n = vertices.len();

        if n < 3 {
            return None;
        }

        let signed = signed_area_doubled(vertices);
        if signed.abs() < tolerances::EPSILON * n as f64 {
            return self.centroid(); // Fallback bei keiner Fläche (Linie)
        }

        let mut centroid_x = 0.0;
        let mut centroid_y = 0.0;

        for i in 0..n {
            let p1 = vertices[i];
            let p2 = vertices[(i + 1) % n];
            let factor = (p1.x * p2.y) - (p2.x * p1.y);
            centroid_x += (p1.x + p2.x) * factor;
            centroid_y += (p1.y + p2.y) * factor;
        }

        let inv_area_factor = 1.0 / (3.0 * signed);
        Some(Point2D::new(
            centroid_x * inv_area_factor,
            centroid_y * inv_area_factor,
        ))
    }

    fn is_rectangular(&self, tolerance: f64) -> bool {
        if self.effective_len() < 3 {
            return false;
        }

        let Some(bounds) = self.bounds() else {
            return false;
        };

        let box_area = bounds.area();
        if comparison::nearly_zero(box_area) {
            return false;
        }

        comparison::nearly_equal_eps(box_area, self.area(), tolerance * box_area)
    }
}
