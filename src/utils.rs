// src/utils.rs

/// Benannte Toleranzen des Clipping-Kerns.
///
/// Alle Epsilon-Werte sind hier zentral dokumentiert, statt pro Funktion
/// neu hergeleitet zu werden. Einheiten stehen jeweils dabei.
pub mod tolerances {
    /// Generisches f64-Vergleichs-Epsilon (einheitenlos).
    pub const EPSILON: f64 = 1e-10;

    /// Abstand in Weltkoordinaten, unterhalb dessen zwei Punkte als
    /// identisch gelten (Schnittpunkt-Deduplizierung, Konturbereinigung).
    pub const POINT_EPSILON: f64 = 1e-3;

    /// Mindestbetrag eines Nenners in der Schnittpunktberechnung
    /// (einheitenlos, Determinanten-Guard). Kleinere Werte werden auf
    /// dieses Epsilon geklemmt und als "kein Schnitt" behandelt.
    pub const PARALLEL_EPSILON: f64 = 1e-8;

    /// Anteil der Ergebnis-Vertices, der innerhalb des Clip-Polygons
    /// (oder nahe seines Randes) liegen muss, damit der Validator das
    /// analytische Ergebnis akzeptiert (Verhältnis, 0..1).
    pub const MEMBERSHIP_RATIO: f64 = 0.95;

    /// Abstand vom Clip-Rand in Weltkoordinaten, innerhalb dessen ein
    /// Ergebnis-Vertex noch als zugehörig zählt.
    pub const BOUNDARY_SLACK: f64 = 0.5;

    /// Standard-Flachheit beim Abflachen von Kurvensegmenten
    /// (Weltkoordinaten).
    pub const FLATTEN_TOLERANCE: f64 = 0.25;

    /// Arbeitsauflösung des Raster-Fallbacks in Pixeln (quadratisch).
    pub const RASTER_RESOLUTION: usize = 1000;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::tolerances::{EPSILON, PARALLEL_EPSILON};

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob zwei Floats mit custom Toleranz gleich sind
    pub fn nearly_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f64) -> bool {
        a.abs() < EPSILON
    }

    /// Klemmt einen Nenner auf mindestens [`PARALLEL_EPSILON`], damit
    /// achsenparallele bzw. degenerierte Segmente kein NaN/Inf erzeugen.
    pub fn guard_denominator(d: f64) -> f64 {
        if d.abs() < PARALLEL_EPSILON {
            if d < 0.0 { -PARALLEL_EPSILON } else { PARALLEL_EPSILON }
        } else {
            d
        }
    }
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use crate::types::Point2D;
    use crate::utils::tolerances;

    /// Berechnet das Kreuzprodukt zweier 2D-Vektoren (Skalar)
    pub fn cross_product_2d(a: Point2D, b: Point2D) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Projiziert einen Punkt auf eine Linie
    pub fn project_point_on_line(point: Point2D, line_start: Point2D, line_end: Point2D) -> Point2D {
        let line_vec = line_end - line_start;
        let point_vec = point - line_start;

        let line_length_sq = line_vec.length_squared();
        if line_length_sq < tolerances::EPSILON {
            return line_start; // Linie ist ein Punkt
        }

        let projection_length = point_vec.dot(line_vec) / line_length_sq;
        line_start + line_vec * projection_length
    }

    /// Berechnet den senkrechten Abstand von einem Punkt zu einer Linie
    pub fn point_line_distance(point: Point2D, line_start: Point2D, line_end: Point2D) -> f64 {
        let projection = project_point_on_line(point, line_start, line_end);
        point.distance(projection)
    }

    /// Berechnet den Abstand von einem Punkt zu einem Liniensegment
    /// (Projektion auf [0, 1] geklemmt)
    pub fn point_segment_distance(point: Point2D, segment_start: Point2D, segment_end: Point2D) -> f64 {
        let segment_vec = segment_end - segment_start;
        let length_sq = segment_vec.length_squared();
        if length_sq < tolerances::EPSILON {
            return point.distance(segment_start);
        }

        let t = ((point - segment_start).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
        point.distance(segment_start + segment_vec * t)
    }

    /// Prüft ob ein Punkt auf einem Liniensegment liegt (innerhalb einer Toleranz)
    pub fn point_on_line_segment(
        point: Point2D,
        segment_start: Point2D,
        segment_end: Point2D,
        tolerance: f64,
    ) -> bool {
        if point_line_distance(point, segment_start, segment_end) >= tolerance {
            return false;
        }
        // Prüfe, ob der Punkt zwischen den Endpunkten des Segments liegt
        let dot = (point - segment_start).dot(segment_end - segment_start);
        if dot < -tolerance {
            return false;
        }
        let squared_length = (segment_end - segment_start).length_squared();
        if dot > squared_length + tolerance {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point2D;

    #[test]
    fn test_guard_denominator() {
        assert_eq!(comparison::guard_denominator(0.0), tolerances::PARALLEL_EPSILON);
        assert_eq!(comparison::guard_denominator(-0.0), tolerances::PARALLEL_EPSILON);
        assert_eq!(
            comparison::guard_denominator(-1e-12),
            -tolerances::PARALLEL_EPSILON
        );
        assert_eq!(comparison::guard_denominator(2.5), 2.5);
    }

    #[test]
    fn test_point_on_line_segment() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 0.0);

        assert!(simple_geometry::point_on_line_segment(
            Point2D::new(5.0, 0.0),
            a,
            b,
            1e-6
        ));
        // Auf der Geraden, aber außerhalb des Segments
        assert!(!simple_geometry::point_on_line_segment(
            Point2D::new(-2.0, 0.0),
            a,
            b,
            1e-6
        ));
        assert!(!simple_geometry::point_on_line_segment(
            Point2D::new(5.0, 1.0),
            a,
            b,
            1e-6
        ));
    }

    #[test]
    fn test_point_segment_distance_clamps_to_endpoints() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 0.0);

        assert!((simple_geometry::point_segment_distance(Point2D::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        // Jenseits des Endpunkts zählt der Abstand zum Endpunkt selbst
        assert!((simple_geometry::point_segment_distance(Point2D::new(14.0, 3.0), a, b) - 5.0).abs() < 1e-12);
    }
}
