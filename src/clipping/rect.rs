// src/clipping/rect.rs

use crate::error::*;
use crate::geometry::polygon::Polygon;
use crate::types::{Bounds2D, Point2D};
use crate::utils::{comparison, tolerances};

/// Outcode-Bits der Cohen-Sutherland-Klassifikation
pub const OUTCODE_INSIDE: u8 = 0;
pub const OUTCODE_LEFT: u8 = 1;
pub const OUTCODE_RIGHT: u8 = 2;
pub const OUTCODE_BOTTOM: u8 = 4;
pub const OUTCODE_TOP: u8 = 8;

/// Die vier Halbebenen eines achsenparallelen Clip-Rechtecks
#[derive(Debug, Clone, Copy)]
enum RectSide {
    Left,
    Right,
    Bottom,
    Top,
}

/// Clipping gegen ein achsenparalleles Rechteck.
///
/// Bündelt die beiden rechteck-spezifischen Algorithmen: Cohen-Sutherland
/// für einzelne Segmente und Sutherland-Hodgman für Polygone. Für beliebige
/// Clip-Polygone ist keiner der beiden korrekt; dafür gibt es
/// [`super::polygon::PolygonIntersector`].
pub struct RectClipper {
    bounds: Bounds2D,
    tolerance: f64,
}

impl RectClipper {
    /// Erstellt einen Clipper für das gegebene Rechteck
    pub fn new(bounds: Bounds2D) -> Self {
        Self {
            bounds,
            tolerance: tolerances::POINT_EPSILON,
        }
    }

    /// Setzt die Toleranz der Inside-Tests
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Das Clip-Rechteck
    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    // === Cohen-Sutherland für einzelne Segmente ===

    /// Klassifiziert einen Punkt relativ zu den vier Halbebenen
    pub fn outcode(&self, point: Point2D) -> u8 {
        let mut code = OUTCODE_INSIDE;

        if point.x < self.bounds.min.x {
            code |= OUTCODE_LEFT;
        }
        if point.x > self.bounds.max.x {
            code |= OUTCODE_RIGHT;
        }
        if point.y < self.bounds.min.y {
            code |= OUTCODE_BOTTOM;
        }
        if point.y > self.bounds.max.y {
            code |= OUTCODE_TOP;
        }

        code
    }

    /// Clippt ein Liniensegment gegen das Rechteck (Cohen-Sutherland).
    ///
    /// Gibt `None` zurück wenn das Segment vollständig außerhalb liegt,
    /// sonst die (eventuell beschnittenen) Endpunkte. Die Nenner der
    /// Schnittberechnung werden geklemmt, damit achsenparallele Segmente
    /// kein NaN/Inf erzeugen.
    pub fn clip_segment(&self, mut p1: Point2D, mut p2: Point2D) -> Option<(Point2D, Point2D)> {
        let mut outcode1 = self.outcode(p1);
        let mut outcode2 = self.outcode(p2);

        loop {
            if (outcode1 | outcode2) == 0 {
                // Beide Punkte sind inside
                return Some((p1, p2));
            } else if (outcode1 & outcode2) != 0 {
                // Beide Punkte sind outside auf derselben Seite
                return None;
            } else {
                // Mindestens ein Punkt ist outside
                let outcode_out = if outcode1 != 0 { outcode1 } else { outcode2 };

                let (x, y) = if (outcode_out & OUTCODE_TOP) != 0 {
                    let x = p1.x
                        + (p2.x - p1.x) * (self.bounds.max.y - p1.y)
                            / comparison::guard_denominator(p2.y - p1.y);
                    (x, self.bounds.max.y)
                } else if (outcode_out & OUTCODE_BOTTOM) != 0 {
                    let x = p1.x
                        + (p2.x - p1.x) * (self.bounds.min.y - p1.y)
                            / comparison::guard_denominator(p2.y - p1.y);
                    (x, self.bounds.min.y)
                } else if (outcode_out & OUTCODE_RIGHT) != 0 {
                    let y = p1.y
                        + (p2.y - p1.y) * (self.bounds.max.x - p1.x)
                            / comparison::guard_denominator(p2.x - p1.x);
                    (self.bounds.max.x, y)
                } else {
                    let y = p1.y
                        + (p2.y - p1.y) * (self.bounds.min.x - p1.x)
                            / comparison::guard_denominator(p2.x - p1.x);
                    (self.bounds.min.x, y)
                };

                if outcode_out == outcode1 {
                    p1 = Point2D::new(x, y);
                    outcode1 = self.outcode(p1);
                } else {
                    p2 = Point2D::new(x, y);
                    outcode2 = self.outcode(p2);
                }
            }
        }
    }

    // === Sutherland-Hodgman für Polygone ===

    /// Clippt ein Polygon gegen das Rechteck (Sutherland-Hodgman).
    ///
    /// Die vier Halbebenen werden nacheinander abgearbeitet; die Ausgabe
    /// jedes Durchgangs ist die Eingabe des nächsten. Liefert ein Durchgang
    /// keine Punkte mehr, ist das Ergebnis leer (`None`).
    pub fn clip_polygon(&self, subject: &Polygon) -> ClipResult<Option<Polygon>> {
        let mut output_vertices = subject.effective_vertices().to_vec();

        for side in [
            RectSide::Left,
            RectSide::Right,
            RectSide::Bottom,
            RectSide::Top,
        ] {
            if output_vertices.is_empty() {
                break;
            }

            let input_vertices = std::mem::take(&mut output_vertices);
            let mut s = input_vertices[input_vertices.len() - 1];

            for &e in &input_vertices {
                if self.is_inside(side, e) {
                    if !self.is_inside(side, s) {
                        // Entering
                        output_vertices.push(self.intersect_side(side, s, e));
                    }
                    output_vertices.push(e);
                } else if self.is_inside(side, s) {
                    // Leaving
                    output_vertices.push(self.intersect_side(side, s, e));
                }
                s = e;
            }
        }

        if output_vertices.len() >= 3 {
            Ok(Some(Polygon::closed(output_vertices)?))
        } else {
            Ok(None)
        }
    }

    fn is_inside(&self, side: RectSide, point: Point2D) -> bool {
        match side {
            RectSide::Left => point.x >= self.bounds.min.x - self.tolerance,
            RectSide::Right => point.x <= self.bounds.max.x + self.tolerance,
            RectSide::Bottom => point.y >= self.bounds.min.y - self.tolerance,
            RectSide::Top => point.y <= self.bounds.max.y + self.tolerance,
        }
    }

    /// Schnittpunkt eines Segments mit der Halbebenen-Grenze.
    /// Der Nenner ist geklemmt; ein degeneriertes Segment liefert damit
    /// einen Punkt auf der Grenze statt NaN.
    fn intersect_side(&self, side: RectSide, s: Point2D, e: Point2D) -> Point2D {
        match side {
            RectSide::Left => {
                let t = (self.bounds.min.x - s.x) / comparison::guard_denominator(e.x - s.x);
                Point2D::new(self.bounds.min.x, s.y + (e.y - s.y) * t)
            }
            RectSide::Right => {
                let t = (self.bounds.max.x - s.x) / comparison::guard_denominator(e.x - s.x);
                Point2D::new(self.bounds.max.x, s.y + (e.y - s.y) * t)
            }
            RectSide::Bottom => {
                let t = (self.bounds.min.y - s.y) / comparison::guard_denominator(e.y - s.y);
                Point2D::new(s.x + (e.x - s.x) * t, self.bounds.min.y)
            }
            RectSide::Top => {
                let t = (self.bounds.max.y - s.y) / comparison::guard_denominator(e.y - s.y);
                Point2D::new(s.x + (e.x - s.x) * t, self.bounds.max.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon::PolygonProperties;
    use approx::assert_relative_eq;

    fn clipper() -> RectClipper {
        RectClipper::new(Bounds2D::from_points(
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
        ))
    }

    #[test]
    fn test_outcodes() {
        let clipper = clipper();
        assert_eq!(clipper.bounds().max, Point2D::new(10.0, 10.0));

        assert_eq!(clipper.outcode(Point2D::new(5.0, 5.0)), OUTCODE_INSIDE);
        assert_eq!(clipper.outcode(Point2D::new(-1.0, 5.0)), OUTCODE_LEFT);
        assert_eq!(clipper.outcode(Point2D::new(11.0, 5.0)), OUTCODE_RIGHT);
        assert_eq!(clipper.outcode(Point2D::new(5.0, -1.0)), OUTCODE_BOTTOM);
        assert_eq!(clipper.outcode(Point2D::new(5.0, 11.0)), OUTCODE_TOP);
        assert_eq!(
            clipper.outcode(Point2D::new(-1.0, 11.0)),
            OUTCODE_LEFT | OUTCODE_TOP
        );
    }

    #[test]
    fn test_segment_fully_inside_accepted_unchanged() {
        let clipper = clipper();
        let (p1, p2) = clipper
            .clip_segment(Point2D::new(1.0, 1.0), Point2D::new(9.0, 9.0))
            .unwrap();
        assert_eq!(p1, Point2D::new(1.0, 1.0));
        assert_eq!(p2, Point2D::new(9.0, 9.0));
    }

    #[test]
    fn test_segment_crossing_is_clamped() {
        let clipper = clipper();
        let (p1, p2) = clipper
            .clip_segment(Point2D::new(-5.0, 5.0), Point2D::new(15.0, 5.0))
            .unwrap();
        assert_relative_eq!(p1.x, 0.0);
        assert_relative_eq!(p2.x, 10.0);
        assert_relative_eq!(p1.y, 5.0);
        assert_relative_eq!(p2.y, 5.0);
    }

    #[test]
    fn test_segment_outside_rejected() {
        let clipper = clipper();
        assert!(clipper
            .clip_segment(Point2D::new(-5.0, -1.0), Point2D::new(15.0, -1.0))
            .is_none());
        assert!(clipper
            .clip_segment(Point2D::new(11.0, 0.0), Point2D::new(12.0, 10.0))
            .is_none());
    }

    #[test]
    fn test_axis_aligned_degenerate_segment_has_no_nan() {
        let clipper = clipper();
        // Vertikales Segment durch das Rechteck: Nenner der x-Berechnung wäre 0
        let (p1, p2) = clipper
            .clip_segment(Point2D::new(5.0, -5.0), Point2D::new(5.0, 15.0))
            .unwrap();
        assert!(p1.x.is_finite() && p1.y.is_finite());
        assert!(p2.x.is_finite() && p2.y.is_finite());
        assert_relative_eq!(p1.y, 0.0);
        assert_relative_eq!(p2.y, 10.0);
    }

    #[test]
    fn test_polygon_overlap_clipped_to_quarter() {
        let clipper = clipper();
        let square = Polygon::closed(vec![
            Point2D::new(5.0, 5.0),
            Point2D::new(15.0, 5.0),
            Point2D::new(15.0, 15.0),
            Point2D::new(5.0, 15.0),
        ])
        .unwrap();

        let clipped = clipper.clip_polygon(&square).unwrap().unwrap();
        assert_relative_eq!(clipped.area(), 25.0, epsilon = 1e-9);

        let bounds = clipped.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 5.0);
        assert_relative_eq!(bounds.min.y, 5.0);
        assert_relative_eq!(bounds.max.x, 10.0);
        assert_relative_eq!(bounds.max.y, 10.0);
    }

    #[test]
    fn test_polygon_disjoint_yields_empty() {
        let clipper = clipper();
        let square = Polygon::closed(vec![
            Point2D::new(20.0, 20.0),
            Point2D::new(30.0, 20.0),
            Point2D::new(30.0, 30.0),
            Point2D::new(20.0, 30.0),
        ])
        .unwrap();

        assert!(clipper.clip_polygon(&square).unwrap().is_none());
    }

    #[test]
    fn test_polygon_fully_inside_unchanged() {
        let clipper = clipper();
        let triangle = Polygon::closed(vec![
            Point2D::new(2.0, 2.0),
            Point2D::new(8.0, 2.0),
            Point2D::new(5.0, 8.0),
        ])
        .unwrap();

        let clipped = clipper.clip_polygon(&triangle).unwrap().unwrap();
        assert_relative_eq!(clipped.area(), triangle.area(), epsilon = 1e-9);
    }
}
