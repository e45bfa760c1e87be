// src/geometry/path/bezier.rs

use crate::types::Point2D;
use crate::utils::simple_geometry;

/// Bézier-Kurve Repräsentation (quadratisch oder kubisch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BezierCurve {
    Quadratic {
        p0: Point2D,
        p1: Point2D,
        p2: Point2D,
    },
    Cubic {
        p0: Point2D,
        p1: Point2D,
        p2: Point2D,
        p3: Point2D,
    },
}

impl BezierCurve {
    /// Erstellt eine quadratische Bézier-Kurve
    pub fn quadratic(p0: Point2D, p1: Point2D, p2: Point2D) -> Self {
        Self::Quadratic { p0, p1, p2 }
    }

    /// Erstellt eine kubische Bézier-Kurve
    pub fn cubic(p0: Point2D, p1: Point2D, p2: Point2D, p3: Point2D) -> Self {
        Self::Cubic { p0, p1, p2, p3 }
    }

    /// Startpunkt der Kurve
    pub fn start(&self) -> Point2D {
        match *self {
            Self::Quadratic { p0, .. } | Self::Cubic { p0, .. } => p0,
        }
    }

    /// Endpunkt der Kurve
    pub fn end(&self) -> Point2D {
        match *self {
            Self::Quadratic { p2, .. } => p2,
            Self::Cubic { p3, .. } => p3,
        }
    }

    /// Evaluiert die Kurve an Parameter t (0.0 bis 1.0)
    pub fn evaluate(&self, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;

        match *self {
            Self::Quadratic { p0, p1, p2 } => {
                p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
            }
            Self::Cubic { p0, p1, p2, p3 } => {
                let uu = u * u;
                let tt = t * t;
                p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
            }
        }
    }

    /// Unterteilt die Kurve an Parameter t per De Casteljau.
    pub fn split(&self, t: f64) -> (BezierCurve, BezierCurve) {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Self::Quadratic { p0, p1, p2 } => {
                let p01 = p0.lerp(p1, t);
                let p12 = p1.lerp(p2, t);
                let p012 = p01.lerp(p12, t);

                (
                    Self::Quadratic {
                        p0,
                        p1: p01,
                        p2: p012,
                    },
                    Self::Quadratic {
                        p0: p012,
                        p1: p12,
                        p2,
                    },
                )
            }
            Self::Cubic { p0, p1, p2, p3 } => {
                let p01 = p0.lerp(p1, t);
                let p12 = p1.lerp(p2, t);
                let p23 = p2.lerp(p3, t);
                let p012 = p01.lerp(p12, t);
                let p123 = p12.lerp(p23, t);
                let p0123 = p012.lerp(p123, t);

                (
                    Self::Cubic {
                        p0,
                        p1: p01,
                        p2: p012,
                        p3: p0123,
                    },
                    Self::Cubic {
                        p0: p0123,
                        p1: p123,
                        p2: p23,
                        p3,
                    },
                )
            }
        }
    }

    /// Maximaler Abstand der Kontrollpunkte zur Sehne.
    /// Liegt er unter der Flachheits-Toleranz, kann die Kurve durch ihre
    /// Sehne ersetzt werden.
    pub fn flatness(&self) -> f64 {
        match *self {
            Self::Quadratic { p0, p1, p2 } => simple_geometry::point_line_distance(p1, p0, p2),
            Self::Cubic { p0, p1, p2, p3 } => simple_geometry::point_line_distance(p1, p0, p3)
                .max(simple_geometry::point_line_distance(p2, p0, p3)),
        }
    }

    /// Berechnet die Länge der Kurve (Näherung durch Sampling)
    pub fn length(&self, samples: usize) -> f64 {
        if samples < 2 {
            return 0.0;
        }

        let mut length = 0.0;
        let mut prev_point = self.evaluate(0.0);

        for i in 1..=samples {
            let t = i as f64 / samples as f64;
            let current_point = self.evaluate(t);
            length += prev_point.distance(current_point);
            prev_point = current_point;
        }

        length
    }
}
