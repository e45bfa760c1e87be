// src/geometry/path/sampler.rs

use crate::geometry::path::bezier::BezierCurve;
use crate::geometry::path::core::{Path, PathElement};
use crate::geometry::polygon::{Polygon, PolygonProperties};
use crate::types::Point2D;
use crate::utils::tolerances;

/// Pfade mit höchstens so vielen Elementen gelten als "einfach" und werden
/// mit fester Schrittzahl extrahiert statt toleranzgesteuert unterteilt.
const SIMPLE_PATH_ELEMENTS: usize = 4;

/// Feste Schrittzahl pro Kurve bei der Einfach-Extraktion.
const FILL_CURVE_STEPS: usize = 16;

/// Ab dieser Punktzahl greift die Dichte-Reduktion.
const DENSITY_REDUCTION_THRESHOLD: usize = 100;

/// Schrittzahl-Grenzen beim Abflachen für den Zeichenpfad.
const MIN_CURVE_STEPS: usize = 20;
const MAX_CURVE_STEPS: usize = 500;

/// Rekursionstiefe der De-Casteljau-Unterteilung.
const MAX_SUBDIVISION_DEPTH: usize = 16;

/// Flacht Pfade zu Punktlisten ab und baut Punktlisten zurück zu Pfaden.
///
/// Mehrere Subpfade werden nicht zusammengeführt: abgetastet wird nur die
/// erste (äußere) Schleife, ein zweites `MoveTo` beendet die Abtastung.
#[derive(Debug, Clone)]
pub struct PathSampler {
    tolerance: f64,
}

impl Default for PathSampler {
    fn default() -> Self {
        Self {
            tolerance: tolerances::FLATTEN_TOLERANCE,
        }
    }
}

impl PathSampler {
    /// Erstellt einen Sampler mit Standard-Flachheit
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt die Flachheits-Toleranz (Weltkoordinaten)
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(tolerances::EPSILON);
        self
    }

    /// Aktuelle Flachheits-Toleranz
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Flacht einen Pfad zu einer geordneten Punktliste ab.
    ///
    /// Gerade Segmente werden unverändert übernommen, Kurvensegmente per
    /// De Casteljau rekursiv unterteilt, bis die Kontrollpunkte weniger als
    /// die Toleranz von der Sehne abweichen. Einfache Pfade (≤ 4 Elemente)
    /// nehmen die Einfach-Extraktion mit fester Schrittzahl.
    /// Leerer Pfad ergibt eine leere Liste.
    pub fn flatten(&self, path: &Path) -> Vec<Point2D> {
        if path.is_empty() {
            return Vec::new();
        }

        let points = if path.len() <= SIMPLE_PATH_ELEMENTS {
            self.sample_elements(path, CurveSampling::FixedSteps(FILL_CURVE_STEPS))
        } else {
            self.sample_elements(path, CurveSampling::Recursive)
        };

        self.reduce_density(points)
    }

    /// Abflachung für den Zeichenpfad: Schrittzahl pro Kurve proportional
    /// zur Bogenlänge, geklemmt auf [20, 500]. Kurze Kurven werden so nicht
    /// überabgetastet, lange nicht sichtbar polygonal.
    pub fn flatten_curves(&self, path: &Path) -> Vec<Point2D> {
        if path.is_empty() {
            return Vec::new();
        }

        let points = self.sample_elements(path, CurveSampling::ArcLength);
        self.reduce_density(points)
    }

    /// Baut eine Punktliste zurück zu einem Pfad.
    ///
    /// Bei `closed` wird der Subpfad explizit geschlossen; ein bereits
    /// dupliziertes Schlusssegment wird dabei nicht doppelt erzeugt.
    pub fn build(&self, points: &[Point2D], closed: bool) -> Path {
        let Some((&first, rest)) = points.split_first() else {
            return Path::new();
        };

        let mut path = Path::new().move_to(first);
        for (i, &point) in rest.iter().enumerate() {
            let is_last = i == rest.len() - 1;
            if closed && is_last && point.distance(first) < tolerances::POINT_EPSILON {
                continue; // Duplizierter Endpunkt, Close übernimmt das
            }
            path = path.line_to(point);
        }

        if closed { path.close() } else { path }
    }

    /// Prüft ob ein Pfad ein achsenparalleles Rechteck beschreibt:
    /// wahr, wenn die Fläche des abgeflachten Umrisses der Fläche seiner
    /// Bounding Box entspricht (relative Toleranz).
    pub fn is_rectangular(&self, path: &Path, tolerance: f64) -> bool {
        let points = self.flatten(path);
        match Polygon::closed(points) {
            Ok(polygon) => polygon.is_rectangular(tolerance),
            Err(_) => false,
        }
    }

    // === Interne Abtastung ===

    fn sample_elements(&self, path: &Path, sampling: CurveSampling) -> Vec<Point2D> {
        let mut points: Vec<Point2D> = Vec::new();
        let mut subpath_start: Option<Point2D> = None;

        for element in path.elements() {
            let current = points.last().copied();

            match *element {
                PathElement::MoveTo(to) => {
                    if !points.is_empty() {
                        break; // Nur die erste Schleife wird abgetastet
                    }
                    subpath_start = Some(to);
                    points.push(to);
                }
                PathElement::LineTo(to) => {
                    if points.is_empty() {
                        subpath_start = Some(to);
                    }
                    points.push(to);
                }
                PathElement::QuadTo { control, to } => {
                    let start = current.unwrap_or(control);
                    if points.is_empty() {
                        subpath_start = Some(start);
                        points.push(start);
                    }
                    let curve = BezierCurve::quadratic(start, control, to);
                    self.sample_curve(&curve, sampling, &mut points);
                }
                PathElement::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    let start = current.unwrap_or(control1);
                    if points.is_empty() {
                        subpath_start = Some(start);
                        points.push(start);
                    }
                    let curve = BezierCurve::cubic(start, control1, control2, to);
                    self.sample_curve(&curve, sampling, &mut points);
                }
                PathElement::Close => {
                    if let Some(start) = subpath_start {
                        if current.is_some_and(|p| p.distance(start) >= tolerances::POINT_EPSILON) {
                            points.push(start);
                        }
                    }
                    break; // Subpfad beendet
                }
            }
        }

        points
    }

    fn sample_curve(&self, curve: &BezierCurve, sampling: CurveSampling, out: &mut Vec<Point2D>) {
        match sampling {
            CurveSampling::Recursive => {
                self.subdivide_curve(curve, MAX_SUBDIVISION_DEPTH, out);
            }
            CurveSampling::FixedSteps(steps) => {
                for i in 1..=steps {
                    out.push(curve.evaluate(i as f64 / steps as f64));
                }
            }
            CurveSampling::ArcLength => {
                let length = curve.length(FILL_CURVE_STEPS);
                let steps = ((length / self.tolerance).ceil() as usize)
                    .clamp(MIN_CURVE_STEPS, MAX_CURVE_STEPS);
                for i in 1..=steps {
                    out.push(curve.evaluate(i as f64 / steps as f64));
                }
            }
        }
    }

    fn subdivide_curve(&self, curve: &BezierCurve, depth: usize, out: &mut Vec<Point2D>) {
        if depth == 0 || curve.flatness() <= self.tolerance {
            out.push(curve.end());
            return;
        }

        let (left, right) = curve.split(0.5);
        self.subdivide_curve(&left, depth - 1, out);
        self.subdivide_curve(&right, depth - 1, out);
    }

    /// Begrenzung der Ausgabegröße: oberhalb der Schwelle werden Punkte
    /// entfernt, deren quadratischer Abstand zum letzten behaltenen Punkt
    /// unter `tolerance² · 10` liegt. Topologie bleibt erhalten.
    fn reduce_density(&self, points: Vec<Point2D>) -> Vec<Point2D> {
        if points.len() <= DENSITY_REDUCTION_THRESHOLD {
            return points;
        }

        let min_distance_sq = self.tolerance * self.tolerance * 10.0;
        let mut reduced: Vec<Point2D> = Vec::with_capacity(points.len());

        for point in points {
            match reduced.last() {
                Some(last) if point.distance_squared(*last) < min_distance_sq => {}
                _ => reduced.push(point),
            }
        }

        reduced
    }
}

/// Abtastmodus für Kurvensegmente
#[derive(Debug, Clone, Copy)]
enum CurveSampling {
    /// Rekursive Unterteilung bis zur Flachheits-Toleranz
    Recursive,
    /// Feste Schrittzahl pro Kurve
    FixedSteps(usize),
    /// Schrittzahl proportional zur Bogenlänge, geklemmt
    ArcLength,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bounds2D;
    use crate::utils::simple_geometry;

    fn curved_path() -> Path {
        // Geschlossener Pfad mit zwei Kurven und zwei Geraden
        Path::new()
            .move_to(Point2D::new(0.0, 0.0))
            .line_to(Point2D::new(10.0, 0.0))
            .cubic_to(
                Point2D::new(14.0, 2.0),
                Point2D::new(14.0, 8.0),
                Point2D::new(10.0, 10.0),
            )
            .line_to(Point2D::new(0.0, 10.0))
            .quad_to(Point2D::new(-4.0, 5.0), Point2D::new(0.0, 0.0))
            .close()
    }

    #[test]
    fn test_empty_path_yields_empty_polygon() {
        let sampler = PathSampler::new();
        assert!(sampler.flatten(&Path::new()).is_empty());
        assert!(sampler.flatten_curves(&Path::new()).is_empty());
    }

    #[test]
    fn test_straight_edges_copied_as_is() {
        let sampler = PathSampler::new();
        let path = Path::new()
            .move_to(Point2D::new(0.0, 0.0))
            .line_to(Point2D::new(5.0, 0.0))
            .line_to(Point2D::new(5.0, 5.0))
            .line_to(Point2D::new(0.0, 5.0))
            .close();

        let points = sampler.flatten(&path);
        // Vier Ecken plus dupliziertem Schlusspunkt
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Point2D::new(0.0, 0.0));
        assert_eq!(points[2], Point2D::new(5.0, 5.0));
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn test_curves_flattened_within_tolerance() {
        let sampler = PathSampler::new().with_tolerance(0.05);
        let points = sampler.flatten(&curved_path());
        assert!(points.len() > 8);

        // Jeder dicht abgetastete Kurvenpunkt muss nahe am Polygonzug liegen
        let curve = BezierCurve::cubic(
            Point2D::new(10.0, 0.0),
            Point2D::new(14.0, 2.0),
            Point2D::new(14.0, 8.0),
            Point2D::new(10.0, 10.0),
        );
        for i in 0..=50 {
            let sample = curve.evaluate(i as f64 / 50.0);
            let min_dist = points
                .windows(2)
                .map(|w| simple_geometry::point_segment_distance(sample, w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            assert!(
                min_dist < 0.5,
                "Kurvenpunkt {:?} liegt {} vom Polygonzug entfernt",
                sample,
                min_dist
            );
        }
    }

    #[test]
    fn test_simple_path_uses_fixed_extraction() {
        let sampler = PathSampler::new();
        // 3 Elemente: einfacher Pfad, Kurve mit fester Schrittzahl
        let path = Path::new()
            .move_to(Point2D::new(0.0, 0.0))
            .cubic_to(
                Point2D::new(0.0, 10.0),
                Point2D::new(10.0, 10.0),
                Point2D::new(10.0, 0.0),
            )
            .close();

        let points = sampler.flatten(&path);
        // MoveTo-Punkt + 16 Kurvenschritte + Schlusspunkt entfällt (Close dupliziert nicht)
        assert_eq!(points.len(), 1 + 16 + 1);
    }

    #[test]
    fn test_second_subpath_is_ignored() {
        let sampler = PathSampler::new();
        let path = Path::new()
            .move_to(Point2D::new(0.0, 0.0))
            .line_to(Point2D::new(5.0, 0.0))
            .line_to(Point2D::new(5.0, 5.0))
            .move_to(Point2D::new(100.0, 100.0))
            .line_to(Point2D::new(105.0, 100.0))
            .line_to(Point2D::new(105.0, 105.0))
            .close();

        let points = sampler.flatten(&path);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.x <= 5.0 && p.y <= 5.0));
    }

    #[test]
    fn test_density_reduction_bounds_output() {
        let sampler = PathSampler::new().with_tolerance(0.5);
        // Sehr dichter Kreis-Polygonzug: 1000 Punkte auf Radius 10
        let mut path = Path::new().move_to(Point2D::new(10.0, 0.0));
        for i in 1..1000 {
            let angle = std::f64::consts::TAU * i as f64 / 1000.0;
            path = path.line_to(Point2D::new(10.0 * angle.cos(), 10.0 * angle.sin()));
        }
        let path = path.close();

        let points = sampler.flatten(&path);
        assert!(points.len() < 1000);
        // Abstand benachbarter behaltener Punkte respektiert die Schwelle
        let min_distance_sq = 0.5 * 0.5 * 10.0;
        for w in points.windows(2) {
            assert!(w[0].distance_squared(w[1]) >= min_distance_sq);
        }
    }

    #[test]
    fn test_build_closes_loop() {
        let sampler = PathSampler::new();
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
        ];

        let path = sampler.build(&points, true);
        assert!(matches!(path.elements().last(), Some(PathElement::Close)));

        let open = sampler.build(&points, false);
        assert!(!matches!(open.elements().last(), Some(PathElement::Close)));

        assert!(sampler.build(&[], true).is_empty());
    }

    #[test]
    fn test_flatten_build_round_trip() {
        let sampler = PathSampler::new().with_tolerance(0.05);
        let original = curved_path();

        let points = sampler.flatten(&original);
        let rebuilt = sampler.build(&points, true);
        let rebuilt_points = sampler.flatten(&rebuilt);

        // Der wieder aufgebaute Umriss bleibt nahe am ersten Abtastergebnis
        for point in &rebuilt_points {
            let min_dist = points
                .windows(2)
                .map(|w| simple_geometry::point_segment_distance(*point, w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            assert!(min_dist < 0.05 * 10.0);
        }
    }

    #[test]
    fn test_flatten_curves_step_clamping() {
        let sampler = PathSampler::new().with_tolerance(0.25);

        // Winzige Kurve: Minimum von 20 Schritten greift
        let tiny = Path::new()
            .move_to(Point2D::new(0.0, 0.0))
            .quad_to(Point2D::new(0.01, 0.02), Point2D::new(0.02, 0.0))
            .line_to(Point2D::new(0.01, -0.01))
            .line_to(Point2D::new(0.0, -0.01))
            .line_to(Point2D::new(-0.01, -0.01))
            .close();
        let points = sampler.flatten_curves(&tiny);
        assert!(points.len() >= MIN_CURVE_STEPS);

        // Riesige Kurve: Maximum von 500 Schritten deckelt
        let huge = Path::new()
            .move_to(Point2D::new(0.0, 0.0))
            .cubic_to(
                Point2D::new(0.0, 4000.0),
                Point2D::new(4000.0, 4000.0),
                Point2D::new(4000.0, 0.0),
            )
            .line_to(Point2D::new(2000.0, -100.0))
            .line_to(Point2D::new(1000.0, -100.0))
            .line_to(Point2D::new(500.0, -50.0))
            .close();
        let points = sampler.flatten_curves(&huge);
        assert!(points.len() <= MAX_CURVE_STEPS + 8);
    }

    #[test]
    fn test_is_rectangular() {
        let sampler = PathSampler::new();
        let rect = Path::rect(Bounds2D::from_points(
            Point2D::new(0.0, 0.0),
            Point2D::new(8.0, 4.0),
        ));
        assert!(sampler.is_rectangular(&rect, 1e-6));

        let triangle = Path::new()
            .move_to(Point2D::new(0.0, 0.0))
            .line_to(Point2D::new(4.0, 0.0))
            .line_to(Point2D::new(2.0, 3.0))
            .close();
        assert!(!sampler.is_rectangular(&triangle, 1e-6));

        assert!(!sampler.is_rectangular(&Path::new(), 1e-6));
    }
}
