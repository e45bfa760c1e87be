// src/clipping/polygon.rs

use crate::error::*;
use crate::geometry::polygon::{Polygon, PolygonProperties};
use crate::types::Point2D;
use crate::utils::{simple_geometry, tolerances};

/// Ein berechneter Schnittpunkt samt der erzeugenden Kanten
/// (Indizes in die effektiven Vertex-Listen beider Polygone).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection {
    pub point: Point2D,
    pub subject_edge: usize,
    pub clip_edge: usize,
}

/// Schnitt zweier beliebiger (auch nicht-konvexer) Polygone.
///
/// Die Rekonstruktion des Schnittpolygons sortiert alle Kandidatenpunkte
/// nach Winkel um ihren Schwerpunkt, statt Entry/Exit-Punkte entlang der
/// Kanten zu verfolgen. Das ist nur für sternförmige Schnittregionen
/// korrekt; nicht-sternförmige Ergebnisse können sich selbst überschneiden.
/// Solche Fälle fängt der nachgeschaltete Validator ab, der Aufrufer fällt
/// dann auf die Rasterisierung zurück.
pub struct PolygonIntersector {
    point_epsilon: f64,
    parallel_epsilon: f64,
}

impl Default for PolygonIntersector {
    fn default() -> Self {
        Self {
            point_epsilon: tolerances::POINT_EPSILON,
            parallel_epsilon: tolerances::PARALLEL_EPSILON,
        }
    }
}

impl PolygonIntersector {
    /// Erstellt einen Intersector mit Standard-Toleranzen
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt die Punkt-Verschmelzungs-Toleranz (Weltkoordinaten)
    pub fn with_point_epsilon(mut self, epsilon: f64) -> Self {
        self.point_epsilon = epsilon;
        self
    }

    /// Setzt den Determinanten-Guard
    pub fn with_parallel_epsilon(mut self, epsilon: f64) -> Self {
        self.parallel_epsilon = epsilon;
        self
    }

    /// Berechnet den Schnitt zweier Polygone.
    ///
    /// `None` bedeutet leere Schnittmenge. Liegt ein Polygon vollständig im
    /// anderen, wird das innere unverändert zurückgegeben.
    pub fn intersect(&self, subject: &Polygon, clip: &Polygon) -> ClipResult<Option<Polygon>> {
        if subject.effective_len() < 3 || clip.effective_len() < 3 {
            return Ok(None);
        }

        let intersections = self.find_intersections(subject, clip);

        if intersections.is_empty() {
            // Keine Schnittpunkte: Enthaltensein oder disjunkt
            return Ok(self.resolve_containment(subject, clip));
        }

        // Kandidatenpunkte: Subject-Vertices im Clip-Polygon, Clip-Vertices
        // im Subject-Polygon und alle Schnittpunkte
        let mut candidates: Vec<Point2D> = Vec::new();

        for &vertex in subject.effective_vertices() {
            if clip.contains_point(vertex) {
                candidates.push(vertex);
            }
        }
        for &vertex in clip.effective_vertices() {
            if subject.contains_point(vertex) {
                candidates.push(vertex);
            }
        }
        candidates.extend(intersections.iter().map(|i| i.point));

        self.assemble(candidates)
    }

    /// Zählt alle Kanten-Schnittpunkte beider Polygone auf.
    ///
    /// Ein Schnittpunkt zählt nur, wenn beide Parameter in [0, 1] liegen
    /// **und** der explizite On-Segment-Test besteht; der fängt Punkte ab,
    /// die Gleitkommafehler sonst knapp außerhalb der Segmente zulassen
    /// würden. Nahe beieinander liegende Schnittpunkte werden dedupliziert.
    pub fn find_intersections(&self, subject: &Polygon, clip: &Polygon) -> Vec<EdgeIntersection> {
        let subject_vertices = subject.effective_vertices();
        let clip_vertices = clip.effective_vertices();

        let mut intersections: Vec<EdgeIntersection> = Vec::new();

        for i in 0..subject_vertices.len() {
            let j = (i + 1) % subject_vertices.len();
            let subject_edge = (subject_vertices[i], subject_vertices[j]);

            for k in 0..clip_vertices.len() {
                let l = (k + 1) % clip_vertices.len();
                let clip_edge = (clip_vertices[k], clip_vertices[l]);

                if let Some(point) =
                    self.segment_intersection(subject_edge.0, subject_edge.1, clip_edge.0, clip_edge.1)
                {
                    let duplicate = intersections
                        .iter()
                        .any(|existing| existing.point.distance(point) < self.point_epsilon);
                    if !duplicate {
                        intersections.push(EdgeIntersection {
                            point,
                            subject_edge: i,
                            clip_edge: k,
                        });
                    }
                }
            }
        }

        intersections
    }

    /// Parametrische Schnittberechnung zweier Segmente (Determinantenform)
    fn segment_intersection(
        &self,
        p1: Point2D,
        p2: Point2D,
        p3: Point2D,
        p4: Point2D,
    ) -> Option<Point2D> {
        let d1 = p2 - p1;
        let d2 = p4 - p3;

        let denominator = simple_geometry::cross_product_2d(d1, d2);

        if denominator.abs() < self.parallel_epsilon {
            return None; // Parallele Linien
        }

        let t = ((p3.x - p1.x) * d2.y - (p3.y - p1.y) * d2.x) / denominator;
        let u = ((p3.x - p1.x) * d1.y - (p3.y - p1.y) * d1.x) / denominator;

        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        let point = p1 + d1 * t;

        // Expliziter On-Segment-Test zusätzlich zur Parameterschranke
        let on_both = simple_geometry::point_on_line_segment(point, p1, p2, self.point_epsilon)
            && simple_geometry::point_on_line_segment(point, p3, p4, self.point_epsilon);

        on_both.then_some(point)
    }

    /// Auflösung des schnittpunktfreien Falls über Enthaltensein-Tests
    fn resolve_containment(&self, subject: &Polygon, clip: &Polygon) -> Option<Polygon> {
        if subject
            .effective_vertices()
            .iter()
            .all(|&v| clip.contains_point(v))
        {
            return Some(subject.clone());
        }

        if clip
            .effective_vertices()
            .iter()
            .all(|&v| subject.contains_point(v))
        {
            return Some(clip.clone());
        }

        None // Disjunkt
    }

    /// Winkel-Rekonstruktion: sortiert die Kandidaten um ihren Schwerpunkt,
    /// entfernt nahe beieinander liegende Nachbarn und schließt die Schleife.
    fn assemble(&self, mut candidates: Vec<Point2D>) -> ClipResult<Option<Polygon>> {
        if candidates.len() < 3 {
            return Ok(None);
        }

        let centroid = candidates.iter().fold(Point2D::ZERO, |acc, p| acc + *p)
            / candidates.len() as f64;

        candidates.sort_by(|a, b| {
            let angle_a = (a.y - centroid.y).atan2(a.x - centroid.x);
            let angle_b = (b.y - centroid.y).atan2(b.x - centroid.x);
            angle_a
                .partial_cmp(&angle_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Aufeinanderfolgende Fast-Duplikate entfernen (zyklisch)
        let mut vertices: Vec<Point2D> = Vec::with_capacity(candidates.len());
        for point in candidates {
            match vertices.last() {
                Some(last) if last.distance(point) < self.point_epsilon => {}
                _ => vertices.push(point),
            }
        }
        while vertices.len() > 1 {
            let first = vertices[0];
            let last = vertices[vertices.len() - 1];
            if first.distance(last) < self.point_epsilon {
                vertices.pop();
            } else {
                break;
            }
        }

        if vertices.len() < 3 {
            return Ok(None);
        }

        Ok(Some(Polygon::closed(vertices)?))
    }
}
