// src/clipping/engine.rs

use serde::{Deserialize, Serialize};

use crate::clipping::observer::{ClipEvent, ClipObserver, NullObserver};
use crate::clipping::polygon::PolygonIntersector;
use crate::clipping::raster::RasterClipper;
use crate::clipping::rect::RectClipper;
use crate::clipping::validate::{RejectReason, ResultValidator};
use crate::error::*;
use crate::geometry::path::{Path, PathSampler};
use crate::geometry::polygon::{Polygon, PolygonProperties};
use crate::types::{Bounds2D, Point2D};
use crate::utils::tolerances;

/// Konfiguration der Clip-Engine.
///
/// Alle Toleranzen sind in [`crate::utils::tolerances`] dokumentiert;
/// hier stehen die überschreibbaren Werte für einen Engine-Durchlauf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Flachheit beim Abflachen von Kurvensegmenten (Weltkoordinaten)
    pub flatten_tolerance: f64,
    /// Punkt-Verschmelzungs-Toleranz (Weltkoordinaten)
    pub point_epsilon: f64,
    /// Determinanten-Guard der Schnittberechnung
    pub parallel_epsilon: f64,
    /// Geforderte Mitgliedschafts-Quote des Validators (0..1)
    pub membership_ratio: f64,
    /// Zulässiger Abstand zum Clip-Rand (Weltkoordinaten)
    pub boundary_slack: f64,
    /// Arbeitsauflösung des Raster-Fallbacks (Pixel, quadratisch)
    pub raster_resolution: usize,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            flatten_tolerance: tolerances::FLATTEN_TOLERANCE,
            point_epsilon: tolerances::POINT_EPSILON,
            parallel_epsilon: tolerances::PARALLEL_EPSILON,
            membership_ratio: tolerances::MEMBERSHIP_RATIO,
            boundary_slack: tolerances::BOUNDARY_SLACK,
            raster_resolution: tolerances::RASTER_RESOLUTION,
        }
    }
}

impl ClipConfig {
    /// Prüft die Konfiguration auf Plausibilität
    pub fn validate(&self) -> ClipResult<()> {
        if self.flatten_tolerance <= 0.0 || self.point_epsilon <= 0.0 || self.parallel_epsilon <= 0.0
        {
            return Err(ClipError::InvalidConfiguration {
                message: "tolerances must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.membership_ratio) {
            return Err(ClipError::InvalidConfiguration {
                message: format!("membership ratio {} out of [0, 1]", self.membership_ratio),
            });
        }
        if self.raster_resolution < 16 {
            return Err(ClipError::InvalidConfiguration {
                message: format!("raster resolution {} too small", self.raster_resolution),
            });
        }
        Ok(())
    }
}

/// Zusammenfassung eines Clip-Durchlaufs
#[derive(Debug, Clone, PartialEq)]
pub struct ClipStats {
    pub subject_vertex_count: usize,
    pub clip_vertex_count: usize,
    pub result_vertex_count: usize,
    pub subject_area: f64,
    pub clip_area: f64,
    pub result_area: f64,
    pub used_fallback: bool,
}

/// Fassade über die Clip-Pipeline.
///
/// Ablauf von [`ClipEngine::clip_path`] (linear, ohne Rücksprünge):
/// Leerprüfung → Abflachung → analytischer Schnitt → Validierung →
/// bei Ablehnung Raster-Fallback. Die Operation schlägt nie fehl; ein
/// leerer Pfad bedeutet "kein geometrischer Schnitt" und darf vom
/// Aufrufer nicht als Fehler gewertet werden.
///
/// Die Engine hält keinerlei Zustand zwischen Aufrufen und ist damit
/// gefahrlos aus mehreren Threads benutzbar.
pub struct ClipEngine {
    config: ClipConfig,
    observer: Box<dyn ClipObserver>,
}

impl Default for ClipEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipEngine {
    /// Engine mit Standard-Konfiguration, ohne Beobachter
    pub fn new() -> Self {
        Self {
            config: ClipConfig::default(),
            observer: Box::new(NullObserver),
        }
    }

    /// Setzt die Konfiguration
    pub fn with_config(mut self, config: ClipConfig) -> Self {
        self.config = config;
        self
    }

    /// Injiziert einen Beobachter für Diagnose-Ereignisse
    pub fn with_observer(mut self, observer: Box<dyn ClipObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Aktuelle Konfiguration
    pub fn config(&self) -> &ClipConfig {
        &self.config
    }

    fn sampler(&self) -> PathSampler {
        PathSampler::new().with_tolerance(self.config.flatten_tolerance)
    }

    // === Pfad-Operationen (Durchreichungen mit Engine-Konfiguration) ===

    /// Flacht einen Pfad zur Punktliste ab (leer rein, leer raus)
    pub fn flatten(&self, path: &Path) -> Vec<Point2D> {
        self.sampler().flatten(path)
    }

    /// Baut eine Punktliste zurück zu einem (bei `closed` geschlossenen) Pfad
    pub fn build(&self, points: &[Point2D], closed: bool) -> Path {
        self.sampler().build(points, closed)
    }

    /// Prüft ob ein Pfad ein achsenparalleles Rechteck beschreibt
    pub fn is_rectangular(&self, path: &Path, tolerance: f64) -> bool {
        self.sampler().is_rectangular(path, tolerance)
    }

    // === Rechteck-Clipping ===

    /// Clippt ein Liniensegment gegen ein Rechteck (Cohen-Sutherland)
    pub fn clip_segment(
        &self,
        p1: Point2D,
        p2: Point2D,
        rect: Bounds2D,
    ) -> Option<(Point2D, Point2D)> {
        RectClipper::new(rect)
            .with_tolerance(self.config.point_epsilon)
            .clip_segment(p1, p2)
    }

    /// Clippt ein Polygon gegen ein Rechteck (Sutherland-Hodgman)
    pub fn clip_to_rect(&self, polygon: &Polygon, rect: Bounds2D) -> ClipResult<Option<Polygon>> {
        RectClipper::new(rect)
            .with_tolerance(self.config.point_epsilon)
            .clip_polygon(polygon)
    }

    // === Haupteinstieg ===

    /// Schneidet einen Umriss mit einer Clip-Region.
    ///
    /// Gibt den Schnitt als geschlossenen Pfad zurück; leer bedeutet
    /// "kein Schnitt". Schlägt nie fehl.
    pub fn clip_path(&self, subject: &Path, clip: &Path) -> Path {
        if subject.is_empty() || clip.is_empty() {
            self.observer.notify(&ClipEvent::DegenerateInput);
            return Path::new();
        }

        let sampler = self.sampler();
        let subject_points = sampler.flatten(subject);
        let clip_points = sampler.flatten(clip);

        let (Ok(subject_poly), Ok(clip_poly)) =
            (Polygon::closed(subject_points), Polygon::closed(clip_points))
        else {
            self.observer.notify(&ClipEvent::DegenerateInput);
            return Path::new();
        };

        let intersector = PolygonIntersector::new()
            .with_point_epsilon(self.config.point_epsilon)
            .with_parallel_epsilon(self.config.parallel_epsilon);
        let validator = ResultValidator::new()
            .with_membership_ratio(self.config.membership_ratio)
            .with_boundary_slack(self.config.boundary_slack);

        // Analytischer Versuch
        let analytic = intersector
            .intersect(&subject_poly, &clip_poly)
            .ok()
            .flatten();

        match analytic {
            Some(result) => match validator.check(&result, &clip_poly) {
                Ok(()) => {
                    self.observer.notify(&ClipEvent::AnalyticAccepted);
                    return self.finish(&subject_poly, &clip_poly, Some(&result), false, &sampler);
                }
                Err(reason) => {
                    self.observer.notify(&ClipEvent::AnalyticRejected { reason });
                }
            },
            None => {
                self.observer.notify(&ClipEvent::AnalyticRejected {
                    reason: RejectReason::EmptyResult,
                });
            }
        }

        // Raster-Fallback
        let raster = RasterClipper::new().with_resolution(self.config.raster_resolution);
        match raster.clip(&subject_poly, &clip_poly) {
            Some(result) => {
                self.observer.notify(&ClipEvent::FallbackProduced {
                    vertex_count: result.effective_len(),
                });
                self.finish(&subject_poly, &clip_poly, Some(&result), true, &sampler)
            }
            None => {
                self.observer.notify(&ClipEvent::FallbackEmpty);
                self.finish(&subject_poly, &clip_poly, None, true, &sampler)
            }
        }
    }

    fn finish(
        &self,
        subject: &Polygon,
        clip: &Polygon,
        result: Option<&Polygon>,
        used_fallback: bool,
        sampler: &PathSampler,
    ) -> Path {
        let stats = ClipAnalysis::statistics(subject, clip, result, used_fallback);
        self.observer.notify(&ClipEvent::Finished { stats: &stats });

        match result {
            Some(polygon) => sampler.build(polygon.effective_vertices(), true),
            None => Path::new(),
        }
    }
}

/// Diagnose rund um Clip-Durchläufe
pub struct ClipAnalysis;

impl ClipAnalysis {
    /// Sammelt plausible Gründe für ein leeres Clip-Ergebnis
    pub fn analyze_failure(subject: &Polygon, clip: &Polygon) -> String {
        let mut issues = Vec::new();

        if subject.effective_len() < 3 {
            issues.push("subject polygon has fewer than 3 vertices".to_string());
        }
        if clip.effective_len() < 3 {
            issues.push("clip polygon has fewer than 3 vertices".to_string());
        }

        if subject.area() < tolerances::EPSILON {
            issues.push("subject polygon has zero area".to_string());
        }
        if clip.area() < tolerances::EPSILON {
            issues.push("clip polygon has zero area".to_string());
        }

        if let (Some(subject_bounds), Some(clip_bounds)) = (subject.bounds(), clip.bounds()) {
            if !subject_bounds.intersects(&clip_bounds) {
                issues.push("polygons do not overlap (bounding boxes don't intersect)".to_string());
            }
        }

        if issues.is_empty() {
            "no obvious issues detected".to_string()
        } else {
            issues.join("; ")
        }
    }

    /// Berechnet die Zusammenfassung eines Durchlaufs
    pub fn statistics(
        subject: &Polygon,
        clip: &Polygon,
        result: Option<&Polygon>,
        used_fallback: bool,
    ) -> ClipStats {
        ClipStats {
            subject_vertex_count: subject.effective_len(),
            clip_vertex_count: clip.effective_len(),
            result_vertex_count: result.map_or(0, Polygon::effective_len),
            subject_area: subject.area(),
            clip_area: clip.area(),
            result_area: result.map_or(0.0, PolygonProperties::area),
            used_fallback,
        }
    }
}
