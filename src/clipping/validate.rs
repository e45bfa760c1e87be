// src/clipping/validate.rs

use crate::geometry::path::PathSampler;
use crate::geometry::polygon::{Polygon, PolygonProperties};
use crate::types::Point2D;
use crate::utils::{simple_geometry, tolerances};
use std::fmt;

/// Grobe Abtast-Toleranz für die Mitgliedschafts-Prüfung
const COARSE_SAMPLE_TOLERANCE: f64 = 1.0;

/// Warum ein analytisches Schnittergebnis verworfen wurde
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// Das Ergebnis ist leer oder degeneriert
    EmptyResult,
    /// Die Bounding Box des Ergebnisses liegt nicht in der des Clip-Polygons
    BoundsOutside,
    /// Die Bounding-Box-Fläche des Ergebnisses übersteigt die des Clip-Polygons
    AreaExceeded,
    /// Zu wenige Ergebnispunkte liegen im Clip-Polygon oder nahe seines Randes
    MembershipTooLow { ratio: f64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyResult => write!(f, "result is empty or degenerate"),
            Self::BoundsOutside => write!(f, "result bounds exceed clip bounds"),
            Self::AreaExceeded => write!(f, "result bounding-box area exceeds clip area"),
            Self::MembershipTooLow { ratio } => {
                write!(f, "only {:.1}% of result vertices belong to the clip region", ratio * 100.0)
            }
        }
    }
}

/// Plausibilitätsprüfung eines analytischen Schnittergebnisses, bevor es
/// dem Aufrufer übergeben wird.
///
/// Die Mitgliedschafts-Schwelle ist bewusst tolerant: Kurvenabflachung und
/// die Winkel-Rekonstruktion des Intersectors können einzelne Abtastpunkte
/// knapp außerhalb des strengen Randes platzieren.
pub struct ResultValidator {
    membership_ratio: f64,
    boundary_slack: f64,
    sample_tolerance: f64,
}

impl Default for ResultValidator {
    fn default() -> Self {
        Self {
            membership_ratio: tolerances::MEMBERSHIP_RATIO,
            boundary_slack: tolerances::BOUNDARY_SLACK,
            sample_tolerance: COARSE_SAMPLE_TOLERANCE,
        }
    }
}

impl ResultValidator {
    /// Erstellt einen Validator mit Standard-Toleranzen
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt die geforderte Mitgliedschafts-Quote (0..1)
    pub fn with_membership_ratio(mut self, ratio: f64) -> Self {
        self.membership_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Setzt den zulässigen Abstand zum Clip-Rand (Weltkoordinaten)
    pub fn with_boundary_slack(mut self, slack: f64) -> Self {
        self.boundary_slack = slack.max(0.0);
        self
    }

    /// Prüft ein Ergebnis und liefert im Fehlerfall den Grund
    pub fn check(&self, result: &Polygon, clip: &Polygon) -> Result<(), RejectReason> {
        if result.effective_len() < 3 {
            return Err(RejectReason::EmptyResult);
        }

        let (Some(result_bounds), Some(clip_bounds)) = (result.bounds(), clip.bounds()) else {
            return Err(RejectReason::EmptyResult);
        };

        // Bounding-Box-Prüfungen: minimaler Slack gegen Gleitkommafehler
        // an berührenden Rändern
        if !clip_bounds
            .expand(self.boundary_slack)
            .contains_bounds(&result_bounds)
        {
            return Err(RejectReason::BoundsOutside);
        }

        if result_bounds.area() > clip_bounds.area() * (1.0 + tolerances::EPSILON) {
            return Err(RejectReason::AreaExceeded);
        }

        // Mitgliedschafts-Quote über eine grobe Neuabtastung des Ergebnisses
        let sampler = PathSampler::new().with_tolerance(self.sample_tolerance);
        let path = sampler.build(result.effective_vertices(), true);
        let samples = sampler.flatten(&path);

        if samples.is_empty() {
            return Err(RejectReason::EmptyResult);
        }

        let members = samples
            .iter()
            .filter(|&&p| clip.contains_point(p) || self.near_boundary(p, clip))
            .count();

        let ratio = members as f64 / samples.len() as f64;
        if ratio <= self.membership_ratio {
            return Err(RejectReason::MembershipTooLow { ratio });
        }

        Ok(())
    }

    /// Bool-Sicht auf [`ResultValidator::check`]
    pub fn is_valid(&self, result: &Polygon, clip: &Polygon) -> bool {
        self.check(result, clip).is_ok()
    }

    fn near_boundary(&self, point: Point2D, clip: &Polygon) -> bool {
        let vertices = clip.effective_vertices();
        let n = vertices.len();

        for i in 0..n {
            let j = (i + 1) % n;
            if simple_geometry::point_segment_distance(point, vertices[i], vertices[j])
                <= self.boundary_slack
            {
                return true;
            }
        }
        false
    }
}
