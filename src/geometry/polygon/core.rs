// src/geometry/polygon/core.rs

use crate::error::*;
use crate::types::*;
use std::fmt;

/// Geschlossener oder offener Linienzug aus 2D-Punkten.
///
/// Bei geschlossenen Polygonen ist der erste Punkt am Ende dupliziert;
/// alle Eigenschafts-Berechnungen berücksichtigen das über
/// [`Polygon::effective_len`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    is_closed: bool,
}

impl Polygon {
    /// Erstellt ein neues Polygon aus Vertices
    pub fn new(vertices: Vec<Point2D>) -> ClipResult<Self> {
        Self::from_vertices(vertices, false)
    }

    /// Erstellt ein geschlossenes Polygon
    pub fn closed(vertices: Vec<Point2D>) -> ClipResult<Self> {
        Self::from_vertices(vertices, true)
    }

    /// Erstellt Polygon mit Validierung
    fn from_vertices(mut vertices: Vec<Point2D>, force_closed: bool) -> ClipResult<Self> {
        if vertices.len() < 3 {
            return Err(ClipError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }

        // Automatisch schließen wenn erwünscht und nicht bereits geschlossen
        let is_closed = if force_closed {
            if vertices.first() != vertices.last() {
                vertices.push(vertices[0]);
            }
            true
        } else {
            vertices.first() == vertices.last()
        };

        Ok(Self {
            vertices,
            is_closed,
        })
    }

    /// Zugriff auf Vertices (inklusive eventuell dupliziertem Endpunkt)
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Anzahl der Vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Ist das Polygon leer?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Ist das Polygon geschlossen?
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Anzahl der eindeutigen Vertices (ohne duplizierten Endpunkt)
    pub fn effective_len(&self) -> usize {
        let n = self.vertices.len();
        if self.is_closed && n > 0 && self.vertices.first() == self.vertices.last() {
            n - 1
        } else {
            n
        }
    }

    /// Eindeutige Vertices ohne den duplizierten Endpunkt
    pub fn effective_vertices(&self) -> &[Point2D] {
        &self.vertices[..self.effective_len()]
    }

    /// Polygon schließen
    pub fn close(&mut self) {
        if !self.is_closed && !self.vertices.is_empty() {
            if self.vertices.first() != self.vertices.last() {
                self.vertices.push(self.vertices[0]);
            }
            self.is_closed = true;
        }
    }

    /// Bounding Box berechnen
    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.vertices.iter().copied())
    }

    /// Arithmetisches Mittel der Vertices (nicht der geometrische Schwerpunkt)
    pub fn centroid(&self) -> Option<Point2D> {
        let vertices = self.effective_vertices();
        if vertices.is_empty() {
            return None;
        }

        let sum = vertices.iter().fold(Point2D::ZERO, |acc, v| acc + *v);
        Some(sum / vertices.len() as f64)
    }
}

/// Display-Implementierung für Debugging
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} vertices", self.vertices.len())?;
        if self.is_closed {
            write!(f, ", closed")?;
        }
        write!(f, ")")?;
        Ok(())
    }
}

/// Konvertierung von Vec<Point2D>
impl TryFrom<Vec<Point2D>> for Polygon {
    type Error = ClipError;

    fn try_from(vertices: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

/// Konvertierung zu Vec<Point2D>
impl From<Polygon> for Vec<Point2D> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_polygon_duplicates_first_vertex() {
        let polygon = Polygon::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
        ])
        .unwrap();

        assert!(polygon.is_closed());
        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon.effective_len(), 3);
        assert_eq!(polygon.vertices().first(), polygon.vertices().last());
    }

    #[test]
    fn test_too_few_vertices_rejected() {
        let result = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert!(matches!(
            result,
            Err(ClipError::InsufficientPoints { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_centroid_ignores_duplicate_endpoint() {
        let polygon = Polygon::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
        ])
        .unwrap();

        let centroid = polygon.centroid().unwrap();
        assert!((centroid - Point2D::new(1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_close_appends_duplicate() {
        let mut polygon = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
        ])
        .unwrap();
        assert!(!polygon.is_closed());

        polygon.close();
        assert!(polygon.is_closed());
        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon.effective_len(), 3);
    }

    #[test]
    fn test_conversions_and_iteration() {
        let vertices = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(1.0, 2.0),
        ];

        let polygon = Polygon::try_from(vertices.clone()).unwrap();
        assert_eq!((&polygon).into_iter().count(), 3);

        let back: Vec<Point2D> = polygon.into();
        assert_eq!(back, vertices);
    }

    #[test]
    fn test_bounds() {
        let polygon = Polygon::new(vec![
            Point2D::new(-1.0, 4.0),
            Point2D::new(3.0, -2.0),
            Point2D::new(0.5, 0.5),
        ])
        .unwrap();

        let bounds = polygon.bounds().unwrap();
        assert_eq!(bounds.min, Point2D::new(-1.0, -2.0));
        assert_eq!(bounds.max, Point2D::new(3.0, 4.0));
    }
}
