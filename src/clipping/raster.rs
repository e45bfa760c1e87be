// src/clipping/raster.rs

use crate::geometry::polygon::Polygon;
use crate::types::{Bounds2D, Point2D};
use crate::utils::{simple_geometry, tolerances};

/// Rand-Reserve des Arbeitsrasters in Pixeln, damit Randpixel der Masken
/// immer einen ungesetzten Nachbarn haben
const RASTER_PAD: usize = 1;

/// Obergrenze der Konturlänge als Vielfaches der Auflösung
const MAX_TRACE_FACTOR: usize = 4;

/// Ab dieser Punktzahl wird die zurückgerechnete Kontur vereinfacht
const SIMPLIFY_THRESHOLD: usize = 100;

/// Vereinfachungs-Epsilon in Rasterpixeln (wird in Weltkoordinaten skaliert)
const SIMPLIFY_PIXELS: f64 = 2.0;

/// Die 8 Nachbarrichtungen im Uhrzeigersinn (y wächst nach unten):
/// O, SO, S, SW, W, NW, N, NO
const MOORE_DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Binäre Rastermaske fester Größe.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Bitmap {
    /// Erstellt eine leere Maske
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel lesen; außerhalb der Maske immer `false`
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.bits[y as usize * self.width + x as usize]
    }

    /// Pixel setzen (außerhalb der Maske ohne Wirkung)
    pub fn set(&mut self, x: i64, y: i64, value: bool) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.bits[y as usize * self.width + x as usize] = value;
    }

    /// Enthält die Maske mindestens ein gesetztes Pixel?
    pub fn any(&self) -> bool {
        self.bits.iter().any(|&b| b)
    }

    /// Anzahl gesetzter Pixel
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Pixelweises UND zweier gleich großer Masken
    pub fn and(&self, other: &Bitmap) -> Bitmap {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);

        let bits = self
            .bits
            .iter()
            .zip(other.bits.iter())
            .map(|(&a, &b)| a && b)
            .collect();

        Bitmap {
            width: self.width,
            height: self.height,
            bits,
        }
    }

    /// Füllt ein Polygon (Rasterkoordinaten) per Even-Odd-Scanline.
    /// Keine Kantenglättung: die Ränder bleiben scharf für die
    /// anschließende Konturverfolgung.
    pub fn fill_polygon(&mut self, points: &[Point2D]) {
        let n = points.len();
        if n < 3 {
            return;
        }

        let mut crossings: Vec<f64> = Vec::new();

        for y in 0..self.height {
            let scan_y = y as f64 + 0.5;
            crossings.clear();

            for i in 0..n {
                let a = points[i];
                let b = points[(i + 1) % n];

                // Kante kreuzt die Scanline genau dann, wenn die Endpunkte
                // auf verschiedenen Seiten liegen (schließt dy == 0 aus)
                if (a.y <= scan_y) != (b.y <= scan_y) {
                    let t = (scan_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + (b.x - a.x) * t);
                }
            }

            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil().max(0.0) as usize;
                let end = (pair[1] - 0.5).floor().min((self.width - 1) as f64);
                if end < 0.0 {
                    continue;
                }
                for x in start..=(end as usize) {
                    self.bits[y * self.width + x] = true;
                }
            }
        }
    }

    /// Ist das Pixel gesetzt und hat mindestens einen ungesetzten 4-Nachbarn?
    fn is_boundary(&self, x: i64, y: i64) -> bool {
        self.get(x, y)
            && (!self.get(x - 1, y) || !self.get(x + 1, y) || !self.get(x, y - 1) || !self.get(x, y + 1))
    }
}

/// Rasterisierender Fallback für den Polygon-Schnitt.
///
/// Beide Polygone werden in eine quadratische Arbeitsmaske gefüllt, die
/// Masken pixelweise verUNDet und der Rand der Schnittmaske per
/// Moore-Nachbarschaft zurück in Weltkoordinaten verfolgt. Genauigkeit und
/// Kosten skalieren mit der Auflösung.
pub struct RasterClipper {
    resolution: usize,
}

impl Default for RasterClipper {
    fn default() -> Self {
        Self {
            resolution: tolerances::RASTER_RESOLUTION,
        }
    }
}

impl RasterClipper {
    /// Erstellt einen Fallback-Clipper mit Standard-Auflösung
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt die Arbeitsauflösung (Pixel, quadratisch)
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution.max(16);
        self
    }

    /// Berechnet den Schnitt über die Rastermasken.
    ///
    /// `None` bedeutet: keine gemeinsamen Pixel oder die Rückverfolgung hat
    /// keine brauchbare Kontur ergeben.
    pub fn clip(&self, subject: &Polygon, clip: &Polygon) -> Option<Polygon> {
        let (Some(subject_bounds), Some(clip_bounds)) = (subject.bounds(), clip.bounds()) else {
            return None;
        };

        let bounds = subject_bounds.union(&clip_bounds);
        let extent = bounds.width().max(bounds.height());
        if extent < tolerances::EPSILON {
            return None;
        }

        let res = self.resolution;
        let scale = (res - 2 * RASTER_PAD) as f64 / extent;
        let pad = Point2D::splat(RASTER_PAD as f64);
        let to_raster = |p: Point2D| (p - bounds.min) * scale + pad;
        let to_world = |x: f64, y: f64| bounds.min + (Point2D::new(x, y) - pad) / scale;

        let mut subject_mask = Bitmap::new(res, res);
        subject_mask.fill_polygon(
            &subject
                .effective_vertices()
                .iter()
                .map(|&p| to_raster(p))
                .collect::<Vec<_>>(),
        );

        let mut clip_mask = Bitmap::new(res, res);
        clip_mask.fill_polygon(
            &clip
                .effective_vertices()
                .iter()
                .map(|&p| to_raster(p))
                .collect::<Vec<_>>(),
        );

        let mask = subject_mask.and(&clip_mask);
        if !mask.any() {
            return None; // Kein Schnitt
        }

        // Konturverfolgung; bei Fehlschlag grobe Region aus der Maske
        let contour = match self.trace_boundary(&mask) {
            Some(contour) => contour,
            None => self.mask_to_region(&mask),
        };
        if contour.is_empty() {
            return None;
        }

        // Pixelkontur (Pixelzentren) zurück in Weltkoordinaten
        let mut points: Vec<Point2D> = Vec::with_capacity(contour.len());
        for &(x, y) in &contour {
            let world = to_world(x as f64 + 0.5, y as f64 + 0.5);
            match points.last() {
                Some(last) if last.distance(world) < tolerances::POINT_EPSILON => {}
                _ => points.push(world),
            }
        }

        if points.len() > SIMPLIFY_THRESHOLD {
            // Epsilon proportional zur Formgröße (~2 Rasterpixel)
            let epsilon = extent * SIMPLIFY_PIXELS / res as f64;
            points = simplify_polyline(&points, epsilon);
        }

        if points.len() < 3 {
            return None;
        }

        Polygon::closed(points).ok()
    }

    /// Moore-Nachbarschafts-Konturverfolgung.
    ///
    /// Startpixel ist das erste gesetzte Pixel mit ungesetztem 4-Nachbarn.
    /// Von dort werden die 8 Richtungen im Uhrzeigersinn abgesucht, beginnend
    /// unmittelbar gegen den Uhrzeigersinn von der Ankunftsrichtung. Ein
    /// sofortiger Rücksprung auf das vorherige Pixel ist nur erlaubt, wenn
    /// es keine Alternative gibt. Die Verfolgung endet am Startpixel oder
    /// nach `4 × Auflösung` Schritten (`None` = Fehlschlag).
    fn trace_boundary(&self, mask: &Bitmap) -> Option<Vec<(i64, i64)>> {
        let start = self.find_start_pixel(mask)?;

        let max_steps = MAX_TRACE_FACTOR * self.resolution;
        let mut contour = vec![start];
        let mut current = start;
        let mut previous: Option<(i64, i64)> = None;
        // Der Zeilenscan erreicht das Startpixel von links: Ankunft aus Westen
        let mut arrival_dir = 0usize;

        loop {
            let scan_start = (arrival_dir + 7) % 8;
            let mut next: Option<((i64, i64), usize)> = None;
            let mut backtrack: Option<((i64, i64), usize)> = None;

            for step in 0..8 {
                let dir = (scan_start + step) % 8;
                let (dx, dy) = MOORE_DIRECTIONS[dir];
                let candidate = (current.0 + dx, current.1 + dy);

                if !mask.get(candidate.0, candidate.1) {
                    continue;
                }
                if Some(candidate) == previous {
                    backtrack = Some((candidate, dir));
                    continue;
                }
                next = Some((candidate, dir));
                break;
            }

            let (candidate, dir) = match next.or(backtrack) {
                Some(found) => found,
                None => return Some(contour), // Isoliertes Pixel
            };

            previous = Some(current);
            current = candidate;
            arrival_dir = dir;

            if current == start {
                return Some(contour);
            }

            contour.push(current);
            if contour.len() > max_steps {
                return None; // Pathologischer Verlauf, Abbruch
            }
        }
    }

    fn find_start_pixel(&self, mask: &Bitmap) -> Option<(i64, i64)> {
        for y in 0..mask.height() as i64 {
            for x in 0..mask.width() as i64 {
                if mask.is_boundary(x, y) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Grobe Region direkt aus der Maske: pro Zeile die Lauf-Enden, links
    /// abwärts und rechts aufwärts abgelaufen. Achsengestufter Umriss als
    /// letzte Rückfallebene der Konturverfolgung.
    fn mask_to_region(&self, mask: &Bitmap) -> Vec<(i64, i64)> {
        let mut rows: Vec<(i64, i64, i64)> = Vec::new();

        for y in 0..mask.height() as i64 {
            let mut min_x: Option<i64> = None;
            let mut max_x = 0i64;
            for x in 0..mask.width() as i64 {
                if mask.get(x, y) {
                    if min_x.is_none() {
                        min_x = Some(x);
                    }
                    max_x = x;
                }
            }
            if let Some(min_x) = min_x {
                rows.push((y, min_x, max_x));
            }
        }

        let mut outline: Vec<(i64, i64)> = Vec::with_capacity(rows.len() * 2);
        for &(y, min_x, _) in &rows {
            outline.push((min_x, y));
        }
        for &(y, _, max_x) in rows.iter().rev() {
            outline.push((max_x, y));
        }
        outline
    }
}

/// Ramer-Douglas-Peucker Vereinfachung eines Linienzugs.
pub fn simplify_polyline(points: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let end = points.len() - 1;
    let mut dmax = 0.0;
    let mut index = 0;

    for i in 1..end {
        let d = simple_geometry::point_line_distance(points[i], points[0], points[end]);
        if d > dmax {
            index = i;
            dmax = d;
        }
    }

    if dmax > epsilon {
        let mut left = simplify_polyline(&points[0..=index], epsilon);
        let right = simplify_polyline(&points[index..=end], epsilon);

        left.pop(); // Entferne Duplikat am Teilungspunkt
        left.extend(right);
        left
    } else {
        vec![points[0], points[end]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon::PolygonProperties;

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::closed(vec![
            Point2D::new(min, min),
            Point2D::new(max, min),
            Point2D::new(max, max),
            Point2D::new(min, max),
        ])
        .unwrap()
    }

    #[test]
    fn test_fill_polygon_sets_interior_pixels() {
        let mut bitmap = Bitmap::new(16, 16);
        bitmap.fill_polygon(&[
            Point2D::new(2.0, 2.0),
            Point2D::new(10.0, 2.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(2.0, 10.0),
        ]);

        assert!(bitmap.get(5, 5));
        assert!(!bitmap.get(0, 0));
        assert!(!bitmap.get(12, 5));
        // 8x8 Pixelzentren liegen im Rechteck
        assert_eq!(bitmap.count(), 64);
    }

    #[test]
    fn test_bitmap_and() {
        let mut a = Bitmap::new(8, 8);
        a.fill_polygon(&[
            Point2D::new(0.0, 0.0),
            Point2D::new(6.0, 0.0),
            Point2D::new(6.0, 6.0),
            Point2D::new(0.0, 6.0),
        ]);
        let mut b = Bitmap::new(8, 8);
        b.fill_polygon(&[
            Point2D::new(3.0, 3.0),
            Point2D::new(8.0, 3.0),
            Point2D::new(8.0, 8.0),
            Point2D::new(3.0, 8.0),
        ]);

        let c = a.and(&b);
        assert!(c.any());
        assert!(c.get(4, 4));
        assert!(!c.get(1, 1));
        assert!(!c.get(7, 7));
    }

    #[test]
    fn test_overlapping_squares_traced() {
        let clipper = RasterClipper::new().with_resolution(256);
        let subject = square(0.0, 10.0);
        let clip = square(5.0, 15.0);

        let result = clipper.clip(&subject, &clip).unwrap();
        let bounds = result.bounds().unwrap();

        // Eine Handvoll Pixel Unschärfe ist bei Auflösung 256 über 15
        // Welteinheiten zulässig
        let tolerance = 0.5;
        assert!((bounds.min.x - 5.0).abs() < tolerance);
        assert!((bounds.min.y - 5.0).abs() < tolerance);
        assert!((bounds.max.x - 10.0).abs() < tolerance);
        assert!((bounds.max.y - 10.0).abs() < tolerance);
        assert!((result.area() - 25.0).abs() < 2.0);
    }

    #[test]
    fn test_disjoint_squares_yield_empty() {
        let clipper = RasterClipper::new().with_resolution(128);
        assert!(clipper.clip(&square(0.0, 5.0), &square(100.0, 110.0)).is_none());
    }

    #[test]
    fn test_contained_square_approximates_subject() {
        let clipper = RasterClipper::new().with_resolution(256);
        let subject = square(2.0, 8.0);
        let clip = square(0.0, 10.0);

        let result = clipper.clip(&subject, &clip).unwrap();
        assert!((result.area() - subject.area()).abs() < 1.5);
    }

    #[test]
    fn test_contour_is_simplified() {
        let clipper = RasterClipper::new().with_resolution(512);
        let subject = square(0.0, 10.0);
        let clip = square(1.0, 11.0);

        let result = clipper.clip(&subject, &clip).unwrap();
        // Ohne Vereinfachung hätte die Kontur tausende Pixel-Schritte
        assert!(result.len() < 200);
    }

    #[test]
    fn test_simplify_polyline_collapses_collinear_points() {
        let points: Vec<Point2D> = (0..=20)
            .map(|i| Point2D::new(i as f64, 0.0))
            .collect();
        let simplified = simplify_polyline(&points, 0.1);
        assert_eq!(simplified.len(), 2);

        // Ein deutlicher Knick bleibt erhalten
        let mut bent = points.clone();
        bent[10] = Point2D::new(10.0, 5.0);
        let simplified = simplify_polyline(&bent, 0.1);
        assert!(simplified.contains(&Point2D::new(10.0, 5.0)));
    }

    #[test]
    fn test_trace_isolated_pixel() {
        let clipper = RasterClipper::new().with_resolution(16);
        let mut mask = Bitmap::new(16, 16);
        mask.set(8, 8, true);

        let contour = clipper.trace_boundary(&mask).unwrap();
        assert_eq!(contour, vec![(8, 8)]);
    }

    #[test]
    fn test_mask_to_region_outline() {
        let clipper = RasterClipper::new().with_resolution(16);
        let mut mask = Bitmap::new(16, 16);
        mask.fill_polygon(&[
            Point2D::new(2.0, 2.0),
            Point2D::new(12.0, 2.0),
            Point2D::new(12.0, 6.0),
            Point2D::new(2.0, 6.0),
        ]);

        let outline = clipper.mask_to_region(&mask);
        assert!(!outline.is_empty());
        // Linke Kante absteigend, rechte aufsteigend
        assert_eq!(outline.first(), Some(&(2, 2)));
        assert_eq!(outline.last(), Some(&(11, 2)));
    }
}
