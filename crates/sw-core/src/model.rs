//! Drawing document model: strokes, particles, and the operations the
//! gesture state machine performs on them.
//!
//! Stroke order is z-order (first stroke painted first). Particle order is
//! irrelevant. Every operation is at most linear in the total point count.

use crate::geometry::Point;
use crate::particles::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stroke widths and eraser sizes saturate into this range.
pub const MIN_WIDTH: f32 = 1.0;
pub const MAX_WIDTH: f32 = 100.0;

/// Every n-th point of a stroke becomes a particle on dissolve.
pub const DISSOLVE_STRIDE: usize = 5;

/// Clamp a width into `[MIN_WIDTH, MAX_WIDTH]`. NaN saturates to the minimum.
pub fn clamp_width(width: f32) -> f32 {
    if width.is_nan() {
        MIN_WIDTH
    } else {
        width.clamp(MIN_WIDTH, MAX_WIDTH)
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let byte = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            6 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color \"{s}\"")))
    }
}

// ─── Tool mode ───────────────────────────────────────────────────────────

/// What a pinch does: lay down ink, or erase it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Drawing,
    Eraser,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Drawing => "drawing",
            Mode::Eraser => "eraser",
        }
    }
}

// ─── Strokes & particles ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: Color,
    pub width: f32,
    /// Eraser marks are bookkeeping only: never painted, never erased,
    /// never rescaled.
    pub is_eraser: bool,
}

impl Stroke {
    pub fn new(origin: Point, color: Color, width: f32, is_eraser: bool) -> Self {
        Self {
            points: vec![origin],
            color,
            width: clamp_width(width),
            is_eraser,
        }
    }

    /// Number of particles this stroke yields on dissolve.
    pub fn sample_count(&self) -> usize {
        self.points.len().div_ceil(DISSOLVE_STRIDE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Opacity in `[0, 1]`; the particle dies once it reaches zero.
    pub alpha: f32,
    pub color: Color,
    pub radius: f32,
}

// ─── Document ────────────────────────────────────────────────────────────

/// The drawing: ordered strokes plus the particle buffer.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub strokes: Vec<Stroke>,
    pub particles: Vec<Particle>,
    rng: Rng,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document whose dissolve velocities come from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            ..Self::default()
        }
    }

    /// Append a new one-point stroke. It becomes the active stroke.
    pub fn start_stroke(&mut self, origin: Point, color: Color, width: f32, is_eraser: bool) {
        self.strokes.push(Stroke::new(origin, color, width, is_eraser));
    }

    /// Append a point to the most recent stroke.
    ///
    /// Returns `false` (and changes nothing) when there is no stroke, which
    /// happens when frames arrive out of order around a dissolve or clear.
    pub fn extend_active_stroke(&mut self, point: Point) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.points.push(point);
                true
            }
            None => {
                log::debug!("extend_active_stroke with no active stroke; ignored");
                false
            }
        }
    }

    /// Remove every ink point strictly within `radius` of `center`, then
    /// purge strokes left empty. Eraser marks are untouched.
    ///
    /// Returns the number of points removed.
    pub fn erase_near(&mut self, center: Point, radius: f32) -> usize {
        let mut removed = 0;
        for stroke in self.strokes.iter_mut().filter(|s| !s.is_eraser) {
            let before = stroke.points.len();
            stroke.points.retain(|p| p.distance(center) >= radius);
            removed += before - stroke.points.len();
        }
        if removed > 0 {
            self.purge_empty();
        }
        removed
    }

    /// Drop strokes that have no points left.
    pub fn purge_empty(&mut self) {
        self.strokes.retain(|s| !s.points.is_empty());
    }

    /// Scale every ink stroke about `center`: points move radially by
    /// `factor`, widths scale by `factor` and saturate into the width range.
    pub fn rescale_about(&mut self, center: Point, factor: f32) {
        for stroke in self
            .strokes
            .iter_mut()
            .filter(|s| !s.is_eraser && !s.points.is_empty())
        {
            stroke.width = clamp_width(stroke.width * factor);
            for p in &mut stroke.points {
                *p = p.scaled_about(center, factor);
            }
        }
    }

    /// Turn every stroke into particles and clear the strokes.
    ///
    /// Samples points 0, 5, 10, … of each stroke. Each particle starts at
    /// its sample point with a random velocity in `[-5, 5] × [5, 10]`.
    /// Returns the number of particles produced.
    pub fn dissolve_all(&mut self) -> usize {
        let before = self.particles.len();
        for stroke in self.strokes.drain(..) {
            for p in stroke.points.iter().step_by(DISSOLVE_STRIDE) {
                self.particles.push(Particle {
                    x: p.x,
                    y: p.y,
                    vx: self.rng.range(-5.0, 5.0),
                    vy: self.rng.range(5.0, 10.0),
                    alpha: 1.0,
                    color: stroke.color,
                    radius: stroke.width * 0.5,
                });
            }
        }
        self.particles.len() - before
    }

    /// Drop the oldest particles until at most `max` remain.
    pub fn cap_particles(&mut self, max: usize) {
        if self.particles.len() > max {
            let excess = self.particles.len() - max;
            log::debug!("particle buffer over cap; dropping {excess} oldest");
            self.particles.drain(..excess);
        }
    }

    pub fn clear_all(&mut self) {
        self.strokes.clear();
        self.particles.clear();
    }

    /// Strokes a renderer should paint, in z-order.
    pub fn visible_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes
            .iter()
            .filter(|s| !s.is_eraser && !s.points.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(doc: &mut Document, n: usize, y: f32, width: f32) {
        doc.start_stroke(Point::new(0.0, y), Color::RED, width, false);
        for i in 1..n {
            doc.extend_active_stroke(Point::new(i as f32 * 10.0, y));
        }
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::GREEN));
        assert_eq!(Color::GREEN.to_hex(), "#00FF00");
        assert_eq!(Color::TRANSPARENT.to_hex(), "#00000000");
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn start_stroke_clamps_width() {
        let mut doc = Document::new();
        doc.start_stroke(Point::default(), Color::BLUE, 500.0, false);
        doc.start_stroke(Point::default(), Color::BLUE, 0.0, false);
        assert_eq!(doc.strokes[0].width, MAX_WIDTH);
        assert_eq!(doc.strokes[1].width, MIN_WIDTH);
    }

    #[test]
    fn extend_without_stroke_is_noop() {
        let mut doc = Document::new();
        assert!(!doc.extend_active_stroke(Point::new(1.0, 1.0)));
        assert!(doc.is_empty());
    }

    #[test]
    fn extend_appends_to_last_stroke() {
        let mut doc = Document::new();
        line(&mut doc, 3, 0.0, 5.0);
        line(&mut doc, 2, 50.0, 5.0);
        assert_eq!(doc.strokes[0].points.len(), 3);
        assert_eq!(doc.strokes[1].points.len(), 2);
    }

    #[test]
    fn erase_covering_whole_stroke_purges_it() {
        let mut doc = Document::new();
        line(&mut doc, 3, 0.0, 5.0); // (0,0) (10,0) (20,0)
        line(&mut doc, 3, 500.0, 5.0);
        let removed = doc.erase_near(Point::new(10.0, 0.0), 15.0);
        assert_eq!(removed, 3);
        assert_eq!(doc.strokes.len(), 1);
        assert_eq!(doc.strokes[0].points[0].y, 500.0);
    }

    #[test]
    fn erase_partial_keeps_remaining_points() {
        let mut doc = Document::new();
        line(&mut doc, 4, 0.0, 5.0);
        doc.erase_near(Point::new(0.0, 0.0), 5.0);
        assert_eq!(
            doc.strokes[0].points,
            vec![
                Point::new(10.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(30.0, 0.0)
            ]
        );
    }

    #[test]
    fn erase_never_touches_eraser_marks() {
        let mut doc = Document::new();
        doc.start_stroke(Point::new(0.0, 0.0), Color::TRANSPARENT, 60.0, true);
        doc.erase_near(Point::new(0.0, 0.0), 100.0);
        assert_eq!(doc.strokes.len(), 1);
        assert_eq!(doc.strokes[0].points.len(), 1);
    }

    #[test]
    fn erase_on_empty_document_is_noop() {
        let mut doc = Document::new();
        assert_eq!(doc.erase_near(Point::default(), 10.0), 0);
    }

    #[test]
    fn rescale_moves_points_radially() {
        let mut doc = Document::new();
        line(&mut doc, 3, 4.0, 10.0);
        let before = doc.strokes[0].points.clone();
        let c = Point::new(-3.0, 1.0);
        let f = 1.5;
        doc.rescale_about(c, f);

        for (old, new) in before.iter().zip(&doc.strokes[0].points) {
            let expected = old.distance(c) * f;
            assert!((new.distance(c) - expected).abs() < 1e-3);
        }
        assert_eq!(doc.strokes[0].width, 15.0);
    }

    #[test]
    fn rescale_saturates_width() {
        let mut doc = Document::new();
        line(&mut doc, 1, 0.0, 90.0);
        line(&mut doc, 1, 0.0, 2.0);
        doc.rescale_about(Point::default(), 2.0);
        assert_eq!(doc.strokes[0].width, MAX_WIDTH);
        doc.rescale_about(Point::default(), 0.01);
        assert_eq!(doc.strokes[1].width, MIN_WIDTH);
    }

    #[test]
    fn rescale_skips_eraser_marks() {
        let mut doc = Document::new();
        doc.start_stroke(Point::new(10.0, 10.0), Color::TRANSPARENT, 60.0, true);
        doc.rescale_about(Point::default(), 2.0);
        assert_eq!(doc.strokes[0].points[0], Point::new(10.0, 10.0));
        assert_eq!(doc.strokes[0].width, 60.0);
    }

    #[test]
    fn dissolve_samples_every_fifth_point() {
        let mut doc = Document::with_seed(7);
        line(&mut doc, 12, 0.0, 8.0); // ceil(12/5) = 3
        line(&mut doc, 5, 100.0, 8.0); // ceil(5/5) = 1
        line(&mut doc, 1, 200.0, 8.0); // 1

        let expected: usize = doc.strokes.iter().map(Stroke::sample_count).sum();
        let produced = doc.dissolve_all();

        assert_eq!(produced, 5);
        assert_eq!(produced, expected);
        assert!(doc.strokes.is_empty());

        let xs: Vec<f32> = doc.particles.iter().take(3).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);

        for p in &doc.particles {
            assert!((-5.0..=5.0).contains(&p.vx));
            assert!((5.0..=10.0).contains(&p.vy));
            assert_eq!(p.alpha, 1.0);
            assert_eq!(p.radius, 4.0);
            assert_eq!(p.color, Color::RED);
        }
    }

    #[test]
    fn cap_particles_drops_oldest() {
        let mut doc = Document::with_seed(1);
        line(&mut doc, 50, 0.0, 4.0); // 10 particles
        doc.dissolve_all();
        doc.cap_particles(4);
        assert_eq!(doc.particles.len(), 4);
        assert_eq!(doc.particles[0].x, 300.0);
    }

    #[test]
    fn clear_all_empties_everything() {
        let mut doc = Document::new();
        line(&mut doc, 10, 0.0, 4.0);
        doc.dissolve_all();
        line(&mut doc, 2, 0.0, 4.0);
        doc.clear_all();
        assert!(doc.is_empty());
    }

    #[test]
    fn visible_strokes_hide_eraser_marks() {
        let mut doc = Document::new();
        line(&mut doc, 2, 0.0, 4.0);
        doc.start_stroke(Point::default(), Color::TRANSPARENT, 60.0, true);
        assert_eq!(doc.visible_strokes().count(), 1);
    }
}
