//! Convex polygon type with area and centroid extraction.

use glam::Vec2;

/// Below this absolute area the area-weighted centroid is numerically useless
/// and the vertex mean is used instead.
const CENTROID_AREA_EPSILON: f32 = 1e-9;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2d {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2d {
    /// Test whether two AABBs overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb2d) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.min.x && x <= self.max.x
    }
}

/// Ordered sequence of world-space points, wound counter-clockwise.
///
/// Fewer than three vertices means "no overlap": such a polygon reports zero
/// area and no centroid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Counter-clockwise rectangle spanning `min`..`max`.
    pub fn from_bounds(min: Vec2, max: Vec2) -> Self {
        Self::new(vec![
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ])
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vec2> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the polygon encloses no region (fewer than 3 vertices).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Edges `(v[i], v[i + 1])`, wrapping from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace sum; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        0.5 * self.edges().map(|(a, b)| a.perp_dot(b)).sum::<f32>()
    }

    /// Enclosed area. Zero for degenerate polygons.
    #[inline]
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid, falling back to the vertex mean when the area
    /// is too small to divide by. `None` for degenerate polygons.
    pub fn centroid(&self) -> Option<Vec2> {
        if self.is_degenerate() {
            return None;
        }
        let signed = self.signed_area();
        if signed.abs() < CENTROID_AREA_EPSILON {
            return self.vertex_mean();
        }
        let weighted = self
            .edges()
            .fold(Vec2::ZERO, |acc, (a, b)| acc + (a + b) * a.perp_dot(b));
        Some(weighted / (6.0 * signed))
    }

    /// Arithmetic mean of the vertices.
    pub fn vertex_mean(&self) -> Option<Vec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self.vertices.iter().copied().sum::<Vec2>();
        Some(sum / self.vertices.len() as f32)
    }

    pub fn aabb(&self) -> Option<Aabb2d> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(Aabb2d { min, max })
    }
}

impl From<Vec<Vec2>> for ConvexPolygon {
    fn from(vertices: Vec<Vec2>) -> Self {
        Self::new(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_square_area_centroid() {
        let square = ConvexPolygon::from_bounds(Vec2::ZERO, Vec2::ONE);
        let eps = 1e-6;
        assert!((square.area() - 1.0).abs() < eps);
        assert!(square.signed_area() > 0.0, "from_bounds must wind CCW");
        let c = square.centroid().unwrap();
        assert!((c - Vec2::splat(0.5)).length() < eps);
    }

    #[test]
    fn test_clockwise_area_is_positive() {
        let cw = ConvexPolygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 0.0),
        ]);
        assert!(cw.signed_area() < 0.0);
        assert!((cw.area() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_centroid_is_area_weighted() {
        // Triangle with a duplicated vertex: the vertex mean would be pulled
        // towards the duplicate, the area-weighted centroid is not.
        let tri = ConvexPolygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(0.0, 3.0),
        ]);
        let c = tri.centroid().unwrap();
        assert!(
            (c - Vec2::new(1.0, 1.0)).length() < 1e-5,
            "Triangle centroid should be (1, 1): {:?}",
            c
        );
    }

    #[test]
    fn test_degenerate_has_no_area() {
        let line = ConvexPolygon::new(vec![Vec2::ZERO, Vec2::ONE]);
        assert!(line.is_degenerate());
        assert_eq!(line.area(), 0.0);
        assert!(line.centroid().is_none());
        assert!(ConvexPolygon::empty().aabb().is_none());
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb2d {
            min: Vec2::splat(-1.0),
            max: Vec2::splat(1.0),
        };
        let b = Aabb2d {
            min: Vec2::splat(0.5),
            max: Vec2::splat(2.0),
        };
        let c = Aabb2d {
            min: Vec2::splat(2.5),
            max: Vec2::splat(3.0),
        };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}
