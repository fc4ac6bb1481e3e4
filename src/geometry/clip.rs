//! Sutherland–Hodgman clipping of convex polygons.

use glam::Vec2;

use super::polygon::ConvexPolygon;

/// Half-plane test against the directed edge `cp1 -> cp2`.
///
/// For a counter-clockwise window, "inside" is strictly left of every edge.
#[inline]
pub fn is_inside(cp1: Vec2, cp2: Vec2, p: Vec2) -> bool {
    (cp2.x - cp1.x) * (p.y - cp1.y) > (cp2.y - cp1.y) * (p.x - cp1.x)
}

/// Intersection of the infinite line through `cp1, cp2` with the line
/// through `s, e`, using homogeneous cross products.
///
/// Returns `None` when the lines are parallel (or either is zero length).
pub fn line_intersection(cp1: Vec2, cp2: Vec2, s: Vec2, e: Vec2) -> Option<Vec2> {
    let dc = cp1 - cp2;
    let dp = s - e;
    let n1 = cp1.perp_dot(cp2);
    let n2 = s.perp_dot(e);
    let det = dc.perp_dot(dp);

    // Relative tolerance: the determinant scales with both edge lengths.
    let tolerance = f32::EPSILON * dc.length() * dp.length();
    if !(det.abs() > tolerance) {
        return None;
    }

    let inv = 1.0 / det;
    let point = Vec2::new(
        (n1 * dp.x - n2 * dc.x) * inv,
        (n1 * dp.y - n2 * dc.y) * inv,
    );
    point.is_finite().then_some(point)
}

/// Clip `subject` against the convex `window`.
///
/// The output is the overlap region; it is empty (or degenerate) when the two
/// polygons do not overlap. Both inputs must be convex and wound
/// counter-clockwise.
pub fn clip(subject: &ConvexPolygon, window: &ConvexPolygon) -> ConvexPolygon {
    let window = window.vertices();
    if subject.is_empty() || window.len() < 3 {
        return ConvexPolygon::empty();
    }

    let mut output: Vec<Vec2> = subject.vertices().to_vec();
    let mut input: Vec<Vec2> = Vec::with_capacity(output.len() + window.len());

    let mut cp1 = window[window.len() - 1];
    for &cp2 in window {
        if output.is_empty() {
            return ConvexPolygon::empty();
        }
        std::mem::swap(&mut input, &mut output);
        output.clear();

        let mut s = input[input.len() - 1];
        for &e in &input {
            let e_inside = is_inside(cp1, cp2, e);
            let s_inside = is_inside(cp1, cp2, s);
            if e_inside {
                if !s_inside {
                    output.extend(line_intersection(cp1, cp2, s, e));
                }
                output.push(e);
            } else if s_inside {
                output.extend(line_intersection(cp1, cp2, s, e));
            }
            s = e;
        }
        cp1 = cp2;
    }

    ConvexPolygon::new(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32) -> ConvexPolygon {
        ConvexPolygon::from_bounds(Vec2::splat(min), Vec2::splat(max))
    }

    #[test]
    fn test_overlapping_squares() {
        let overlap = clip(&square(0.0, 1.0), &square(0.5, 1.5));
        let eps = 1e-5;
        assert!(!overlap.is_degenerate());
        assert!(
            (overlap.area() - 0.25).abs() < eps,
            "Overlap area should be 0.25: {}",
            overlap.area()
        );
        let c = overlap.centroid().unwrap();
        assert!(
            (c - Vec2::splat(0.75)).length() < eps,
            "Overlap centroid should be (0.75, 0.75): {:?}",
            c
        );
    }

    #[test]
    fn test_disjoint_squares() {
        let overlap = clip(&square(0.0, 1.0), &square(5.0, 6.0));
        assert!(overlap.is_degenerate());
        assert_eq!(overlap.area(), 0.0);
    }

    #[test]
    fn test_contained_square() {
        let overlap = clip(&square(0.25, 0.75), &square(0.0, 1.0));
        assert!((overlap.area() - 0.25).abs() < 1e-5);
        assert_eq!(overlap.len(), 4);
    }

    #[test]
    fn test_shared_parallel_edges_stay_finite() {
        // Same width, stacked vertically: left and right edges are collinear.
        let a = ConvexPolygon::from_bounds(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = ConvexPolygon::from_bounds(Vec2::new(0.0, 0.5), Vec2::new(1.0, 2.0));
        let overlap = clip(&a, &b);
        for v in overlap.vertices() {
            assert!(v.is_finite(), "Clipped vertex must be finite: {:?}", v);
        }
        assert!(overlap.area() <= 0.5 + 1e-5);

        let same = clip(&a, &a);
        for v in same.vertices() {
            assert!(v.is_finite(), "Self-clip vertex must be finite: {:?}", v);
        }
    }

    #[test]
    fn test_parallel_lines_have_no_intersection() {
        let hit = line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        );
        assert!(hit.is_none());
        let zero = line_intersection(Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::ONE);
        assert!(zero.is_none(), "Zero-length edge must not intersect");
    }

    #[test]
    fn test_line_intersection_point() {
        let p = line_intersection(
            Vec2::new(0.5, 1.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        )
        .unwrap();
        assert!((p - Vec2::new(0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_window() {
        let window = ConvexPolygon::new(vec![Vec2::ZERO, Vec2::ONE]);
        assert!(clip(&square(0.0, 1.0), &window).is_empty());
    }
}
