//! Geometric predicates and constructions over 2D points.
//!
//! All predicates are pure and take their tolerance explicitly; the defaults
//! live in [`crate::Tolerances`].
//!
//! The rectangle and square tests sort the four points lexicographically and
//! reason about the first and last point of that order. This is a heuristic,
//! not a full quadrilateral test: it accepts collapsed inputs (two pairs of
//! coincident points) as rectangles, and since both side candidates in
//! [`is_square`] are nearest-neighbour distances, an oblong rectangle also
//! passes as a square.

use std::cmp::Ordering;

use crate::types::{BoundingBox, Point};

/// Squared Euclidean distance.
#[inline]
pub fn dist2(a: Point, b: Point) -> f64 {
    a.distance_squared(b)
}

/// 2D cross product of `b - a` and `c - a`: twice the signed triangle area.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Three points are collinear when the triangle they span has (almost) no area.
pub fn are_collinear(a: Point, b: Point, c: Point, eps: f64) -> bool {
    cross(a, b, c).abs() < eps
}

/// The angle at `b` formed by `a` and `c` is right.
fn is_right_angle(a: Point, b: Point, c: Point, eps: f64) -> bool {
    (a - b).dot(c - b).abs() < eps
}

/// Sort points by x, then y. `-0.0` and `0.0` compare equal.
pub fn sort_lexicographic(mut points: [Point; 4]) -> [Point; 4] {
    let cmp = |a: f64, b: f64| a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    points.sort_by(|a, b| cmp(a.x, b.x).then_with(|| cmp(a.y, b.y)));
    points
}

/// Four points form a rectangle.
///
/// With `A..D` the lexicographically sorted points, requires a right angle at
/// `A` and at `D` and equal opposite sides `AB = CD`, `AC = BD` (compared
/// squared, within `eps`).
pub fn is_rectangle(p1: Point, p2: Point, p3: Point, p4: Point, eps: f64) -> bool {
    let [a, b, c, d] = sort_lexicographic([p1, p2, p3, p4]);

    // The sort does not tell which of B and C is adjacent to A, so the angle
    // test is tried both ways round.
    let right_a = is_right_angle(b, a, c, eps) || is_right_angle(c, a, b, eps);
    let right_d = is_right_angle(b, d, c, eps) || is_right_angle(c, d, b, eps);

    let opposite_equal =
        (dist2(a, b) - dist2(c, d)).abs() < eps && (dist2(a, c) - dist2(b, d)).abs() < eps;

    right_a && right_d && opposite_equal
}

/// Four points form a square: a rectangle whose sides are all equal and non-zero.
pub fn is_square(p1: Point, p2: Point, p3: Point, p4: Point, eps: f64) -> bool {
    let [a, b, c, d] = sort_lexicographic([p1, p2, p3, p4]);
    if !is_rectangle(a, b, c, d, eps) {
        return false;
    }

    // Nearest neighbours of the two extreme corners are side lengths.
    let s1 = dist2(a, b).min(dist2(a, c));
    let s2 = dist2(d, b).min(dist2(d, c));
    (s1 - s2).abs() < eps && s1 > eps
}

/// Two points can serve as the diagonal of a square: they are not (almost) the same point.
pub fn is_valid_square_diagonal(d1: Point, d2: Point, eps: f64) -> bool {
    dist2(d1, d2) > eps
}

/// Relative float comparison: equal up to about 12 significant digits.
///
/// Zero only compares equal to zero.
pub fn fuzzy_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() * 1e12 <= a.abs().min(b.abs())
}

/// Two diagonal points that share an x or a y would collapse a rectangle to a line.
pub fn shares_axis(p1: Point, p2: Point) -> bool {
    fuzzy_eq(p1.x, p2.x) || fuzzy_eq(p1.y, p2.y)
}

/// Corners of the axis-aligned rectangle spanned by the given points,
/// bottom-left first, counter-clockwise.
pub fn bounding_corners(points: &[Point]) -> [Point; 4] {
    BoundingBox::from_points(points).corners()
}

/// Corners derived from a square's diagonal `d1`–`d2`.
///
/// With `M` the midpoint, `v = d2 - d1`, `w` the unit perpendicular of `v`,
/// `h = |v| / 2` and `s = h / √2`, the corners are `M ± v/2 ± w·s`, listed in
/// (+,+), (−,+), (−,−), (+,−) order so they trace the outline.
pub fn square_from_diagonal(d1: Point, d2: Point) -> [Point; 4] {
    let v = d2 - d1;
    let m = (d1 + d2) / 2.0;
    let len = v.length();
    let w = if len == 0.0 { Point::ZERO } else { (v / len).perp() };
    let half = len / 2.0;
    let side_half = half / std::f64::consts::SQRT_2;

    let along = v / 2.0;
    let across = w * side_half;
    [
        m + along + across,
        m - along + across,
        m - along - across,
        m + along - across,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tolerances;
    use crate::types::pt;

    const EPS: f64 = Tolerances::RECTANGLE;

    fn approx(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn collinear_points() {
        let eps = Tolerances::COLLINEAR;
        assert!(are_collinear(pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0), eps));
        assert!(are_collinear(pt(0.0, 0.0), pt(0.0, 0.0), pt(5.0, 3.0), eps));
        assert!(!are_collinear(pt(0.0, 0.0), pt(4.0, 0.0), pt(2.0, 3.0), eps));
    }

    #[test]
    fn axis_aligned_rectangle_in_any_order() {
        let corners = [pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 2.0), pt(0.0, 2.0)];
        assert!(is_rectangle(corners[0], corners[1], corners[2], corners[3], EPS));
        assert!(is_rectangle(corners[2], corners[0], corners[3], corners[1], EPS));
        assert!(is_rectangle(corners[3], corners[2], corners[1], corners[0], EPS));
    }

    #[test]
    fn rotated_rectangle() {
        // 3-4-5 rotation keeps the coordinates exact
        let a = pt(0.0, 0.0);
        let b = pt(4.0, 3.0);
        let c = pt(1.0, 7.0);
        let d = pt(-3.0, 4.0);
        assert!(is_rectangle(a, b, c, d, EPS));
    }

    #[test]
    fn parallelogram_is_not_a_rectangle() {
        assert!(!is_rectangle(
            pt(0.0, 0.0),
            pt(4.0, 0.0),
            pt(5.0, 2.0),
            pt(1.0, 2.0),
            EPS
        ));
    }

    #[test]
    fn trapezoid_is_not_a_rectangle() {
        assert!(!is_rectangle(
            pt(0.0, 0.0),
            pt(4.0, 0.0),
            pt(3.0, 2.0),
            pt(1.0, 2.0),
            EPS
        ));
    }

    #[test]
    fn negative_zero_sorts_with_zero() {
        let sorted = sort_lexicographic([pt(-0.0, 2.0), pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0)]);
        assert_eq!(sorted[0], pt(0.0, 0.0));
        assert_eq!(sorted[1].y, 2.0);
        assert!(is_rectangle(pt(-0.0, 2.0), pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0), EPS));
        assert!(is_square(pt(-0.0, 2.0), pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0), EPS));
    }

    #[test]
    fn collinearity_tolerance_boundary() {
        let eps = Tolerances::COLLINEAR;
        assert!(are_collinear(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 0.5e-6), eps));
        assert!(!are_collinear(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 2e-6), eps));
    }

    #[test]
    fn square_diagonal_tolerance_boundary() {
        let eps = Tolerances::SQUARE_DIAGONAL;
        // squared lengths 9e-10 and 1.6e-9 around the 1e-9 minimum
        assert!(!is_valid_square_diagonal(pt(0.0, 0.0), pt(3e-5, 0.0), eps));
        assert!(is_valid_square_diagonal(pt(0.0, 0.0), pt(4e-5, 0.0), eps));
    }

    #[test]
    fn diamond_is_a_square() {
        let diamond = [pt(-1.0, 0.0), pt(0.0, -1.0), pt(1.0, 0.0), pt(0.0, 1.0)];
        assert!(is_rectangle(diamond[0], diamond[1], diamond[2], diamond[3], EPS));
        assert!(is_square(diamond[0], diamond[1], diamond[2], diamond[3], EPS));
    }

    #[test]
    fn collapsed_points_pass_rectangle_heuristic() {
        let a = pt(0.0, 0.0);
        let b = pt(4.0, 0.0);
        assert!(is_rectangle(a, a, b, b, EPS));
    }

    #[test]
    fn oblong_rectangle_passes_square_heuristic() {
        // Both candidates are the short side (2² = 4)
        assert!(is_square(pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 2.0), pt(0.0, 2.0), EPS));
    }

    #[test]
    fn squares() {
        assert!(is_square(pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0), pt(0.0, 2.0), EPS));
        assert!(is_square(pt(2.0, 2.0), pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 0.0), EPS));
        assert!(!is_square(pt(0.0, 0.0), pt(4.0, 0.0), pt(5.0, 2.0), pt(1.0, 2.0), EPS));
    }

    #[test]
    fn degenerate_square_is_rejected() {
        let p = pt(1.0, 1.0);
        assert!(!is_square(p, p, p, p, EPS));
    }

    #[test]
    fn square_diagonal_needs_length() {
        let eps = Tolerances::SQUARE_DIAGONAL;
        assert!(!is_valid_square_diagonal(pt(0.0, 0.0), pt(0.0, 0.0), eps));
        assert!(is_valid_square_diagonal(pt(0.0, 0.0), pt(2.0, 2.0), eps));
    }

    #[test]
    fn fuzzy_comparison() {
        assert!(fuzzy_eq(0.0, 0.0));
        assert!(fuzzy_eq(1.0, 1.0 + 1e-15));
        assert!(!fuzzy_eq(0.0, 1e-20));
        assert!(!fuzzy_eq(1.0, 1.001));
        assert!(shares_axis(pt(1.0, 0.0), pt(1.0, 5.0)));
        assert!(shares_axis(pt(0.0, 3.0), pt(5.0, 3.0)));
        assert!(!shares_axis(pt(0.0, 0.0), pt(4.0, 2.0)));
    }

    #[test]
    fn square_corners_from_diagonal() {
        let d1 = pt(0.0, 0.0);
        let d2 = pt(2.0, 0.0);
        let corners = square_from_diagonal(d1, d2);
        // v = (2,0), w = (0,1), s = 1/√2
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx(corners[0], pt(2.0, s)));
        assert!(approx(corners[1], pt(0.0, s)));
        assert!(approx(corners[2], pt(0.0, -s)));
        assert!(approx(corners[3], pt(2.0, -s)));

        let centroid = corners.iter().copied().sum::<Point>() / 4.0;
        assert!(approx(centroid, pt(1.0, 0.0)));
    }
}
