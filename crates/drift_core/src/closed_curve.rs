//! Closed Catmull-Rom curve the attractor travels along.
//!
//! The curve passes through an ordered list of control points. A loop is
//! formed by repeating the first point at the end, so `point_at(0.0)` and
//! `point_at(1.0)` land on the same spot.
//!
//! Parameterization is per segment, not by arc length: with `n` control
//! points each of the `n - 1` spans covers `1 / (n - 1)` of the parameter
//! range regardless of its length.
//!
//! # Example
//!
//! ```ignore
//! use drift_core::ClosedCurve;
//!
//! let curve = ClosedCurve::rectangle(6.0, 3.5);
//! let start = curve.point_at(0.0); // (6.0, 3.5, 0.0)
//! ```

use bevy::math::Vec3;

/// Spans shorter than this are treated as degenerate when computing
/// centripetal/chordal knot spacing.
const MIN_KNOT_SPAN: f32 = 1e-4;

/// How knot spacing is derived between consecutive control points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveKind {
    /// Knot spacing = |p1 - p0|^0.5. Avoids cusps and self-intersections.
    Centripetal,
    /// Knot spacing = |p1 - p0|.
    Chordal,
    /// Uniform Catmull-Rom with the given tension (0.5 is the classic form).
    Uniform { tension: f32 },
}

impl Default for CurveKind {
    fn default() -> Self {
        CurveKind::Centripetal
    }
}

/// Errors raised when building a curve from arbitrary control points.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A spline needs at least two control points.
    TooFewPoints(usize),
    /// A control point contained NaN or infinity.
    NonFinitePoint(usize),
}

impl std::fmt::Display for CurveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveError::TooFewPoints(n) => {
                write!(f, "Curve needs at least 2 control points, got {}", n)
            }
            CurveError::NonFinitePoint(i) => write!(f, "Control point {} is not finite", i),
        }
    }
}

impl std::error::Error for CurveError {}

/// A smooth curve through an ordered set of points whose ends meet.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedCurve {
    points: Vec<Vec3>,
    kind: CurveKind,
}

impl ClosedCurve {
    /// Build a closed centripetal curve through `points`.
    ///
    /// The first point is appended again when the sequence does not already
    /// end on it.
    pub fn new(points: Vec<Vec3>) -> Result<Self, CurveError> {
        Self::with_kind(points, CurveKind::default())
    }

    /// Build a closed curve with an explicit knot spacing.
    pub fn with_kind(mut points: Vec<Vec3>, kind: CurveKind) -> Result<Self, CurveError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(CurveError::NonFinitePoint(index));
        }

        let first = match points.first() {
            Some(first) => *first,
            None => return Err(CurveError::TooFewPoints(0)),
        };
        let closed = points.len() > 1 && points.last() == Some(&first);
        let distinct = if closed { points.len() - 1 } else { points.len() };
        if distinct < 2 {
            return Err(CurveError::TooFewPoints(distinct));
        }
        if !closed {
            points.push(first);
        }

        Ok(Self { points, kind })
    }

    /// Rectangular loop through the corners `(±width, ±height, 0)`.
    ///
    /// Visits the corners clockwise starting top-right, the same order the
    /// scene has always used for the attractor path.
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self {
            points: vec![
                Vec3::new(width, height, 0.0),
                Vec3::new(width, -height, 0.0),
                Vec3::new(-width, -height, 0.0),
                Vec3::new(-width, height, 0.0),
                Vec3::new(width, height, 0.0),
            ],
            kind: CurveKind::Centripetal,
        }
    }

    /// Control points, including the repeated closing point.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Position on the curve at parameter `u`.
    ///
    /// `u` is clamped to `[0, 1]`; both ends evaluate to the first control
    /// point.
    pub fn point_at(&self, u: f32) -> Vec3 {
        let points = &self.points;
        let n = points.len();
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };

        let p = (n - 1) as f32 * u;
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;

        // u == 1 lands exactly on the last control point
        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        let p1 = points[segment];
        let p2 = points[segment + 1];
        let p0 = if segment > 0 {
            points[segment - 1]
        } else {
            2.0 * points[0] - points[1]
        };
        let p3 = if segment + 2 < n {
            points[segment + 2]
        } else {
            2.0 * points[n - 1] - points[n - 2]
        };

        let poly = match self.kind {
            CurveKind::Centripetal => CubicPoly::nonuniform(p0, p1, p2, p3, 0.25),
            CurveKind::Chordal => CubicPoly::nonuniform(p0, p1, p2, p3, 0.5),
            CurveKind::Uniform { tension } => CubicPoly::uniform(p0, p1, p2, p3, tension),
        };
        poly.eval(weight)
    }

    /// `divisions + 1` points spread evenly over the parameter range.
    pub fn sample_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }
}

/// Hermite cubic `c0 + c1 t + c2 t^2 + c3 t^3` over one span.
#[derive(Clone, Copy, Debug)]
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    /// Non-uniform Catmull-Rom with knot spacing `|pi+1 - pi|^(2 * exponent)`.
    fn nonuniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, exponent: f32) -> Self {
        let mut dt1 = p1.distance_squared(p2).powf(exponent);
        let mut dt0 = p0.distance_squared(p1).powf(exponent);
        let mut dt2 = p2.distance_squared(p3).powf(exponent);

        if dt1 < MIN_KNOT_SPAN {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_SPAN {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_SPAN {
            dt2 = dt1;
        }

        let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;

        // rescale tangents for parameter in [0, 1]
        Self::hermite(p1, p2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn unit_square() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_unit_square_starts_at_first_corner() {
        let curve = ClosedCurve::new(unit_square()).unwrap();
        let start = curve.point_at(0.0);
        assert!(
            start.distance(Vec3::new(1.0, 1.0, 0.0)) < EPS,
            "expected (1,1,0), got {:?}",
            start
        );
    }

    #[test]
    fn test_curve_passes_through_every_corner() {
        let curve = ClosedCurve::new(unit_square()).unwrap();
        for (i, corner) in unit_square().iter().enumerate() {
            let u = i as f32 / 4.0;
            let p = curve.point_at(u);
            assert!(p.distance(*corner) < EPS, "u={} got {:?}", u, p);
        }
    }

    #[test]
    fn test_closure_for_many_extents() {
        let extents = [
            (0.01, 0.01),
            (1.0, 1.0),
            (6.27, 3.53),
            (18.8, 10.6),
            (250.0, 0.5),
        ];
        for (w, h) in extents {
            let curve = ClosedCurve::rectangle(w, h);
            let start = curve.point_at(0.0);
            let end = curve.point_at(1.0 - 1e-6);
            let tolerance = 1e-3 * w.max(h);
            assert!(
                start.distance(end) < tolerance,
                "extent ({}, {}): start {:?} end {:?}",
                w,
                h,
                start,
                end
            );
        }
    }

    #[test]
    fn test_closing_point_is_appended() {
        let curve = ClosedCurve::new(unit_square()[..4].to_vec()).unwrap();
        assert_eq!(curve.points().len(), 5);
        assert_eq!(curve.points()[4], curve.points()[0]);
    }

    #[test]
    fn test_rectangle_matches_explicit_points() {
        let explicit = ClosedCurve::new(unit_square()).unwrap();
        let rect = ClosedCurve::rectangle(1.0, 1.0);
        for i in 0..=20 {
            let u = i as f32 / 20.0;
            assert!(explicit.point_at(u).distance(rect.point_at(u)) < EPS);
        }
    }

    #[test]
    fn test_curve_stays_in_plane() {
        let curve = ClosedCurve::rectangle(4.0, 2.0);
        for p in curve.sample_points(50) {
            assert!(p.z.abs() < EPS);
        }
    }

    #[test]
    fn test_sample_points_count() {
        let curve = ClosedCurve::rectangle(4.0, 2.0);
        assert_eq!(curve.sample_points(50).len(), 51);
        assert_eq!(curve.sample_points(0).len(), 2);
    }

    #[test]
    fn test_out_of_range_parameter_is_clamped() {
        let curve = ClosedCurve::rectangle(2.0, 1.0);
        assert_eq!(curve.point_at(-0.5), curve.point_at(0.0));
        assert_eq!(curve.point_at(1.5), curve.point_at(1.0));
        assert_eq!(curve.point_at(f32::NAN), curve.point_at(0.0));
    }

    #[test]
    fn test_all_kinds_interpolate_corners() {
        let kinds = [
            CurveKind::Centripetal,
            CurveKind::Chordal,
            CurveKind::Uniform { tension: 0.5 },
        ];
        for kind in kinds {
            let curve = ClosedCurve::with_kind(unit_square(), kind).unwrap();
            let mid = curve.point_at(0.5);
            assert!(
                mid.distance(Vec3::new(-1.0, -1.0, 0.0)) < EPS,
                "{:?}: {:?}",
                kind,
                mid
            );
        }
    }

    #[test]
    fn test_too_few_points_rejected() {
        assert_eq!(
            ClosedCurve::new(Vec::new()),
            Err(CurveError::TooFewPoints(0))
        );
        assert_eq!(
            ClosedCurve::new(vec![Vec3::ONE]),
            Err(CurveError::TooFewPoints(1))
        );
        assert!(ClosedCurve::new(vec![Vec3::ZERO, Vec3::X]).is_ok());
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let err = ClosedCurve::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]);
        assert_eq!(err, Err(CurveError::NonFinitePoint(1)));
    }
}
