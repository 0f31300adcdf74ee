//! Control-point curves of sliders.

use std::str::FromStr;

use thiserror::Error;

use super::{Vector2, path};

/// The shape a slider's control points describe, written as a letter before the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveKind {
    /// `L`: straight segments.
    Linear,
    /// `B`: Bézier curves, split where a control point repeats.
    Bezier,
    /// `C`: centripetal Catmull-Rom spline. Legacy.
    Catmull,
    /// `P`: arc of the circle through three points.
    PerfectCircle,
}

impl CurveKind {
    /// The letter of the kind in the format.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Linear => 'L',
            Self::Bezier => 'B',
            Self::Catmull => 'C',
            Self::PerfectCircle => 'P',
        }
    }
}

impl TryFrom<char> for CurveKind {
    type Error = char;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            'L' => Self::Linear,
            'B' => Self::Bezier,
            'C' => Self::Catmull,
            'P' => Self::PerfectCircle,
            other => return Err(other),
        })
    }
}

impl FromStr for CurveKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::try_from(letter).map_err(|_| s.to_owned()),
            _ => Err(s.to_owned()),
        }
    }
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A curve was requested without any control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("a curve needs at least one control point")]
pub struct EmptyCurveError;

/// An ordered, non-empty sequence of control points defining a path.
///
/// A curve with a single point degenerates to that point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve<T = i32> {
    points: Vec<Vector2<T>>,
}

impl<T> Curve<T> {
    /// Creates a curve from its control points in order.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCurveError`] if `points` is empty.
    pub fn new(points: Vec<Vector2<T>>) -> Result<Self, EmptyCurveError> {
        if points.is_empty() {
            return Err(EmptyCurveError);
        }
        Ok(Self { points })
    }

    /// The control points in declaration order.
    #[must_use]
    pub fn points(&self) -> &[Vector2<T>] {
        &self.points
    }

    /// The number of control points, at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`, curves are never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether the curve is a single point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() == 1
    }

    /// The first control point.
    #[must_use]
    pub fn first(&self) -> &Vector2<T> {
        self.points
            .first()
            .expect("curve has at least one control point")
    }

    /// The last control point.
    #[must_use]
    pub fn last(&self) -> &Vector2<T> {
        self.points
            .last()
            .expect("curve has at least one control point")
    }
}

impl Curve<i32> {
    /// Approximates the path the curve describes as a polyline.
    ///
    /// If `length` is given, the path is cut at that length, or its last segment is extended to
    /// reach it. See [`path::approximate`].
    #[must_use]
    pub fn approximate(&self, kind: CurveKind, length: Option<f64>) -> Vec<Vector2<f64>> {
        let points = self
            .points
            .iter()
            .copied()
            .map(Vector2::to_f64)
            .collect::<Vec<_>>();
        path::approximate(kind, &points, length)
    }
}
