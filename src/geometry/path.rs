//! Approximation of slider paths into polylines.
//!
//! The approximations follow the way the game draws sliders: Bézier pieces are flattened by
//! recursive subdivision, circular arcs are sampled by angle and Catmull-Rom splines by a fixed
//! step count.

use std::f64::consts::TAU;

use itertools::Itertools;

use super::{CurveKind, Vector2};

type Point = Vector2<f64>;

/// Maximum deviation allowed when a Bézier piece is treated as flat.
const BEZIER_TOLERANCE: f64 = 0.25;
/// Maximum deviation of an arc segment from the true circle.
const CIRCLE_TOLERANCE: f64 = 0.1;
/// Below this, the three points of a perfect circle are treated as collinear.
const COLLINEAR_EPSILON: f64 = 1e-3;
/// Samples per segment of a Catmull-Rom spline.
const CATMULL_DETAIL: usize = 50;
/// Upper bound of the samples of one circular arc.
const MAX_ARC_SAMPLES: usize = 1000;

/// Approximates the path through `points` as a polyline.
///
/// Two control points always make a straight line. A [`CurveKind::PerfectCircle`] needs exactly
/// three non-collinear points, otherwise it is drawn as a Bézier curve, or as a line when the
/// three points are collinear.
///
/// With `length`, the polyline is cut at that length along the path, or its last segment is
/// extended up to that length if the path is shorter.
#[must_use]
pub fn approximate(kind: CurveKind, points: &[Point], length: Option<f64>) -> Vec<Point> {
    let path = match (kind, points) {
        (_, []) => return Vec::new(),
        (_, [single]) => return vec![*single],
        (_, [_, _]) | (CurveKind::Linear, _) => points.to_vec(),
        (CurveKind::PerfectCircle, &[a, b, c]) => {
            perfect_circle(a, b, c).unwrap_or_else(|| points.to_vec())
        }
        (CurveKind::PerfectCircle | CurveKind::Bezier, _) => bezier(points),
        (CurveKind::Catmull, _) => catmull(points),
    };
    match length {
        Some(length) if length.is_finite() && length > 0.0 => clip(path, length),
        _ => path,
    }
}

/// Sum of the segment lengths of the polyline.
#[must_use]
pub fn path_length(path: &[Point]) -> f64 {
    path.iter()
        .tuple_windows()
        .map(|(from, to)| from.distance(*to))
        .sum()
}

fn clip(path: Vec<Point>, length: f64) -> Vec<Point> {
    let mut points = path.iter().copied();
    let Some(first) = points.next() else {
        return path;
    };
    let mut clipped = vec![first];
    let mut travelled = 0.0;
    let mut last = first;
    for point in points {
        let segment = last.distance(point);
        if travelled + segment >= length {
            clipped.push(last.lerp(point, (length - travelled) / segment));
            return clipped;
        }
        travelled += segment;
        clipped.push(point);
        last = point;
    }
    if let [.., before, end] = clipped.as_mut_slice() {
        if let Some(direction) = (*end - *before).normalize() {
            *end = *end + direction.scale(length - travelled);
        }
    }
    clipped
}

fn perfect_circle(a: Point, b: Point, c: Point) -> Option<Vec<Point>> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < COLLINEAR_EPSILON {
        return None;
    }
    let (a_sq, b_sq, c_sq) = (a.dot(a), b.dot(b), c.dot(c));
    let centre = Vector2::new(
        (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
        (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
    );
    let radius = a.distance(centre);
    let angle = |p: Point| (p.y - centre.y).atan2(p.x - centre.x);

    let start = angle(a);
    let mut end = angle(c);
    while end < start {
        end += TAU;
    }
    let mut range = end - start;
    let mut direction = 1.0;
    // b on the other side of a->c means the arc goes the long way round.
    let ortho = Vector2::new(c.y - a.y, a.x - c.x);
    if ortho.dot(b - a) < 0.0 {
        direction = -1.0;
        range = TAU - range;
    }

    let steps = if 2.0 * radius <= CIRCLE_TOLERANCE {
        2
    } else {
        let step_angle = 2.0 * (1.0 - CIRCLE_TOLERANCE / radius).acos();
        // A radius this large is indistinguishable from a straight line.
        if !step_angle.is_finite() || step_angle <= 0.0 {
            return None;
        }
        ((range / step_angle).ceil() as usize).clamp(2, MAX_ARC_SAMPLES)
    };
    let last_step = (steps - 1) as f64;
    Some(
        (0..steps)
            .map(|step| {
                let theta = start + direction * range * step as f64 / last_step;
                centre + Vector2::new(theta.cos(), theta.sin()).scale(radius)
            })
            .collect(),
    )
}

/// Splits at red anchors (a point repeated consecutively) and flattens every piece.
fn bezier(points: &[Point]) -> Vec<Point> {
    let mut path = Vec::new();
    let mut piece = Vec::new();
    for &point in points {
        if piece.last() == Some(&point) {
            flatten_bezier(&piece, &mut path);
            piece.clear();
        }
        piece.push(point);
    }
    flatten_bezier(&piece, &mut path);
    path
}

fn flatten_bezier(piece: &[Point], path: &mut Vec<Point>) {
    let Some(&last) = piece.last() else {
        return;
    };
    let mut output = Vec::new();
    let mut to_flatten = vec![piece.to_vec()];
    while let Some(curve) = to_flatten.pop() {
        let (left, right) = subdivide(&curve);
        if is_flat_enough(&curve) {
            output.push(curve.first().copied().unwrap_or(last));
            // Weighted average over the joined halves smooths the flat piece.
            output.extend(
                left.iter()
                    .chain(right.iter().skip(1))
                    .tuple_windows()
                    .skip(1)
                    .step_by(2)
                    .map(|(prev, mid, next)| (*prev + mid.scale(2.0) + *next).scale(0.25)),
            );
            continue;
        }
        to_flatten.push(right);
        to_flatten.push(left);
    }
    output.push(last);

    for point in output {
        if path.last() != Some(&point) {
            path.push(point);
        }
    }
}

fn is_flat_enough(curve: &[Point]) -> bool {
    curve.iter().tuple_windows().all(|(prev, mid, next)| {
        let deviation = *prev - mid.scale(2.0) + *next;
        deviation.dot(deviation) <= BEZIER_TOLERANCE * BEZIER_TOLERANCE * 4.0
    })
}

/// de Casteljau subdivision at `t = 0.5`.
fn subdivide(curve: &[Point]) -> (Vec<Point>, Vec<Point>) {
    let mut left = Vec::with_capacity(curve.len());
    let mut right = Vec::with_capacity(curve.len());
    let mut level = curve.to_vec();
    while let (Some(&first), Some(&last)) = (level.first(), level.last()) {
        left.push(first);
        right.push(last);
        level = level
            .iter()
            .tuple_windows()
            .map(|(from, to)| from.lerp(*to, 0.5))
            .collect();
    }
    right.reverse();
    (left, right)
}

fn catmull(points: &[Point]) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let before_last = points
        .len()
        .checked_sub(2)
        .and_then(|index| points.get(index))
        .copied()
        .unwrap_or(last);
    // Pad both ends so that every segment has its four neighbours.
    let padded = std::iter::once(first)
        .chain(points.iter().copied())
        .chain(std::iter::once(last + (last - before_last)))
        .collect::<Vec<_>>();

    let mut path = Vec::with_capacity(padded.len() * CATMULL_DETAIL);
    for (v1, v2, v3, v4) in padded.into_iter().tuple_windows() {
        path.extend((0..CATMULL_DETAIL).map(|step| {
            catmull_point(v1, v2, v3, v4, step as f64 / CATMULL_DETAIL as f64)
        }));
    }
    path.push(last);
    path
}

fn catmull_point(v1: Point, v2: Point, v3: Point, v4: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let component = |p1: f64, p2: f64, p3: f64, p4: f64| {
        0.5 * (2.0 * p2
            + (-p1 + p3) * t
            + (2.0 * p1 - 5.0 * p2 + 4.0 * p3 - p4) * t2
            + (-p1 + 3.0 * p2 - 3.0 * p3 + p4) * t3)
    };
    Vector2::new(
        component(v1.x, v2.x, v3.x, v4.x),
        component(v1.y, v2.y, v3.y, v4.y),
    )
}
