use super::constants::HYPERBOLIC_SCALE;
use super::types::Point;

pub fn length(point: Point) -> f64 {
  (point.x * point.x + point.y * point.y + point.z * point.z).sqrt()
}

pub fn normalize(point: Point) -> Point {
  let len = length(point);
  if !len.is_finite() || len == 0.0 {
    return Point::ORIGIN;
  }
  Point {
    x: point.x / len,
    y: point.y / len,
    z: point.z / len,
  }
}

pub fn dot(a: Point, b: Point) -> f64 {
  a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross(a: Point, b: Point) -> Point {
  Point {
    x: a.y * b.z - a.z * b.y,
    y: a.z * b.x - a.x * b.z,
    z: a.x * b.y - a.y * b.x,
  }
}

pub fn add(a: Point, b: Point) -> Point {
  Point {
    x: a.x + b.x,
    y: a.y + b.y,
    z: a.z + b.z,
  }
}

pub fn sub(a: Point, b: Point) -> Point {
  Point {
    x: a.x - b.x,
    y: a.y - b.y,
    z: a.z - b.z,
  }
}

pub fn scale(point: Point, factor: f64) -> Point {
  Point {
    x: point.x * factor,
    y: point.y * factor,
    z: point.z * factor,
  }
}

pub fn distance(a: Point, b: Point) -> f64 {
  length(sub(a, b))
}

/// Rotation about the vertical (y) axis.
pub fn rotate_y(point: &mut Point, angle: f64) {
  let cos_a = angle.cos();
  let sin_a = angle.sin();
  let x = point.x;
  let z = point.z;
  point.x = cos_a * x + sin_a * z;
  point.z = -sin_a * x + cos_a * z;
}

/// Radial `tanh` squash: distances near the origin are nearly Euclidean, far ones
/// compress toward `HYPERBOLIC_SCALE`.
pub fn hyperbolic_transform(point: Point) -> Point {
  let r = length(point);
  if !r.is_finite() || r == 0.0 {
    return Point::ORIGIN;
  }
  let squashed = HYPERBOLIC_SCALE * (r / HYPERBOLIC_SCALE).tanh();
  scale(point, squashed / r)
}

/// Distance after transforming `b` into the frame centred on `a`. The result depends only
/// on the separation, so contact behaves the same anywhere in unbounded space.
pub fn transformed_distance(a: Point, b: Point) -> f64 {
  length(hyperbolic_transform(sub(b, a)))
}
