pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Unit vector pointing along +y.
pub const UP: Vector2 = Vector2::new(0.0, 1.0);

/// Unit vector pointing along -y.
pub const DOWN: Vector2 = Vector2::new(0.0, -1.0);

/// Unit vector pointing along +x.
pub const RIGHT: Vector2 = Vector2::new(1.0, 0.0);

/// Unit vector pointing along -x.
pub const LEFT: Vector2 = Vector2::new(-1.0, 0.0);

/// 2D cross product `a × b` (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
