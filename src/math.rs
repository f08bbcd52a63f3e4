use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;

/// 2D perpendicular (90 degree rotation, clockwise).
#[inline(always)]
pub fn perpendicular(v: Vector) -> Vector {
    Vector::new(v.y, -v.x)
}

/// 2D cross product (z component of the equivalent 3D cross).
#[inline(always)]
pub fn cross(a: Vector, b: Vector) -> Real {
    a.x * b.y - a.y * b.x
}
