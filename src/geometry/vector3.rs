// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Three-component vector used for both positions and directions
//!
//! Every operation comes in up to three forms:
//! - a pure method returning a fresh value (`cross`, `normalize`, `lerp`, ...),
//! - an in-place `_mut` mutator returning `&mut Self` for chaining,
//! - an `_to` variant writing into a caller-supplied output slot.

use crate::utils::math;
use nalgebra::{Point3, Vector3 as NVector3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

/// A 3-D vector with `f64` components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const X_AXIS: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const Y_AXIS: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const Z_AXIS: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Read the `index`-th vertex out of a flat `[x0, y0, z0, x1, ...]` buffer.
    ///
    /// Panics if the buffer does not hold that vertex.
    pub fn from_slice(flat: &[f64], index: usize) -> Self {
        let offset = index * 3;
        Self::new(flat[offset], flat[offset + 1], flat[offset + 2])
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn dot(&self, v: &Vector3) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance_squared(&self, v: &Vector3) -> f64 {
        (*self - *v).length_squared()
    }

    pub fn distance(&self, v: &Vector3) -> f64 {
        self.distance_squared(v).sqrt()
    }

    /// Angle between two vectors in radians. Zero when either is zero-length.
    pub fn angle_to(&self, v: &Vector3) -> f64 {
        let denom = self.length() * v.length();
        if denom == 0.0 {
            return 0.0;
        }
        math::clamp(self.dot(v) / denom, -1.0, 1.0).acos()
    }

    /// Componentwise equality within `precision`
    pub fn equals(&self, v: &Vector3, precision: f64) -> bool {
        math::approx_eq(self.x, v.x, precision)
            && math::approx_eq(self.y, v.y, precision)
            && math::approx_eq(self.z, v.z, precision)
    }

    pub fn is_zero(&self, precision: f64) -> bool {
        self.equals(&Vector3::zero(), precision)
    }

    /// True for parallel *and* antiparallel directions; test the sign of
    /// `dot` separately when orientation matters.
    pub fn is_parallel(&self, v: &Vector3, precision: f64) -> bool {
        let d = self.unit().dot(&v.unit());
        (d.abs() - 1.0).abs() < precision
    }

    // Pure forms

    pub fn cross(&self, v: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    /// Rescale to `length`; a zero vector is returned unchanged.
    pub fn normalize(&self, length: f64) -> Vector3 {
        let mut out = *self;
        out.normalize_mut(length);
        out
    }

    /// Unit-length copy (zero stays zero)
    pub fn unit(&self) -> Vector3 {
        self.normalize(1.0)
    }

    pub fn multiply(&self, v: &Vector3) -> Vector3 {
        Vector3::new(self.x * v.x, self.y * v.y, self.z * v.z)
    }

    pub fn divide(&self, v: &Vector3) -> Vector3 {
        Vector3::new(self.x / v.x, self.y / v.y, self.z / v.z)
    }

    pub fn inverse(&self) -> Vector3 {
        Vector3::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }

    pub fn lerp(&self, v: &Vector3, alpha: f64) -> Vector3 {
        Vector3::new(
            math::lerp(self.x, v.x, alpha),
            math::lerp(self.y, v.y, alpha),
            math::lerp(self.z, v.z, alpha),
        )
    }

    pub fn min(&self, v: &Vector3) -> Vector3 {
        Vector3::new(self.x.min(v.x), self.y.min(v.y), self.z.min(v.z))
    }

    pub fn max(&self, v: &Vector3) -> Vector3 {
        Vector3::new(self.x.max(v.x), self.y.max(v.y), self.z.max(v.z))
    }

    pub fn clamp(&self, min: &Vector3, max: &Vector3) -> Vector3 {
        self.max(min).min(max)
    }

    pub fn abs(&self) -> Vector3 {
        Vector3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    pub fn floor(&self) -> Vector3 {
        Vector3::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    pub fn ceil(&self) -> Vector3 {
        Vector3::new(self.x.ceil(), self.y.ceil(), self.z.ceil())
    }

    pub fn round(&self) -> Vector3 {
        Vector3::new(self.x.round(), self.y.round(), self.z.round())
    }

    // In-place forms

    pub fn add_mut(&mut self, v: &Vector3) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
        self
    }

    pub fn sub_mut(&mut self, v: &Vector3) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
        self
    }

    pub fn add_scalar_mut(&mut self, s: f64) -> &mut Self {
        self.x += s;
        self.y += s;
        self.z += s;
        self
    }

    pub fn sub_scalar_mut(&mut self, s: f64) -> &mut Self {
        self.add_scalar_mut(-s)
    }

    pub fn scale_mut(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self.z *= s;
        self
    }

    pub fn multiply_mut(&mut self, v: &Vector3) -> &mut Self {
        *self = self.multiply(v);
        self
    }

    pub fn divide_mut(&mut self, v: &Vector3) -> &mut Self {
        *self = self.divide(v);
        self
    }

    pub fn inverse_mut(&mut self) -> &mut Self {
        *self = self.inverse();
        self
    }

    pub fn negate_mut(&mut self) -> &mut Self {
        self.scale_mut(-1.0)
    }

    pub fn cross_mut(&mut self, v: &Vector3) -> &mut Self {
        *self = self.cross(v);
        self
    }

    pub fn normalize_mut(&mut self, length: f64) -> &mut Self {
        let l = self.length();
        if l > 0.0 {
            self.scale_mut(length / l);
        }
        self
    }

    pub fn lerp_mut(&mut self, v: &Vector3, alpha: f64) -> &mut Self {
        *self = self.lerp(v, alpha);
        self
    }

    pub fn min_mut(&mut self, v: &Vector3) -> &mut Self {
        *self = self.min(v);
        self
    }

    pub fn max_mut(&mut self, v: &Vector3) -> &mut Self {
        *self = self.max(v);
        self
    }

    pub fn clamp_mut(&mut self, min: &Vector3, max: &Vector3) -> &mut Self {
        *self = self.clamp(min, max);
        self
    }

    pub fn abs_mut(&mut self) -> &mut Self {
        *self = self.abs();
        self
    }

    pub fn floor_mut(&mut self) -> &mut Self {
        *self = self.floor();
        self
    }

    pub fn ceil_mut(&mut self) -> &mut Self {
        *self = self.ceil();
        self
    }

    pub fn round_mut(&mut self) -> &mut Self {
        *self = self.round();
        self
    }

    // Output-slot forms

    pub fn add_to<'a>(&self, v: &Vector3, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = *self + *v;
        out
    }

    pub fn sub_to<'a>(&self, v: &Vector3, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = *self - *v;
        out
    }

    pub fn scale_to<'a>(&self, s: f64, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = *self * s;
        out
    }

    pub fn multiply_to<'a>(&self, v: &Vector3, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = self.multiply(v);
        out
    }

    pub fn divide_to<'a>(&self, v: &Vector3, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = self.divide(v);
        out
    }

    pub fn negate_to<'a>(&self, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = -*self;
        out
    }

    pub fn cross_to<'a>(&self, v: &Vector3, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = self.cross(v);
        out
    }

    pub fn normalize_to<'a>(&self, length: f64, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = self.normalize(length);
        out
    }

    pub fn lerp_to<'a>(&self, v: &Vector3, alpha: f64, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = self.lerp(v, alpha);
        out
    }

    pub fn clamp_to<'a>(
        &self,
        min: &Vector3,
        max: &Vector3,
        out: &'a mut Vector3,
    ) -> &'a mut Vector3 {
        *out = self.clamp(min, max);
        out
    }

    pub fn min_to<'a>(&self, v: &Vector3, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = self.min(v);
        out
    }

    pub fn max_to<'a>(&self, v: &Vector3, out: &'a mut Vector3) -> &'a mut Vector3 {
        *out = self.max(v);
        out
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.add_mut(&rhs);
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.sub_mut(&rhs);
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, s: f64) -> Vector3 {
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, s: f64) -> Vector3 {
        Vector3::new(self.x / s, self.y / s, self.z / s)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of range: {}", index),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index out of range: {}", index),
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(values: [f64; 3]) -> Self {
        Self::from_array(values)
    }
}

impl From<NVector3<f64>> for Vector3 {
    fn from(v: NVector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for NVector3<f64> {
    fn from(v: Vector3) -> Self {
        NVector3::new(v.x, v.y, v.z)
    }
}

impl From<Point3<f64>> for Vector3 {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3> for Point3<f64> {
    fn from(v: Vector3) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DEFAULT_PRECISION;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross_and_dot() {
        let z = Vector3::X_AXIS.cross(&Vector3::Y_AXIS);
        assert_eq!(z, Vector3::Z_AXIS);
        assert_eq!(z.dot(&Vector3::X_AXIS), 0.0);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vector3::zero();
        v.normalize_mut(1.0);
        assert_eq!(v, Vector3::zero());
        assert_eq!(Vector3::zero().unit(), Vector3::zero());
    }

    #[test]
    fn test_normalize_to_length() {
        let v = Vector3::new(3.0, 4.0, 0.0).normalize(10.0);
        assert_relative_eq!(v.length(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(v.x, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mutating_and_output_forms_agree() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-4.0, 0.5, 2.0);

        let mut out = Vector3::zero();
        a.cross_to(&b, &mut out);

        let mut in_place = a;
        in_place.cross_mut(&b);

        assert_eq!(out, a.cross(&b));
        assert_eq!(in_place, out);
        // receiver untouched by the `_to` form
        assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_chained_mutation() {
        let mut v = Vector3::new(1.0, 1.0, 1.0);
        v.add_mut(&Vector3::new(1.0, 0.0, 0.0))
            .scale_mut(2.0)
            .sub_scalar_mut(1.0);
        assert_eq!(v, Vector3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn test_is_parallel_ignores_sign() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert!(a.is_parallel(&(a * 5.0), DEFAULT_PRECISION));
        assert!(a.is_parallel(&(-a), DEFAULT_PRECISION));
        assert!(!a.is_parallel(&Vector3::X_AXIS, DEFAULT_PRECISION));
    }

    #[test]
    fn test_lerp_clamp_min_max() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(2.0, 4.0, -2.0);
        assert_eq!(a.lerp(&b, 0.5), Vector3::new(1.0, 2.0, -1.0));

        let c = Vector3::new(5.0, -5.0, 0.5).clamp(&Vector3::zero(), &Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(c, Vector3::new(1.0, 0.0, 0.5));

        assert_eq!(a.min(&b), Vector3::new(0.0, 0.0, -2.0));
        assert_eq!(a.max(&b), Vector3::new(2.0, 4.0, 0.0));
    }

    #[test]
    fn test_equals_with_tolerance() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        assert!(a.equals(&Vector3::new(1.0 + 1e-8, 1.0, 1.0), DEFAULT_PRECISION));
        assert!(!a.equals(&Vector3::new(1.001, 1.0, 1.0), DEFAULT_PRECISION));
    }

    #[test]
    fn test_angle_to() {
        let angle = Vector3::X_AXIS.angle_to(&Vector3::Y_AXIS);
        assert_relative_eq!(angle, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_nalgebra_interop() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let n: NVector3<f64> = v.into();
        let p: Point3<f64> = v.into();
        assert_eq!(Vector3::from(n), v);
        assert_eq!(Vector3::from(p), v);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let v = Vector3::zero();
        let _ = v[3];
    }
}
