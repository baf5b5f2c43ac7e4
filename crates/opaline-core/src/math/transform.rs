// Copyright 2026 the Opaline authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Transform2D` type used for root surface transformations.

use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use std::ops::Mul;

/// Tolerance used by [`Transform2D::is_identity`].
const EPSILON: f32 = 1e-6;

/// A 3x3 row-major matrix representing a 2D affine transformation.
///
/// The presentation layer reports its root transformation with this type.
/// Backends that do not support root transforms always report
/// [`Transform2D::IDENTITY`].
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform2D {
    /// The matrix elements in row-major order.
    pub m: [f32; 9],
}

impl Transform2D {
    /// The identity transformation.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Creates a transformation from row-major elements.
    #[inline]
    pub const fn from_rows(m: [f32; 9]) -> Self {
        Self { m }
    }

    /// Creates a uniform or non-uniform scaling transformation.
    #[inline]
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Creates a translation transformation.
    #[inline]
    pub fn from_translation(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0],
        }
    }

    /// Returns `true` if this transformation is the identity, within a small
    /// absolute tolerance.
    pub fn is_identity(&self) -> bool {
        self.abs_diff_eq(&Self::IDENTITY, EPSILON)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut m = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += self.m[row * 3 + k] * rhs.m[k * 3 + col];
                }
                m[row * 3 + col] = acc;
            }
        }
        Self { m }
    }
}

impl AbsDiffEq for Transform2D {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_is_identity() {
        assert!(Transform2D::IDENTITY.is_identity());
        assert!(Transform2D::default().is_identity());
        assert!(!Transform2D::from_scale(2.0, 1.0).is_identity());
        assert!(!Transform2D::from_translation(0.0, 0.5).is_identity());
    }

    #[test]
    fn multiplying_by_identity_is_a_no_op() {
        let t = Transform2D::from_translation(4.0, -2.0) * Transform2D::from_scale(3.0, 0.5);
        assert_abs_diff_eq!(t * Transform2D::IDENTITY, t, epsilon = 1e-6);
        assert_abs_diff_eq!(Transform2D::IDENTITY * t, t, epsilon = 1e-6);
    }

    #[test]
    fn translation_composes_additively() {
        let a = Transform2D::from_translation(1.0, 2.0);
        let b = Transform2D::from_translation(3.0, 4.0);
        assert_abs_diff_eq!(a * b, Transform2D::from_translation(4.0, 6.0), epsilon = 1e-6);
    }
}
