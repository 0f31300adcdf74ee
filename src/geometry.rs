//! Geometry of the playfield: 2D vectors and control-point curves used by sliders.
//!
//! Positions in the format are integer osu!pixels, so [`Vector2`] defaults to `i32`. Curve
//! approximation works on `f64` vectors converted from them.

pub mod curve;
pub mod path;

use std::ops::{Add, Mul, Sub};

use num::{Num, Zero};
use thiserror::Error;

pub use self::curve::{Curve, CurveKind, EmptyCurveError};

/// A component of a [`Vector2`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The horizontal component.
    X,
    /// The vertical component.
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// An error occurred on vector arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// A component of the divisor was zero.
    #[error("division by zero on the {0} component")]
    DivisionByZero(Axis),
}

/// An ordered pair `(x, y)` of coordinates. Equality is component-wise.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2<T = i32> {
    /// Horizontal component.
    pub x: T,
    /// Vertical component.
    pub y: T,
}

impl<T> Vector2<T> {
    /// Creates a new vector.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Num + Copy> Vector2<T> {
    /// The origin `(0, 0)`.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Multiplies both components by `factor`.
    #[must_use]
    pub fn scale(self, factor: T) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Divides component-wise.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if a component of `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> Result<Self, ArithmeticError> {
        if rhs.x.is_zero() {
            return Err(ArithmeticError::DivisionByZero(Axis::X));
        }
        if rhs.y.is_zero() {
            return Err(ArithmeticError::DivisionByZero(Axis::Y));
        }
        Ok(Self::new(self.x / rhs.x, self.y / rhs.y))
    }
}

impl<T: Num + Copy> Add for Vector2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Num + Copy> Sub for Vector2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Component-wise multiplication.
impl<T: Num + Copy> Mul for Vector2<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// Scalar multiplication.
impl<T: Num + Copy> Mul<T> for Vector2<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self::Output {
        self.scale(rhs)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T> From<(T, T)> for Vector2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Into<f64>> Vector2<T> {
    /// Converts the components into `f64` losslessly.
    pub fn to_f64(self) -> Vector2<f64> {
        Vector2::new(self.x.into(), self.y.into())
    }
}

impl Vector2<f64> {
    /// Euclidean length of the vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// The unit vector of the same direction, or `None` for the zero vector.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let length = self.length();
        (!length.is_zero()).then(|| self.scale(length.recip()))
    }

    /// Linear interpolation, `t = 0` is `self` and `t = 1` is `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self).scale(t)
    }
}
