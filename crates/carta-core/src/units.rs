//! Compile-time unit safety for geographic quantities.
//!
//! Prevents mixing incompatible units like square meters of land area and
//! meters of boundary length.
//!
//! # Design Philosophy
//!
//! Partition optimization juggles several physical quantities:
//! - Land area per unit (square meters)
//! - Shared boundary length per adjacency (meters)
//!
//! Using raw `f64` values throughout makes it easy to accidentally feed a
//! boundary length where an area is expected. This module provides newtype
//! wrappers that catch such errors at compile time.
//!
//! # Zero Runtime Overhead
//!
//! All types use `#[repr(transparent)]` ensuring they have the same memory
//! layout as `f64`. The compiler optimizes away all wrapper overhead.
//!
//! # Usage
//!
//! ```
//! use carta_core::units::{Meters, SquareMeters};
//!
//! let a = SquareMeters(1_500_000.0);
//! let b = SquareMeters(2_000_000.0);
//!
//! // This compiles - same units
//! let total = a + b;
//! assert!(total.value() > 3_000_000.0);
//!
//! // This would NOT compile - different units
//! // let wrong = a + Meters(10.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        // Dividing two quantities of the same unit yields a dimensionless ratio
        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Construct from a raw `f64` value.
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Extract the raw `f64` value.
            #[inline]
            pub const fn value(&self) -> f64 {
                self.0
            }
        }
    };
}

/// Land area in square meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct SquareMeters(pub f64);
impl_unit_ops!(SquareMeters, "m²");

/// Boundary length in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(pub f64);
impl_unit_ops!(Meters, "m");
