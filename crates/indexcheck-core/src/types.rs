//! Core type definitions shared by the index operator validators.
//!
//! This module defines:
//!
//! - Type aliases for tensor dimensions ([`Axis`], [`Rank`], [`Shape`])
//! - The runtime element type tag ([`ScalarType`])
//! - The [`Scalar`] trait linking Rust element types to their tag and storage
//!
//! # Examples
//!
//! ```
//! use indexcheck_core::{Scalar, ScalarType};
//!
//! assert_eq!(<i64 as Scalar>::SCALAR_TYPE, ScalarType::Long);
//! assert_eq!(ScalarType::Int.to_string(), "Int");
//! ```

use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn};
use smallvec::SmallVec;
use std::fmt;

use crate::tensor::TensorData;

/// Type alias for a normalized (non-negative) tensor axis index.
pub type Axis = usize;

/// Type alias for tensor rank (number of dimensions).
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Inline storage covers tensors with up to 6 dimensions.
///
/// # Examples
///
/// ```
/// use indexcheck_core::Shape;
///
/// let shape: Shape = Shape::from_slice(&[3, 4]);
/// assert_eq!(&shape[..], &[3, 4]);
/// ```
pub type Shape = SmallVec<[usize; 6]>;

/// Element type of a tensor.
///
/// The names follow the operator runtime (`Long` is a 64-bit signed integer,
/// `Int` a 32-bit one) so diagnostics read the same as the kernels' own logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// 8-bit unsigned integer, `u8`
    Byte,
    /// 8-bit signed integer, `i8`
    Char,
    /// 16-bit signed integer, `i16`
    Short,
    /// 32-bit signed integer, `i32`
    Int,
    /// 64-bit signed integer, `i64`
    Long,
    /// 32-bit floating point, `f32`
    Float,
    /// 64-bit floating point, `f64`
    Double,
    /// Boolean, `bool`
    Bool,
}

impl ScalarType {
    /// Runtime name of this element type.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Byte => "Byte",
            ScalarType::Char => "Char",
            ScalarType::Short => "Short",
            ScalarType::Int => "Int",
            ScalarType::Long => "Long",
            ScalarType::Float => "Float",
            ScalarType::Double => "Double",
            ScalarType::Bool => "Bool",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Rust type that can be stored as the elements of a [`Tensor`](crate::Tensor).
///
/// Implemented for `u8`, `i8`, `i16`, `i32`, `i64`, `f32`, `f64` and `bool`.
pub trait Scalar: Clone + Default + fmt::Debug + Sized + 'static {
    /// The [`ScalarType`] tag of the implementing type.
    const SCALAR_TYPE: ScalarType;

    #[doc(hidden)]
    fn into_data(array: Array<Self, IxDyn>) -> TensorData;

    #[doc(hidden)]
    fn view_data(data: &TensorData) -> Option<ArrayView<'_, Self, IxDyn>>;
}

macro_rules! impl_scalar {
    ($rust_type:ty, $variant:ident) => {
        impl Scalar for $rust_type {
            const SCALAR_TYPE: ScalarType = ScalarType::$variant;

            fn into_data(array: Array<Self, IxDyn>) -> TensorData {
                TensorData::$variant(array)
            }

            fn view_data(data: &TensorData) -> Option<ArrayView<'_, Self, IxDyn>> {
                match data {
                    TensorData::$variant(array) => Some(array.view()),
                    _ => None,
                }
            }
        }
    };
}

impl_scalar!(u8, Byte);
impl_scalar!(i8, Char);
impl_scalar!(i16, Short);
impl_scalar!(i32, Int);
impl_scalar!(i64, Long);
impl_scalar!(f32, Float);
impl_scalar!(f64, Double);
impl_scalar!(bool, Bool);
