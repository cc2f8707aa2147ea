//! Element-range scan over index tensors
//!
//! Index values are data, so the `[0, extent)` bound can only be checked by
//! reading every element. The scan is generic over the index element width
//! and is instantiated once per accepted index dtype, so no per-element
//! conversion through a dynamic type happens.

use indexcheck_core::{Axis, Scalar, TensorMeta};
use std::fmt;

use crate::error::{KernelResult, Operation, ValidationError};
use crate::log::{ensure_arg, reject};

/// Signed integer element type accepted for index tensors.
pub trait IndexScalar: Scalar + Copy + fmt::Display + Into<i64> {}

impl IndexScalar for i32 {}
impl IndexScalar for i64 {}

/// Check that every element of `index` lies in `[0, extent)`.
///
/// `dim` is the normalized target dimension and only appears in the
/// diagnostic. Elements are visited in logical (row-major) order and the
/// first offending one is reported with its position and value.
///
/// # Errors
///
/// - [`ValidationError::UnreadableIndex`] if `index` does not hold `S` elements
/// - [`ValidationError::IndexOutOfRange`] for the first element out of range
///
/// # Complexity
///
/// Time: O(index.numel())
/// Space: O(1)
///
/// # Examples
///
/// ```
/// use indexcheck_core::Tensor;
/// use indexcheck_kernels::{check_index_range, ErrorKind, Operation};
///
/// let index = Tensor::from_vec(vec![2i64, 0, 3], &[3]).unwrap();
/// let err = check_index_range::<i64, _>(Operation::IndexSelect, &index, 0, 3).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
/// assert!(err.to_string().contains("index[2] = 3"));
/// ```
pub fn check_index_range<S, T>(
    operation: Operation,
    index: &T,
    dim: Axis,
    extent: usize,
) -> KernelResult<()>
where
    S: IndexScalar,
    T: TensorMeta + ?Sized,
{
    let elements = match index.elements::<S>() {
        Some(elements) => elements,
        None => {
            return reject(ValidationError::UnreadableIndex {
                operation,
                scalar_type: S::SCALAR_TYPE,
            })
        }
    };

    let bound = i64::try_from(extent).unwrap_or(i64::MAX);
    for (position, &value) in elements.iter().enumerate() {
        let value: i64 = value.into();
        ensure_arg!(
            value >= 0 && value < bound,
            ValidationError::index_out_of_range(operation, position, value, dim, extent)
        );
    }

    Ok(())
}
