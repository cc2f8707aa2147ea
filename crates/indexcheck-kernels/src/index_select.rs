//! Argument validation and output shape inference for `index_select`
//!
//! `index_select(in, dim, index)` gathers the slices of `in` along `dim`
//! named by the 1-D (or scalar) `index`. The output has `in`'s shape with
//! the extent at `dim` replaced by `index.numel()`.
//!
//! A kernel calls [`check_index_select_args`] first, then sizes its output
//! with [`index_select_out_shape`] (or checks a preallocated one with
//! [`check_index_select_out_shape`]) before gathering.
//!
//! # Examples
//!
//! ```
//! use indexcheck_core::Tensor;
//! use indexcheck_kernels::{check_index_select_args, index_select_out_shape};
//!
//! let input = Tensor::zeros::<f32>(&[3, 4]);
//! let index = Tensor::from_vec(vec![2i64, 0, 0], &[3]).unwrap();
//! let out = Tensor::zeros::<f32>(&[3, 4]);
//!
//! check_index_select_args(&input, 0, &index, &out).unwrap();
//! assert_eq!(&index_select_out_shape(&input, 0, &index)[..], &[3, 4]);
//! ```

use indexcheck_core::{
    checked_dim, nonempty_size, nonzero_dim, normalize_dim, rank_at_most, same_dtype, ScalarType,
    Shape, TensorMeta,
};

use crate::error::{KernelResult, Operation, ValidationError};
use crate::log::{ensure_arg, reject};
use crate::scan::check_index_range;

const OP: Operation = Operation::IndexSelect;

/// Largest rank accepted for the `index` tensor.
pub const INDEX_SELECT_MAX_INDEX_RANK: usize = 1;

/// Validate the arguments of `index_select`.
///
/// Checks run cheapest first and stop at the first failure:
///
/// 1. `dim` addresses a dimension of `input` (negative values count from the end)
/// 2. the extent of `input` along `dim` is positive
/// 3. `input` and `out` share a dtype
/// 4. `index` holds `Long` or `Int` elements
/// 5. `index` has rank 0 or 1
/// 6. a non-scalar `index` into a scalar `input` holds exactly one element
/// 7. every element of `index` lies in `[0, extent)`
///
/// A scalar `input` behaves like a rank-1 tensor of extent 1.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first violated rule.
pub fn check_index_select_args<I, X, O>(
    input: &I,
    dim: i64,
    index: &X,
    out: &O,
) -> KernelResult<()>
where
    I: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
    O: TensorMeta + ?Sized,
{
    validate_index_select(input, dim, index, out, true)
}

/// Rules 1-6 always run; rule 7 only when `scan_indices` is set.
pub(crate) fn validate_index_select<I, X, O>(
    input: &I,
    dim: i64,
    index: &X,
    out: &O,
    scan_indices: bool,
) -> KernelResult<()>
where
    I: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
    O: TensorMeta + ?Sized,
{
    let Some(dim) = checked_dim(input, dim) else {
        return reject(ValidationError::dim_out_of_range(
            OP,
            "in",
            dim,
            nonzero_dim(input),
        ));
    };
    let extent = nonempty_size(input, dim);
    ensure_arg!(
        extent > 0,
        ValidationError::EmptyAxis {
            operation: OP,
            dim,
            extent,
        }
    );

    ensure_arg!(
        same_dtype(input, out),
        ValidationError::dtype_mismatch(OP, "in", "out", input.scalar_type(), out.scalar_type())
    );

    let index_type = index.scalar_type();
    ensure_arg!(
        OP.accepts_index_type(index_type),
        ValidationError::unsupported_index_type(OP, index_type)
    );

    ensure_arg!(
        rank_at_most(index, INDEX_SELECT_MAX_INDEX_RANK),
        ValidationError::RankTooLarge {
            operation: OP,
            tensor: "index",
            rank: index.dim(),
            max_rank: INDEX_SELECT_MAX_INDEX_RANK,
        }
    );
    if index.dim() > 0 && input.dim() == 0 {
        ensure_arg!(
            index.numel() == 1,
            ValidationError::ScalarIndexCount {
                operation: OP,
                numel: index.numel(),
            }
        );
    }

    if scan_indices {
        match index_type {
            ScalarType::Long => check_index_range::<i64, _>(OP, index, dim, extent)?,
            _ => check_index_range::<i32, _>(OP, index, dim, extent)?,
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(dim, extent, index_len = index.numel(), "index_select arguments valid");

    Ok(())
}

/// Compute the `index_select` output shape into `out_sizes`.
///
/// `out_sizes` is cleared and then receives one extent per dimension of
/// `input`: `index.numel()` at `dim`, `input`'s own extent elsewhere.
/// Returns the output rank. A scalar `input` yields a rank-0 shape.
///
/// Only call this after [`check_index_select_args`] has accepted the same
/// arguments; `dim` is normalized here but not range-checked.
pub fn get_index_select_out_target_size<I, X>(
    input: &I,
    dim: i64,
    index: &X,
    out_sizes: &mut Shape,
) -> usize
where
    I: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
{
    let dim = normalize_dim(dim, nonzero_dim(input));
    out_sizes.clear();
    out_sizes.extend(input.sizes().iter().enumerate().map(|(i, &size)| {
        if i as i64 == dim {
            index.numel()
        } else {
            size
        }
    }));
    out_sizes.len()
}

/// Owned form of [`get_index_select_out_target_size`].
pub fn index_select_out_shape<I, X>(input: &I, dim: i64, index: &X) -> Shape
where
    I: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
{
    let mut shape = Shape::new();
    get_index_select_out_target_size(input, dim, index, &mut shape);
    shape
}

/// Check that a preallocated `out` has the inferred `index_select` shape.
///
/// Intended for kernels that write into caller-provided storage instead of
/// resizing it. Assumes [`check_index_select_args`] has passed.
///
/// # Errors
///
/// [`ValidationError::OutputShapeMismatch`] if the shapes differ.
pub fn check_index_select_out_shape<I, X, O>(
    input: &I,
    dim: i64,
    index: &X,
    out: &O,
) -> KernelResult<()>
where
    I: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
    O: TensorMeta + ?Sized,
{
    let expected = index_select_out_shape(input, dim, index);
    if out.sizes() != &expected[..] {
        return reject(ValidationError::OutputShapeMismatch {
            operation: OP,
            expected: expected.to_vec(),
            actual: out.sizes().to_vec(),
        });
    }
    Ok(())
}
