//! Dimension normalization and shape predicates
//!
//! Operators accept signed dimension references in `[-rank, rank)`. These
//! helpers hold the one definition of how such a reference is range-checked
//! and normalized, including the runtime's convention that a scalar behaves
//! like a rank-1 tensor of extent 1.
//!
//! # Examples
//!
//! ```
//! use indexcheck_core::{checked_dim, normalize_dim, Tensor};
//!
//! let t = Tensor::zeros::<f32>(&[3, 4]);
//! assert_eq!(checked_dim(&t, -1), Some(1));
//! assert_eq!(checked_dim(&t, 2), None);
//! assert_eq!(normalize_dim(-2, 2), 0);
//! ```

use crate::tensor::TensorMeta;
use crate::types::{Axis, Rank};

/// Rank of `t`, counting a scalar as rank 1.
pub fn nonzero_dim<T: TensorMeta + ?Sized>(t: &T) -> Rank {
    t.dim().max(1)
}

/// Extent of `t` along `axis`, counting a scalar as extent 1.
///
/// # Panics
///
/// Panics if `t` is not a scalar and `axis >= t.dim()`.
pub fn nonempty_size<T: TensorMeta + ?Sized>(t: &T, axis: Axis) -> usize {
    if t.dim() == 0 {
        1
    } else {
        t.size(axis)
    }
}

/// Whether `dim` addresses an existing dimension of `t`.
///
/// Valid values lie in `[-nonzero_dim(t), nonzero_dim(t))`, so a scalar
/// accepts `0` and `-1`.
pub fn tensor_has_dim<T: TensorMeta + ?Sized>(t: &T, dim: i64) -> bool {
    let rank = nonzero_dim(t) as i64;
    dim >= -rank && dim < rank
}

/// Map a possibly negative dimension to its non-negative equivalent.
///
/// Non-negative input is returned unchanged. No range check is performed;
/// use [`checked_dim`] when `dim` has not been validated yet.
pub fn normalize_dim(dim: i64, rank: Rank) -> i64 {
    if dim < 0 {
        dim + rank as i64
    } else {
        dim
    }
}

/// Range-check `dim` against `t` and normalize it.
///
/// Returns `None` when `dim` does not address a dimension of `t`.
pub fn checked_dim<T: TensorMeta + ?Sized>(t: &T, dim: i64) -> Option<Axis> {
    if !tensor_has_dim(t, dim) {
        return None;
    }
    Some(normalize_dim(dim, nonzero_dim(t)) as Axis)
}

/// Whether two tensors share an element type.
pub fn same_dtype<A, B>(a: &A, b: &B) -> bool
where
    A: TensorMeta + ?Sized,
    B: TensorMeta + ?Sized,
{
    a.scalar_type() == b.scalar_type()
}

/// Whether `t` has at most `max_rank` dimensions.
pub fn rank_at_most<T: TensorMeta + ?Sized>(t: &T, max_rank: Rank) -> bool {
    t.dim() <= max_rank
}

/// Whether two tensors have identical shapes.
pub fn same_shape<A, B>(a: &A, b: &B) -> bool
where
    A: TensorMeta + ?Sized,
    B: TensorMeta + ?Sized,
{
    a.sizes() == b.sizes()
}
