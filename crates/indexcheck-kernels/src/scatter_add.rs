//! Argument validation for `scatter_add`
//!
//! `scatter_add(self, dim, index, src)` adds every `src` element into a copy
//! of `self` at the position given by the matching `index` element along
//! `dim`. The output always has `self`'s shape, so there is no shape
//! inference step; a kernel only validates and then accumulates into `out`.

use indexcheck_core::{checked_dim, nonempty_size, nonzero_dim, same_dtype, same_shape, TensorMeta};

use crate::error::{KernelResult, Operation, ValidationError};
use crate::log::{ensure_arg, reject};
use crate::scan::check_index_range;

const OP: Operation = Operation::ScatterAdd;

/// Validate the arguments of `scatter_add`.
///
/// Checks run in this order and stop at the first failure:
///
/// 1. `self_` and `out` share a dtype, and `self_` and `src` share a dtype
/// 2. `index` holds `Long` elements (`Int` is not accepted here)
/// 3. `dim` addresses a dimension of `self_`
/// 4. an empty `index` passes immediately
/// 5. `self_`, `index` and `src` have the same rank
/// 6. for every dimension, `index`'s extent is at most `src`'s
/// 7. for every dimension except `dim`, `index`'s extent is at most `self_`'s
/// 8. every element of `index` lies in `[0, extent of self_ along dim)`
///
/// Along `dim` the destination positions come from the index values, so only
/// the element-range check bounds `index` against `self_` there.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first violated rule.
///
/// # Examples
///
/// ```
/// use indexcheck_core::Tensor;
/// use indexcheck_kernels::{check_scatter_add_args, ErrorKind};
///
/// let dest = Tensor::zeros::<f32>(&[4, 4]);
/// let src = Tensor::zeros::<f32>(&[4, 4]);
/// let index = Tensor::zeros::<i64>(&[4, 5]);
///
/// let err = check_scatter_add_args(&dest, 1, &index, &src, &dest).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::ShapeBoundViolation);
/// ```
pub fn check_scatter_add_args<D, X, S, O>(
    self_: &D,
    dim: i64,
    index: &X,
    src: &S,
    out: &O,
) -> KernelResult<()>
where
    D: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
    S: TensorMeta + ?Sized,
    O: TensorMeta + ?Sized,
{
    validate_scatter_add(self_, dim, index, src, out, true)
}

/// Rules 1-7 always run; rule 8 only when `scan_indices` is set.
pub(crate) fn validate_scatter_add<D, X, S, O>(
    self_: &D,
    dim: i64,
    index: &X,
    src: &S,
    out: &O,
    scan_indices: bool,
) -> KernelResult<()>
where
    D: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
    S: TensorMeta + ?Sized,
    O: TensorMeta + ?Sized,
{
    ensure_arg!(
        same_dtype(self_, out),
        ValidationError::dtype_mismatch(OP, "self", "out", self_.scalar_type(), out.scalar_type())
    );
    ensure_arg!(
        same_dtype(self_, src),
        ValidationError::dtype_mismatch(OP, "self", "src", self_.scalar_type(), src.scalar_type())
    );
    ensure_arg!(
        OP.accepts_index_type(index.scalar_type()),
        ValidationError::unsupported_index_type(OP, index.scalar_type())
    );
    let Some(dim) = checked_dim(self_, dim) else {
        return reject(ValidationError::dim_out_of_range(
            OP,
            "self",
            dim,
            nonzero_dim(self_),
        ));
    };

    if index.numel() == 0 {
        #[cfg(feature = "tracing")]
        tracing::trace!("scatter_add with empty index, nothing to validate");
        return Ok(());
    }

    let rank = nonzero_dim(self_);
    ensure_arg!(
        rank == nonzero_dim(src) && rank == nonzero_dim(index),
        ValidationError::RankMismatch {
            operation: OP,
            self_rank: self_.dim(),
            index_rank: index.dim(),
            src_rank: src.dim(),
        }
    );

    for d in 0..rank {
        let index_extent = nonempty_size(index, d);
        let src_extent = nonempty_size(src, d);
        ensure_arg!(
            index_extent <= src_extent,
            ValidationError::shape_bound(OP, d, index_extent, "src", src_extent)
        );
        if d != dim {
            let self_extent = nonempty_size(self_, d);
            ensure_arg!(
                index_extent <= self_extent,
                ValidationError::shape_bound(OP, d, index_extent, "self", self_extent)
            );
        }
    }

    if scan_indices {
        check_index_range::<i64, _>(OP, index, dim, nonempty_size(self_, dim))?;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(dim, index_len = index.numel(), "scatter_add arguments valid");

    Ok(())
}

/// Check that `out` has the shape of `self_`.
///
/// # Errors
///
/// [`ValidationError::OutputShapeMismatch`] if the shapes differ.
pub fn check_scatter_add_out_shape<D, O>(self_: &D, out: &O) -> KernelResult<()>
where
    D: TensorMeta + ?Sized,
    O: TensorMeta + ?Sized,
{
    if !same_shape(self_, out) {
        return reject(ValidationError::OutputShapeMismatch {
            operation: OP,
            expected: self_.sizes().to_vec(),
            actual: out.sizes().to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use indexcheck_core::Tensor;

    fn index(values: Vec<i64>, shape: &[usize]) -> Tensor {
        Tensor::from_vec(values, shape).unwrap()
    }

    #[test]
    fn test_valid_scatter() {
        let dest = Tensor::zeros::<f32>(&[3, 5]);
        let src = Tensor::zeros::<f32>(&[2, 5]);
        let idx = index(vec![0, 1, 2, 0, 0, 2, 0, 0, 1, 2], &[2, 5]);

        assert!(check_scatter_add_args(&dest, 0, &idx, &src, &dest).is_ok());
        assert!(check_scatter_add_args(&dest, -2, &idx, &src, &dest).is_ok());
    }

    #[test]
    fn test_target_dim_may_exceed_self_extent() {
        // Along dim the index extent is bounded by src only
        let dest = Tensor::zeros::<f64>(&[2, 2]);
        let src = Tensor::zeros::<f64>(&[2, 4]);
        let idx = index(vec![0, 1, 1, 0, 1, 1, 0, 0], &[2, 4]);

        assert!(check_scatter_add_args(&dest, 1, &idx, &src, &dest).is_ok());

        let err = check_scatter_add_args(&dest, 0, &idx, &src, &dest).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ShapeBound {
                operation: Operation::ScatterAdd,
                dim: 1,
                index_extent: 4,
                bound: "self",
                bound_extent: 2,
            }
        );
    }

    #[test]
    fn test_index_exceeds_src_on_target_dim() {
        let dest = Tensor::zeros::<f32>(&[4, 4]);
        let src = Tensor::zeros::<f32>(&[4, 4]);
        let idx = Tensor::zeros::<i64>(&[4, 5]);

        let err = check_scatter_add_args(&dest, 1, &idx, &src, &dest).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ShapeBound {
                operation: Operation::ScatterAdd,
                dim: 1,
                index_extent: 5,
                bound: "src",
                bound_extent: 4,
            }
        );
    }

    #[test]
    fn test_dtype_mismatches() {
        let dest = Tensor::zeros::<f32>(&[2, 2]);
        let idx = Tensor::zeros::<i64>(&[2, 2]);

        let out = Tensor::zeros::<f64>(&[2, 2]);
        let err = check_scatter_add_args(&dest, 0, &idx, &dest, &out).unwrap_err();
        assert!(err.to_string().contains("out has dtype Double"));

        let src = Tensor::zeros::<i32>(&[2, 2]);
        let err = check_scatter_add_args(&dest, 0, &idx, &src, &dest).unwrap_err();
        assert!(err.to_string().contains("src has dtype Int"));
        assert_eq!(err.kind(), ErrorKind::StructuralMismatch);
    }

    #[test]
    fn test_int_index_rejected() {
        let dest = Tensor::zeros::<f32>(&[2, 2]);
        let idx = Tensor::zeros::<i32>(&[2, 2]);

        let err = check_scatter_add_args(&dest, 0, &idx, &dest, &dest).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedIndexType);
        assert!(err.to_string().contains("found Int"));
    }

    #[test]
    fn test_dim_out_of_range() {
        let dest = Tensor::zeros::<f32>(&[2, 2]);
        let idx = Tensor::zeros::<i64>(&[2, 2]);

        let err = check_scatter_add_args(&dest, 2, &idx, &dest, &dest).unwrap_err();
        assert!(matches!(err, ValidationError::DimOutOfRange { dim: 2, .. }));
    }

    #[test]
    fn test_dim_checked_before_empty_index_pass() {
        let dest = Tensor::zeros::<f32>(&[2, 2]);
        let empty = Tensor::zeros::<i64>(&[0]);

        for dim in [2, -3, i64::MIN] {
            let err = check_scatter_add_args(&dest, dim, &empty, &dest, &dest).unwrap_err();
            assert_eq!(
                err,
                ValidationError::DimOutOfRange {
                    operation: Operation::ScatterAdd,
                    tensor: "self",
                    dim,
                    rank: 2,
                }
            );
        }
        assert!(check_scatter_add_args(&dest, -2, &empty, &dest, &dest).is_ok());
    }

    #[test]
    fn test_empty_index_skips_shape_checks() {
        let dest = Tensor::zeros::<f32>(&[2, 2]);
        let src = Tensor::zeros::<f32>(&[3]);
        let idx = Tensor::zeros::<i64>(&[0, 7, 9]);

        assert!(check_scatter_add_args(&dest, 1, &idx, &src, &dest).is_ok());
    }

    #[test]
    fn test_rank_mismatch() {
        let dest = Tensor::zeros::<f32>(&[2, 2]);
        let src = Tensor::zeros::<f32>(&[2, 2]);
        let idx = Tensor::zeros::<i64>(&[2]);

        let err = check_scatter_add_args(&dest, 0, &idx, &src, &dest).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RankMismatch {
                operation: Operation::ScatterAdd,
                self_rank: 2,
                index_rank: 1,
                src_rank: 2,
            }
        );
    }

    #[test]
    fn test_scalar_operands_count_as_rank_one() {
        let dest = Tensor::scalar(1.0f32);
        let src = Tensor::zeros::<f32>(&[1]);
        let idx = Tensor::scalar(0i64);

        assert!(check_scatter_add_args(&dest, 0, &idx, &src, &dest).is_ok());
        assert!(check_scatter_add_args(&dest, -1, &idx, &src, &dest).is_ok());
    }

    #[test]
    fn test_out_of_range_value() {
        let dest = Tensor::zeros::<f32>(&[3, 2]);
        let src = Tensor::zeros::<f32>(&[3, 2]);
        let idx = index(vec![0, 1, 2, 0, 3, 1], &[3, 2]);

        let err = check_scatter_add_args(&dest, 0, &idx, &src, &dest).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IndexOutOfRange {
                operation: Operation::ScatterAdd,
                position: 4,
                value: 3,
                dim: 0,
                extent: 3,
            }
        );
    }

    #[test]
    fn test_out_shape() {
        let dest = Tensor::zeros::<f32>(&[3, 2]);
        assert!(check_scatter_add_out_shape(&dest, &Tensor::zeros::<f32>(&[3, 2])).is_ok());

        let err = check_scatter_add_out_shape(&dest, &Tensor::zeros::<f32>(&[2, 3])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralMismatch);
    }
}
