//! Property-based tests for index operator validation
//!
//! These tests verify the shape inference and rejection rules over randomly
//! generated shapes, dimensions and index contents.

use super::*;
use indexcheck_core::{Tensor, TensorMeta};
use proptest::prelude::*;

/// Strategy for an input shape of rank 1 to 4 with positive extents
fn input_shape() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..6, 1..=4)
}

/// Strategy for an input shape, a valid signed dim and an in-range index list
fn select_case() -> impl Strategy<Value = (Vec<usize>, i64, Vec<i64>)> {
    input_shape().prop_flat_map(|shape| {
        let rank = shape.len() as i64;
        (Just(shape), -rank..rank).prop_flat_map(|(shape, dim)| {
            let axis = (if dim < 0 { dim + shape.len() as i64 } else { dim }) as usize;
            let extent = shape[axis] as i64;
            (
                Just(shape),
                Just(dim),
                prop::collection::vec(0..extent, 0..8),
            )
        })
    })
}

proptest! {
    /// Inferred shape keeps rank and all extents except the target one
    #[test]
    fn test_out_shape_invariants((shape, dim, values) in select_case()) {
        let input = Tensor::zeros::<f32>(&shape);
        let out = Tensor::zeros::<f32>(&shape);
        let n = values.len();
        let index = Tensor::from_vec(values, &[n]).unwrap();

        prop_assert!(check_index_select_args(&input, dim, &index, &out).is_ok());

        let axis = (if dim < 0 { dim + shape.len() as i64 } else { dim }) as usize;
        let inferred = index_select_out_shape(&input, dim, &index);
        prop_assert_eq!(inferred.len(), input.dim());
        for (d, &extent) in inferred.iter().enumerate() {
            if d == axis {
                prop_assert_eq!(extent, index.numel());
            } else {
                prop_assert_eq!(extent, shape[d]);
            }
        }
    }

    /// Negative dim validates exactly like its normalized counterpart
    #[test]
    fn test_negative_dim_equivalence((shape, dim, values) in select_case(), bad in any::<bool>()) {
        let input = Tensor::zeros::<f64>(&shape);
        let mut values = values;
        if bad {
            values.push(shape[0] as i64 + 100);
        }
        let n = values.len();
        let index = Tensor::from_vec(values, &[n]).unwrap();

        let rank = shape.len() as i64;
        let positive = if dim < 0 { dim + rank } else { dim };
        let negative = positive - rank;

        prop_assert_eq!(
            check_index_select_args(&input, positive, &index, &input),
            check_index_select_args(&input, negative, &index, &input)
        );
        prop_assert_eq!(
            index_select_out_shape(&input, positive, &index),
            index_select_out_shape(&input, negative, &index)
        );
    }

    /// Any value outside [0, extent) is reported as IndexOutOfRange
    #[test]
    fn test_out_of_range_detected(
        (shape, dim, values) in select_case(),
        offset in 0i64..50,
        below in any::<bool>(),
        insert_at in 0usize..8,
    ) {
        let input = Tensor::zeros::<f32>(&shape);
        let rank = shape.len() as i64;
        let axis = (if dim < 0 { dim + rank } else { dim }) as usize;
        let extent = shape[axis] as i64;

        let bad_value = if below { -1 - offset } else { extent + offset };
        let mut values: Vec<i32> = values.into_iter().map(|v| v as i32).collect();
        let at = insert_at.min(values.len());
        values.insert(at, bad_value as i32);
        let n = values.len();
        let index = Tensor::from_vec(values, &[n]).unwrap();

        let err = check_index_select_args(&input, dim, &index, &input).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        prop_assert_eq!(
            err,
            ValidationError::IndexOutOfRange {
                operation: Operation::IndexSelect,
                position: at,
                value: bad_value,
                dim: axis,
                extent: extent as usize,
            }
        );
    }

    /// Empty scatter index passes whatever the other ranks are
    #[test]
    fn test_empty_scatter_index_passes(
        self_shape in input_shape(),
        src_shape in prop::collection::vec(0usize..4, 0..=4),
        index_tail in prop::collection::vec(0usize..4, 0..=3),
        dim_seed in 0usize..8,
    ) {
        let dest = Tensor::zeros::<f32>(&self_shape);
        let src = Tensor::zeros::<f32>(&src_shape);
        let mut index_shape = vec![0usize];
        index_shape.extend(index_tail);
        let index = Tensor::zeros::<i64>(&index_shape);
        let dim = (dim_seed % self_shape.len()) as i64;

        prop_assert!(check_scatter_add_args(&dest, dim, &index, &src, &dest).is_ok());
    }

    /// A scatter whose index fits inside both src and self validates
    #[test]
    fn test_scatter_within_bounds(shape in input_shape(), dim_seed in 0usize..8, fill in 0i64..100) {
        let dest = Tensor::zeros::<f32>(&shape);
        let src = Tensor::zeros::<f32>(&shape);
        let dim = dim_seed % shape.len();
        let value = fill % shape[dim] as i64;
        let index = Tensor::full(&shape, value);

        prop_assert!(check_scatter_add_args(&dest, dim as i64, &index, &src, &dest).is_ok());
        prop_assert!(check_scatter_add_args(&dest, dim as i64 - shape.len() as i64, &index, &src, &dest).is_ok());
    }
}
