//! # indexcheck-core
//!
//! Tensor metadata, element types and dimension helpers consumed by the
//! index operator validators in `indexcheck-kernels`.
//!
//! - **Element types** ([`ScalarType`], [`Scalar`]) with the runtime's names
//! - **Tensor metadata** ([`TensorMeta`]) borrowed read-only by validators
//! - **Owned dense tensor** ([`Tensor`]) backed by scirs2_core arrays
//! - **Dimension helpers** ([`checked_dim`], [`normalize_dim`], ...) that
//!   enforce the signed-dimension convention in one place
//!
//! ## Quick Start
//!
//! ```
//! use indexcheck_core::{checked_dim, nonempty_size, Tensor, TensorMeta};
//!
//! let input = Tensor::zeros::<f32>(&[3, 4]);
//! let axis = checked_dim(&input, -2).unwrap();
//! assert_eq!(axis, 0);
//! assert_eq!(nonempty_size(&input, axis), 3);
//! assert_eq!(input.numel(), 12);
//! ```
//!
//! ## Scalars
//!
//! A rank-0 tensor is treated as a rank-1 tensor of extent 1 by the
//! dimension helpers, so `dim = 0` and `dim = -1` are both valid for it.
//!
//! ## Error Handling
//!
//! Tensor construction returns `anyhow::Result`; the dimension helpers are
//! predicates and return `bool` or `Option`.

#![deny(warnings)]

pub mod dim;
pub mod tensor;
pub mod types;


pub use dim::{
    checked_dim, nonempty_size, nonzero_dim, normalize_dim, rank_at_most, same_dtype, same_shape,
    tensor_has_dim,
};
pub use tensor::{Tensor, TensorData, TensorMeta};
pub use types::{Axis, Rank, Scalar, ScalarType, Shape};
