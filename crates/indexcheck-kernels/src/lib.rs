//! # indexcheck-kernels
//!
//! Argument validation and output shape inference for the `index_select`
//! and `scatter_add` operator kernels.
//!
//! A gather or accumulate kernel that reads an out-of-range index corrupts
//! memory, so every kernel calls into this crate before touching data:
//!
//! - **index_select** - [`check_index_select_args`], then
//!   [`index_select_out_shape`] to size the output
//! - **scatter_add** - [`check_scatter_add_args`]; the output has `self`'s shape
//! - **Policy** - [`ValidationConfig`] applies strict or log-only handling
//!
//! All checks are pure reads over borrowed [`TensorMeta`](indexcheck_core::TensorMeta)
//! implementations and stop at the first violated rule.
//!
//! ## Quick Start
//!
//! ```
//! use indexcheck_core::Tensor;
//! use indexcheck_kernels::{check_index_select_args, index_select_out_shape, ErrorKind};
//!
//! let input = Tensor::zeros::<f32>(&[3, 4]);
//! let out = Tensor::zeros::<f32>(&[3, 4]);
//!
//! let index = Tensor::from_vec(vec![2i64, 0, 0], &[3]).unwrap();
//! check_index_select_args(&input, 0, &index, &out).unwrap();
//! assert_eq!(&index_select_out_shape(&input, 0, &index)[..], &[3, 4]);
//!
//! let bad = Tensor::from_vec(vec![3i64], &[1]).unwrap();
//! let err = check_index_select_args(&input, 0, &bad, &out).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
//! assert_eq!(
//!     err.to_string(),
//!     "index_select: index[0] = 3 is out of range [0, 3) for dimension 0"
//! );
//! ```
//!
//! ## Index dtypes
//!
//! `index_select` accepts `Long` and `Int` index tensors. `scatter_add`
//! accepts `Long` only.
//!
//! ## Features
//!
//! - `tracing` (default) - log rejections at `debug` and policy overrides at `warn`

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod index_select;
mod log;
pub mod scan;
pub mod scatter_add;

#[cfg(test)]
mod property_tests;

// Re-exports
pub use config::{FailurePolicy, ValidationConfig, FAILURE_POLICY_ENV};
pub use error::{ErrorKind, KernelResult, Operation, ValidationError};
pub use index_select::*;
pub use scan::{check_index_range, IndexScalar};
pub use scatter_add::*;
