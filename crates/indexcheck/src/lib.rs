//! # indexcheck
//!
//! Argument validation and shape inference for tensor index operators.
//!
//! This is the **meta crate** that re-exports the indexcheck components.
//!
//! ## Quick Start
//!
//! ```
//! use indexcheck::prelude::*;
//!
//! let input = Tensor::zeros::<f32>(&[3, 4]);
//! let index = Tensor::from_vec(vec![2i64, 0, 0], &[3]).unwrap();
//!
//! check_index_select_args(&input, 0, &index, &input)?;
//! assert_eq!(&index_select_out_shape(&input, 0, &index)[..], &[3, 4]);
//! # Ok::<(), ValidationError>(())
//! ```
//!
//! ## Components
//!
//! ### Tensor Metadata ([`core`])
//!
//! Element types, the [`TensorMeta`](core::TensorMeta) trait, an owned dense
//! tensor and the dimension normalization helpers.
//!
//! ### Validators ([`kernels`])
//!
//! `index_select` and `scatter_add` argument checks, output shape inference
//! and the strict / log-only [`ValidationConfig`](kernels::ValidationConfig).
//!
//! ```
//! use indexcheck::core::Tensor;
//! use indexcheck::kernels::{check_scatter_add_args, ErrorKind};
//!
//! let dest = Tensor::zeros::<f32>(&[4, 4]);
//! let index = Tensor::zeros::<i32>(&[4, 4]);
//! let err = check_scatter_add_args(&dest, 0, &index, &dest, &dest).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnsupportedIndexType);
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): Log rejections through `tracing`
//! - `logging`: [`logging::init_logging`] installs a `tracing-subscriber` formatter

#![deny(warnings)]

pub use indexcheck_core as core;
pub use indexcheck_kernels as kernels;

#[cfg(feature = "logging")]
pub mod logging;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use indexcheck::prelude::*;
    //!
    //! let tensor = Tensor::zeros::<f64>(&[2, 3]);
    //! assert_eq!(tensor.scalar_type(), ScalarType::Double);
    //! ```

    // Tensor metadata
    pub use crate::core::{checked_dim, normalize_dim, ScalarType, Shape, Tensor, TensorMeta};

    // Validators
    pub use crate::kernels::{
        check_index_select_args, check_index_select_out_shape, check_scatter_add_args,
        check_scatter_add_out_shape, get_index_select_out_target_size, index_select_out_shape,
    };

    // Diagnostics and policy
    pub use crate::kernels::{
        ErrorKind, FailurePolicy, KernelResult, Operation, ValidationConfig, ValidationError,
    };
}
