//! Error types for index operator validation
//!
//! Every validator returns [`KernelResult`]. `Ok(())` is a pass; an `Err`
//! carries one [`ValidationError`] describing the first violated invariant,
//! with the facts a log line needs (dimension, value, range, dtype names).
//! [`ValidationError::kind`] groups the variants into the four failure
//! classes callers branch on.

use indexcheck_core::ScalarType;
use std::fmt;
use thiserror::Error;

/// Operator whose arguments failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    IndexSelect,
    ScatterAdd,
}

impl Operation {
    /// Operator name as registered with the runtime.
    pub fn name(self) -> &'static str {
        match self {
            Operation::IndexSelect => "index_select",
            Operation::ScatterAdd => "scatter_add",
        }
    }

    /// Whether this operator accepts `scalar_type` for its index tensor.
    ///
    /// `index_select` takes `Long` or `Int`; the `scatter_add` kernel only
    /// reads `Long`.
    pub fn accepts_index_type(self, scalar_type: ScalarType) -> bool {
        match self {
            Operation::IndexSelect => matches!(scalar_type, ScalarType::Long | ScalarType::Int),
            Operation::ScatterAdd => scalar_type == ScalarType::Long,
        }
    }

    /// Accepted index dtypes as printed in diagnostics.
    pub fn index_types(self) -> &'static str {
        match self {
            Operation::IndexSelect => "Long or Int",
            Operation::ScatterAdd => "Long",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure class of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Dtype or rank mismatch, dimension out of range, index rank too large.
    StructuralMismatch,
    /// Index element type not accepted by the operator.
    UnsupportedIndexType,
    /// An index extent exceeds the matching extent of `src` or `self`.
    ShapeBoundViolation,
    /// An index element lies outside `[0, extent)`.
    IndexOutOfRange,
}

/// Argument validation failure for an index operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{operation}: dim {dim} is out of range [-{rank}, {rank}) for {tensor}")]
    DimOutOfRange {
        operation: Operation,
        tensor: &'static str,
        dim: i64,
        rank: usize,
    },

    #[error("{operation}: indexing axis dim {dim} should be positive, but has size {extent}")]
    EmptyAxis {
        operation: Operation,
        dim: usize,
        extent: usize,
    },

    #[error("{operation}: {lhs} has dtype {expected} but {rhs} has dtype {actual}")]
    DtypeMismatch {
        operation: Operation,
        lhs: &'static str,
        rhs: &'static str,
        expected: ScalarType,
        actual: ScalarType,
    },

    #[error("{operation}: {tensor} must have rank <= {max_rank}, but has rank {rank}")]
    RankTooLarge {
        operation: Operation,
        tensor: &'static str,
        rank: usize,
        max_rank: usize,
    },

    #[error("{operation}: index to scalar must have exactly 1 value, but has {numel}")]
    ScalarIndexCount { operation: Operation, numel: usize },

    #[error(
        "{operation}: self, index and src should have same number of dimensions, got self {self_rank}, index {index_rank}, src {src_rank}"
    )]
    RankMismatch {
        operation: Operation,
        self_rank: usize,
        index_rank: usize,
        src_rank: usize,
    },

    #[error("{operation}: index elements are not readable as {scalar_type}")]
    UnreadableIndex {
        operation: Operation,
        scalar_type: ScalarType,
    },

    #[error("{operation}: out has shape {actual:?}, expected {expected:?}")]
    OutputShapeMismatch {
        operation: Operation,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("{operation}: expected index to have type of {expected}, but found {found}")]
    UnsupportedIndexType {
        operation: Operation,
        expected: &'static str,
        found: ScalarType,
    },

    #[error(
        "{operation}: size {index_extent} of dimension {dim} of index exceeds size {bound_extent} of that dimension of {bound}"
    )]
    ShapeBound {
        operation: Operation,
        dim: usize,
        index_extent: usize,
        bound: &'static str,
        bound_extent: usize,
    },

    #[error(
        "{operation}: index[{position}] = {value} is out of range [0, {extent}) for dimension {dim}"
    )]
    IndexOutOfRange {
        operation: Operation,
        position: usize,
        value: i64,
        dim: usize,
        extent: usize,
    },
}

/// Result type for validation and shape inference.
pub type KernelResult<T> = Result<T, ValidationError>;

impl ValidationError {
    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::DimOutOfRange { .. }
            | ValidationError::EmptyAxis { .. }
            | ValidationError::DtypeMismatch { .. }
            | ValidationError::RankTooLarge { .. }
            | ValidationError::ScalarIndexCount { .. }
            | ValidationError::RankMismatch { .. }
            | ValidationError::UnreadableIndex { .. }
            | ValidationError::OutputShapeMismatch { .. } => ErrorKind::StructuralMismatch,
            ValidationError::UnsupportedIndexType { .. } => ErrorKind::UnsupportedIndexType,
            ValidationError::ShapeBound { .. } => ErrorKind::ShapeBoundViolation,
            ValidationError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }

    /// Operator that rejected its arguments.
    pub fn operation(&self) -> Operation {
        match self {
            ValidationError::DimOutOfRange { operation, .. }
            | ValidationError::EmptyAxis { operation, .. }
            | ValidationError::DtypeMismatch { operation, .. }
            | ValidationError::RankTooLarge { operation, .. }
            | ValidationError::ScalarIndexCount { operation, .. }
            | ValidationError::RankMismatch { operation, .. }
            | ValidationError::UnreadableIndex { operation, .. }
            | ValidationError::OutputShapeMismatch { operation, .. }
            | ValidationError::UnsupportedIndexType { operation, .. }
            | ValidationError::ShapeBound { operation, .. }
            | ValidationError::IndexOutOfRange { operation, .. } => *operation,
        }
    }

    /// Create a dtype mismatch error
    pub fn dtype_mismatch(
        operation: Operation,
        lhs: &'static str,
        rhs: &'static str,
        expected: ScalarType,
        actual: ScalarType,
    ) -> Self {
        ValidationError::DtypeMismatch {
            operation,
            lhs,
            rhs,
            expected,
            actual,
        }
    }

    /// Create a dimension out of range error
    pub fn dim_out_of_range(
        operation: Operation,
        tensor: &'static str,
        dim: i64,
        rank: usize,
    ) -> Self {
        ValidationError::DimOutOfRange {
            operation,
            tensor,
            dim,
            rank,
        }
    }

    /// Create an unsupported index type error listing what `operation` accepts
    pub fn unsupported_index_type(operation: Operation, found: ScalarType) -> Self {
        ValidationError::UnsupportedIndexType {
            operation,
            expected: operation.index_types(),
            found,
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(
        operation: Operation,
        position: usize,
        value: i64,
        dim: usize,
        extent: usize,
    ) -> Self {
        ValidationError::IndexOutOfRange {
            operation,
            position,
            value,
            dim,
            extent,
        }
    }

    /// Create a shape bound error
    pub fn shape_bound(
        operation: Operation,
        dim: usize,
        index_extent: usize,
        bound: &'static str,
        bound_extent: usize,
    ) -> Self {
        ValidationError::ShapeBound {
            operation,
            dim,
            index_extent,
            bound,
            bound_extent,
        }
    }
}
