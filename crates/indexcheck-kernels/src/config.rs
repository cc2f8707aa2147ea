//! Validation policy and kernel-facing entry points
//!
//! The validators only return a verdict. What a kernel does with a failure
//! is a build decision: a strict build refuses to run the operator, a
//! non-strict build logs the problem and carries on. [`ValidationConfig`]
//! captures that decision so kernels can call one entry point per operator.
//!
//! # Environment Variables
//!
//! - `INDEXCHECK_FAILURE_POLICY`: `strict` (default) or `log` / `log_only`

use indexcheck_core::{checked_dim, nonempty_size, nonzero_dim, ScalarType, TensorMeta};

use crate::error::{KernelResult, Operation, ValidationError};
use crate::index_select::validate_index_select;
use crate::log::{ensure_arg, reject};
use crate::scan::check_index_range;
use crate::scatter_add::validate_scatter_add;

/// Environment variable read by [`ValidationConfig::from_env`].
pub const FAILURE_POLICY_ENV: &str = "INDEXCHECK_FAILURE_POLICY";

/// What to do with a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Propagate the error; the operator must not run.
    #[default]
    Strict,
    /// Log the error at `warn` level and report success.
    LogOnly,
}

impl FailurePolicy {
    /// Parse from string. Unknown values fall back to [`FailurePolicy::Strict`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "log" | "log_only" | "log-only" | "lenient" => FailurePolicy::LogOnly,
            _ => FailurePolicy::Strict,
        }
    }
}

/// Validation configuration for kernel call sites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Failure handling
    pub policy: FailurePolicy,
    /// Run the element-range scan over index values
    pub scan_indices: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::Strict,
            scan_indices: true,
        }
    }
}

impl ValidationConfig {
    /// Create a strict configuration with index scanning enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from `INDEXCHECK_FAILURE_POLICY`
    pub fn from_env() -> Self {
        let policy = std::env::var(FAILURE_POLICY_ENV)
            .map(|s| FailurePolicy::parse(&s))
            .unwrap_or_default();
        Self::default().with_policy(policy)
    }

    /// Set failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for `with_policy(FailurePolicy::Strict)`
    pub fn strict(self) -> Self {
        self.with_policy(FailurePolicy::Strict)
    }

    /// Shorthand for `with_policy(FailurePolicy::LogOnly)`
    pub fn log_only(self) -> Self {
        self.with_policy(FailurePolicy::LogOnly)
    }

    /// Enable or disable the index value scan.
    ///
    /// Disable only when the index buffer was range-checked upstream; the
    /// structural checks still run.
    pub fn with_index_scan(mut self, scan: bool) -> Self {
        self.scan_indices = scan;
        self
    }

    /// Apply the failure policy to a validation verdict.
    pub fn enforce(&self, result: KernelResult<()>) -> KernelResult<()> {
        match (result, self.policy) {
            (Ok(()), _) => Ok(()),
            (Err(err), FailurePolicy::Strict) => Err(err),
            (Err(_err), FailurePolicy::LogOnly) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    operation = %_err.operation(),
                    kind = ?_err.kind(),
                    "ignoring failed argument check: {}",
                    _err
                );
                Ok(())
            }
        }
    }

    /// Validate `index_select` arguments under this configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexcheck_core::Tensor;
    /// use indexcheck_kernels::ValidationConfig;
    ///
    /// let input = Tensor::zeros::<f32>(&[3, 4]);
    /// let index = Tensor::from_vec(vec![5i64], &[1]).unwrap();
    ///
    /// let strict = ValidationConfig::new();
    /// assert!(strict.check_index_select(&input, 0, &index, &input).is_err());
    ///
    /// let lenient = ValidationConfig::new().log_only();
    /// assert!(lenient.check_index_select(&input, 0, &index, &input).is_ok());
    /// ```
    pub fn check_index_select<I, X, O>(
        &self,
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
        self.enforce(validate_index_select(
            input,
            dim,
            index,
            out,
            self.scan_indices,
        ))
    }

    /// Validate `scatter_add` arguments under this configuration.
    pub fn check_scatter_add<D, X, S, O>(
        &self,
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
        self.enforce(validate_scatter_add(
            self_,
            dim,
            index,
            src,
            out,
            self.scan_indices,
        ))
    }

    /// Run only the index value scan of an operator.
    ///
    /// For callers that validated structure earlier and now hold the final
    /// index buffer. `target` is the tensor the values index into (`in` for
    /// `index_select`, `self` for `scatter_add`). `dim` and the index dtype
    /// are checked again before the scan.
    pub fn check_index_values<T, X>(
        &self,
        operation: Operation,
        target: &T,
        dim: i64,
        index: &X,
    ) -> KernelResult<()>
    where
        T: TensorMeta + ?Sized,
        X: TensorMeta + ?Sized,
    {
        self.enforce(scan_index_values(operation, target, dim, index))
    }
}

fn scan_index_values<T, X>(operation: Operation, target: &T, dim: i64, index: &X) -> KernelResult<()>
where
    T: TensorMeta + ?Sized,
    X: TensorMeta + ?Sized,
{
    let Some(dim) = checked_dim(target, dim) else {
        return reject(ValidationError::dim_out_of_range(
            operation,
            "target",
            dim,
            nonzero_dim(target),
        ));
    };
    let index_type = index.scalar_type();
    ensure_arg!(
        operation.accepts_index_type(index_type),
        ValidationError::unsupported_index_type(operation, index_type)
    );

    let extent = nonempty_size(target, dim);
    match index_type {
        ScalarType::Int => check_index_range::<i32, _>(operation, index, dim, extent),
        _ => check_index_range::<i64, _>(operation, index, dim, extent),
    }
}
