//! Read-only tensor metadata and an owned dense tensor
//!
//! Validators never own tensors. They borrow anything implementing
//! [`TensorMeta`] for the duration of one call and read its shape, element
//! type and, for range checks, its elements.
//!
//! [`Tensor`] is the owned implementation used by kernels and tests. Its
//! storage is a scirs2_core dynamic-dimensional array tagged by element type.

use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn};

use crate::types::{Scalar, ScalarType};

/// Read-only view of the attributes a kernel validator needs.
pub trait TensorMeta {
    /// Extent of every dimension, outermost first. Empty for a scalar.
    fn sizes(&self) -> &[usize];

    /// Element type.
    fn scalar_type(&self) -> ScalarType;

    /// Typed read access to the elements.
    ///
    /// Returns `None` when `S` is not the tensor's element type.
    fn elements<S: Scalar>(&self) -> Option<ArrayView<'_, S, IxDyn>>;

    /// Number of dimensions (0 for a scalar).
    fn dim(&self) -> usize {
        self.sizes().len()
    }

    /// Extent along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.dim()`.
    fn size(&self, axis: usize) -> usize {
        self.sizes()[axis]
    }

    /// Total number of elements. A scalar holds one element.
    fn numel(&self) -> usize {
        self.sizes().iter().product()
    }
}

/// Typed element storage of a [`Tensor`].
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    Byte(Array<u8, IxDyn>),
    Char(Array<i8, IxDyn>),
    Short(Array<i16, IxDyn>),
    Int(Array<i32, IxDyn>),
    Long(Array<i64, IxDyn>),
    Float(Array<f32, IxDyn>),
    Double(Array<f64, IxDyn>),
    Bool(Array<bool, IxDyn>),
}

impl TensorData {
    fn scalar_type(&self) -> ScalarType {
        match self {
            TensorData::Byte(_) => ScalarType::Byte,
            TensorData::Char(_) => ScalarType::Char,
            TensorData::Short(_) => ScalarType::Short,
            TensorData::Int(_) => ScalarType::Int,
            TensorData::Long(_) => ScalarType::Long,
            TensorData::Float(_) => ScalarType::Float,
            TensorData::Double(_) => ScalarType::Double,
            TensorData::Bool(_) => ScalarType::Bool,
        }
    }

    fn shape(&self) -> &[usize] {
        match self {
            TensorData::Byte(a) => a.shape(),
            TensorData::Char(a) => a.shape(),
            TensorData::Short(a) => a.shape(),
            TensorData::Int(a) => a.shape(),
            TensorData::Long(a) => a.shape(),
            TensorData::Float(a) => a.shape(),
            TensorData::Double(a) => a.shape(),
            TensorData::Bool(a) => a.shape(),
        }
    }
}

/// Owned dense tensor with a runtime element type.
///
/// # Examples
///
/// ```
/// use indexcheck_core::{ScalarType, Tensor, TensorMeta};
///
/// let index = Tensor::from_vec(vec![2i64, 0, 0], &[3]).unwrap();
/// assert_eq!(index.scalar_type(), ScalarType::Long);
/// assert_eq!(index.dim(), 1);
/// assert_eq!(index.numel(), 3);
///
/// let scalar = Tensor::scalar(1.5f32);
/// assert_eq!(scalar.dim(), 0);
/// assert_eq!(scalar.numel(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: TensorData,
}

impl Tensor {
    /// Wrap an existing array.
    pub fn from_array<S: Scalar>(array: Array<S, IxDyn>) -> Self {
        Self {
            data: S::into_data(array),
        }
    }

    /// Create a tensor from row-major data with the given shape.
    ///
    /// Fails when `vec.len()` is not the product of `shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexcheck_core::Tensor;
    ///
    /// assert!(Tensor::from_vec(vec![1.0f64, 2.0, 3.0, 4.0], &[2, 2]).is_ok());
    /// assert!(Tensor::from_vec(vec![1.0f64, 2.0, 3.0], &[2, 2]).is_err());
    /// ```
    pub fn from_vec<S: Scalar>(vec: Vec<S>, shape: &[usize]) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                vec.len()
            );
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec)?;
        Ok(Self::from_array(array))
    }

    /// Create a rank-0 tensor holding `value`.
    pub fn scalar<S: Scalar>(value: S) -> Self {
        Self::full(&[], value)
    }

    /// Create a tensor of the given shape with every element set to `value`.
    pub fn full<S: Scalar>(shape: &[usize], value: S) -> Self {
        Self::from_array(Array::from_elem(IxDyn(shape), value))
    }

    /// Create a tensor of the given shape filled with `S::default()`.
    pub fn zeros<S: Scalar>(shape: &[usize]) -> Self {
        Self::full(shape, S::default())
    }

    /// Access the typed storage.
    pub fn data(&self) -> &TensorData {
        &self.data
    }
}

impl TensorMeta for Tensor {
    fn sizes(&self) -> &[usize] {
        self.data.shape()
    }

    fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    fn elements<S: Scalar>(&self) -> Option<ArrayView<'_, S, IxDyn>> {
        S::view_data(&self.data)
    }
}

impl<T: TensorMeta + ?Sized> TensorMeta for &T {
    fn sizes(&self) -> &[usize] {
        (**self).sizes()
    }

    fn scalar_type(&self) -> ScalarType {
        (**self).scalar_type()
    }

    fn elements<S: Scalar>(&self) -> Option<ArrayView<'_, S, IxDyn>> {
        (**self).elements::<S>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_shape_and_type() {
        let t = Tensor::from_vec(vec![1i32, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        assert_eq!(t.sizes(), &[2, 3]);
        assert_eq!(t.dim(), 2);
        assert_eq!(t.size(1), 3);
        assert_eq!(t.numel(), 6);
        assert_eq!(t.scalar_type(), ScalarType::Int);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let result = Tensor::from_vec(vec![1i64, 2, 3], &[2, 2]);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("requires 4 elements"));
    }

    #[test]
    fn test_scalar_tensor() {
        let t = Tensor::scalar(7i64);
        assert_eq!(t.dim(), 0);
        assert!(t.sizes().is_empty());
        assert_eq!(t.numel(), 1);
        let view = t.elements::<i64>().unwrap();
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_empty_tensor() {
        let t = Tensor::zeros::<i64>(&[0]);
        assert_eq!(t.dim(), 1);
        assert_eq!(t.numel(), 0);
        assert_eq!(t.elements::<i64>().unwrap().len(), 0);
    }

    #[test]
    fn test_elements_wrong_type() {
        let t = Tensor::from_vec(vec![1i32, 2], &[2]).unwrap();
        assert!(t.elements::<i32>().is_some());
        assert!(t.elements::<i64>().is_none());
        assert!(t.elements::<f32>().is_none());
    }

    #[test]
    fn test_full_and_zeros() {
        let ones = Tensor::full(&[2, 2], 1.0f64);
        assert!(ones.elements::<f64>().unwrap().iter().all(|&v| v == 1.0));

        let flags = Tensor::zeros::<bool>(&[3]);
        assert_eq!(flags.scalar_type(), ScalarType::Bool);
        assert!(flags.elements::<bool>().unwrap().iter().all(|&v| !v));
    }

    #[test]
    fn test_meta_through_reference() {
        let t = Tensor::zeros::<f32>(&[4, 5]);
        let r = &t;
        assert_eq!(TensorMeta::sizes(&r), &[4, 5]);
        assert_eq!(TensorMeta::scalar_type(&r), ScalarType::Float);
    }
}
