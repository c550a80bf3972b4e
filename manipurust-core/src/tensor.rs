// manipurust-core/src/tensor.rs
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use half::f16;

use crate::device::StorageDevice;
use crate::error::ManipuRustError;
use crate::ops::manipulation::{flip_op, roll_op, Dims, Shifts};
use crate::ops::view::reshape_op;
use crate::tensor_data::TensorData;
use crate::types::DType;

/// The public, user-facing Tensor type.
///
/// Wraps the internal `TensorData` in an `Arc<RwLock<>>` to allow shared
/// ownership and cheap cloning. A `Tensor` is either *concrete* (it owns a
/// CPU buffer) or *symbolic* (a deferred-mode placeholder carrying only
/// dtype and shape).
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new f32 `Tensor` from raw data and shape.
    /// Data is moved into the new Tensor.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Ok(Self::from_data(TensorData::new(data, shape)?))
    }

    /// Creates a new f64 `Tensor` from raw data and shape.
    pub fn new_f64(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Ok(Self::from_data(TensorData::new_f64(data, shape)?))
    }

    /// Creates a new f16 `Tensor` from raw data and shape.
    pub fn new_f16(data: Vec<f16>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Ok(Self::from_data(TensorData::new_f16(data, shape)?))
    }

    /// Creates a new i32 `Tensor` from raw data and shape.
    pub fn new_i32(data: Vec<i32>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Ok(Self::from_data(TensorData::new_i32(data, shape)?))
    }

    /// Creates a new i64 `Tensor` from raw data and shape.
    pub fn new_i64(data: Vec<i64>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Ok(Self::from_data(TensorData::new_i64(data, shape)?))
    }

    /// Creates a new bool `Tensor` from raw data and shape.
    pub fn new_bool(data: Vec<bool>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Ok(Self::from_data(TensorData::new_bool(data, shape)?))
    }

    pub(crate) fn from_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    // --- Lock helpers ---

    /// Acquires the read lock, panicking on poison. Used by accessors where
    /// a poisoned lock is unrecoverable anyway.
    pub(crate) fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("TensorData RwLock poisoned")
    }

    /// Acquires the read lock, propagating poisoning as a `LockError`.
    /// Used by operation code paths.
    pub(crate) fn try_read(
        &self,
        operation: &str,
    ) -> Result<RwLockReadGuard<'_, TensorData>, ManipuRustError> {
        self.data.read().map_err(|_| ManipuRustError::LockError {
            lock_type: "read".to_string(),
            reason: format!("Failed to lock TensorData for read in {}", operation),
        })
    }

    // --- Accessors ---

    /// Returns the shape of the tensor as a `Vec<usize>` (cloned).
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of dimensions of the tensor.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the total number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns the data type of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    /// Returns the device where the tensor data resides.
    pub fn device(&self) -> StorageDevice {
        self.read_data().device
    }

    /// Returns true if the tensor's memory layout is contiguous.
    pub fn is_contiguous(&self) -> bool {
        self.read_data().is_contiguous()
    }

    /// Returns true if this tensor is a deferred-mode placeholder.
    pub fn is_symbolic(&self) -> bool {
        self.read_data().is_symbolic()
    }

    // --- Typed data extraction ---

    /// Returns a clone of the f32 data in logical (row-major) order.
    ///
    /// Fails if the tensor is symbolic, non-contiguous, or holds another dtype.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, ManipuRustError> {
        let guard = self.try_read("get_f32_data")?;
        Self::check_extractable(&guard, "get_f32_data")?;
        let buffer = guard.buffer().try_get_cpu_f32()?;
        Ok(buffer[guard.offset..guard.offset + guard.numel()].to_vec())
    }

    /// Returns a clone of the f64 data in logical (row-major) order.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, ManipuRustError> {
        let guard = self.try_read("get_f64_data")?;
        Self::check_extractable(&guard, "get_f64_data")?;
        let buffer = guard.buffer().try_get_cpu_f64()?;
        Ok(buffer[guard.offset..guard.offset + guard.numel()].to_vec())
    }

    /// Returns a clone of the f16 data in logical (row-major) order.
    pub fn get_f16_data(&self) -> Result<Vec<f16>, ManipuRustError> {
        let guard = self.try_read("get_f16_data")?;
        Self::check_extractable(&guard, "get_f16_data")?;
        let buffer = guard.buffer().try_get_cpu_f16()?;
        Ok(buffer[guard.offset..guard.offset + guard.numel()].to_vec())
    }

    /// Returns a clone of the i32 data in logical (row-major) order.
    pub fn get_i32_data(&self) -> Result<Vec<i32>, ManipuRustError> {
        let guard = self.try_read("get_i32_data")?;
        Self::check_extractable(&guard, "get_i32_data")?;
        let buffer = guard.buffer().try_get_cpu_i32()?;
        Ok(buffer[guard.offset..guard.offset + guard.numel()].to_vec())
    }

    /// Returns a clone of the i64 data in logical (row-major) order.
    pub fn get_i64_data(&self) -> Result<Vec<i64>, ManipuRustError> {
        let guard = self.try_read("get_i64_data")?;
        Self::check_extractable(&guard, "get_i64_data")?;
        let buffer = guard.buffer().try_get_cpu_i64()?;
        Ok(buffer[guard.offset..guard.offset + guard.numel()].to_vec())
    }

    /// Returns a clone of the bool data in logical (row-major) order.
    pub fn get_bool_data(&self) -> Result<Vec<bool>, ManipuRustError> {
        let guard = self.try_read("get_bool_data")?;
        Self::check_extractable(&guard, "get_bool_data")?;
        let buffer = guard.buffer().try_get_cpu_bool()?;
        Ok(buffer[guard.offset..guard.offset + guard.numel()].to_vec())
    }

    fn check_extractable(guard: &TensorData, operation: &str) -> Result<(), ManipuRustError> {
        if !guard.is_contiguous() {
            return Err(ManipuRustError::UnsupportedOperation(format!(
                "{} requires a contiguous tensor. Found strides: {:?}",
                operation, guard.strides
            )));
        }
        Ok(())
    }

    // --- Manipulation operations ---

    /// Reverses the order of elements along each of the given axes.
    ///
    /// See [`crate::ops::manipulation::flip_op`].
    pub fn flip(&self, dims: &[usize]) -> Result<Tensor, ManipuRustError> {
        flip_op(self, dims)
    }

    /// Rolls elements along the given axes, wrapping around.
    ///
    /// `shifts` accepts a single integer or a list; `dims` accepts a single
    /// axis, a list of axes, or [`Dims::Flatten`] to roll over the flattened
    /// tensor. See [`crate::ops::manipulation::roll_op`].
    pub fn roll<S, D>(&self, shifts: S, dims: D) -> Result<Tensor, ManipuRustError>
    where
        S: Into<Shifts>,
        D: Into<Dims>,
    {
        roll_op(self, shifts.into(), dims.into())
    }

    /// Reinterprets the tensor with a new shape holding the same elements.
    ///
    /// See [`crate::ops::view::reshape_op`].
    pub fn reshape(&self, shape: Vec<usize>) -> Result<Tensor, ManipuRustError> {
        reshape_op(self, shape)
    }
}

impl Clone for Tensor {
    /// Clones the `Tensor` wrapper (bumps the `Arc` count).
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = self.read_data();
        f.debug_struct("Tensor")
            .field("dtype", &td.dtype)
            .field("shape", &td.shape)
            .field("device", &td.device)
            .field("symbolic", &td.is_symbolic())
            .finish()
    }
}
