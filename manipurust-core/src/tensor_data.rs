use std::sync::Arc;

use half::f16;

use crate::buffer::{Buffer, CpuBuffer};
use crate::device::StorageDevice;
use crate::error::ManipuRustError;
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the actual data buffer, shape, strides, device and
/// data type. It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor`
/// struct to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying data buffer (CPU, GPU or symbolic) holding typed data.
    /// Wrapped in Arc for cheap cloning (sharing the buffer itself, e.g., for views).
    pub(crate) buffer: Arc<Buffer>,
    /// The device where the buffer resides.
    pub(crate) device: StorageDevice,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,
    /// The shape (dimensions) of the tensor.
    pub(crate) shape: Vec<usize>,
    /// The strides for each dimension.
    /// Strides define the jump in memory required to move one step along a given dimension.
    pub(crate) strides: Vec<usize>,
    /// The offset into the buffer for the first element (used for views).
    pub(crate) offset: usize,
}

impl TensorData {
    /// Shared construction path for the per-dtype constructors: validates the
    /// element count against the shape, computes contiguous strides and wraps
    /// the buffer.
    fn from_cpu_buffer(cpu_buffer: CpuBuffer, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        let numel: usize = shape.iter().product();
        let data_len = cpu_buffer.len();
        if data_len != numel {
            return Err(ManipuRustError::TensorCreationError { data_len, shape });
        }

        let strides = Self::calculate_contiguous_strides(&shape);
        let dtype = cpu_buffer.dtype();

        Ok(TensorData {
            buffer: Arc::new(Buffer::Cpu(cpu_buffer)),
            device: StorageDevice::CPU,
            dtype,
            shape,
            strides,
            offset: 0,
        })
    }

    /// Creates a new `TensorData` instance with the given f32 data and shape on the CPU.
    ///
    /// This is the primary constructor for creating tensors from raw f32 data.
    /// It takes ownership of the data vector and calculates contiguous strides
    /// automatically.
    ///
    /// # Errors
    /// Returns `ManipuRustError::TensorCreationError` if the length of `data_vec` does not
    /// match the total number of elements specified by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Self::from_cpu_buffer(CpuBuffer::F32(Arc::new(data_vec)), shape)
    }

    /// Creates a new `TensorData` instance with the given f64 data and shape on the CPU.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Self::from_cpu_buffer(CpuBuffer::F64(Arc::new(data_vec)), shape)
    }

    /// Creates a new `TensorData` instance with the given f16 data and shape on the CPU.
    pub fn new_f16(data_vec: Vec<f16>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Self::from_cpu_buffer(CpuBuffer::F16(Arc::new(data_vec)), shape)
    }

    /// Creates a new `TensorData` instance with the given i32 data and shape on the CPU.
    pub fn new_i32(data_vec: Vec<i32>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Self::from_cpu_buffer(CpuBuffer::I32(Arc::new(data_vec)), shape)
    }

    /// Creates a new `TensorData` instance with the given i64 data and shape on the CPU.
    pub fn new_i64(data_vec: Vec<i64>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Self::from_cpu_buffer(CpuBuffer::I64(Arc::new(data_vec)), shape)
    }

    /// Creates a new `TensorData` instance with the given bool data and shape on the CPU.
    pub fn new_bool(data_vec: Vec<bool>, shape: Vec<usize>) -> Result<Self, ManipuRustError> {
        Self::from_cpu_buffer(CpuBuffer::Bool(Arc::new(data_vec)), shape)
    }

    /// Creates a new `TensorData` representing a view of an existing buffer.
    /// (Used internally by view operations like reshape.)
    ///
    /// This constructor does **not** allocate new memory for the data but shares the
    /// provided `buffer_arc`. It sets new metadata (offset, shape, strides).
    ///
    /// # Errors
    /// Returns `ManipuRustError::UnsupportedOperation` if the buffer type does not
    /// carry a dtype (GPU buffers currently).
    pub(crate) fn new_view(
        buffer_arc: Arc<Buffer>,
        device: StorageDevice,
        offset: usize,
        shape: Vec<usize>,
        strides: Vec<usize>,
    ) -> Result<Self, ManipuRustError> {
        let dtype = buffer_arc.dtype().ok_or_else(|| {
            ManipuRustError::UnsupportedOperation(
                "Cannot determine dtype for GPU buffer in new_view yet.".to_string(),
            )
        })?;

        Ok(TensorData {
            buffer: buffer_arc,
            device,
            dtype,
            shape,
            strides,
            offset,
        })
    }

    /// Creates a symbolic `TensorData` backing a deferred-mode placeholder.
    ///
    /// The placeholder carries dtype and (inferred) shape but owns no storage.
    pub(crate) fn new_symbolic(dtype: DType, shape: Vec<usize>) -> Self {
        let strides = Self::calculate_contiguous_strides(&shape);
        TensorData {
            buffer: Arc::new(Buffer::Symbolic { dtype }),
            device: StorageDevice::CPU,
            dtype,
            shape,
            strides,
            offset: 0,
        }
    }

    /// Provides immutable access to the underlying shared data buffer (`Arc<Buffer>`).
    pub fn buffer(&self) -> &Arc<Buffer> {
        &self.buffer
    }

    /// Calculates the strides required for a contiguous tensor of the given shape.
    /// This is a static utility function.
    pub fn calculate_contiguous_strides(shape: &[usize]) -> Vec<usize> {
        let mut strides = vec![0; shape.len()];
        if shape.is_empty() {
            return strides;
        }
        strides[shape.len() - 1] = 1;
        for i in (0..shape.len() - 1).rev() {
            strides[i] = strides[i + 1] * shape[i + 1];
        }
        strides
    }

    /// Total number of elements described by the shape.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns true if this tensor is a deferred-mode placeholder.
    pub fn is_symbolic(&self) -> bool {
        self.buffer.is_symbolic()
    }

    /// Checks if the tensor is contiguous in memory.
    /// A tensor is contiguous if its elements are laid out in the standard
    /// row-major order (C order) without gaps, considering its strides.
    pub fn is_contiguous(&self) -> bool {
        if self.shape.is_empty() {
            return true;
        }
        let mut current_stride = 1;
        for i in (0..self.shape.len()).rev() {
            let shape_i = self.shape[i];
            if shape_i == 0 {
                return true;
            }
            if shape_i != 1 {
                if self.strides[i] != current_stride {
                    return false;
                }
                current_stride *= shape_i;
            }
        }
        true
    }
}
