use std::sync::Arc;

use half::f16;

use crate::device::StorageDevice;
use crate::error::ManipuRustError;
use crate::types::DType;

/// Enum representing different buffer types based on device and data type.
/// This allows TensorData to hold different kinds of data buffers.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Data resides on the CPU.
    Cpu(CpuBuffer),
    /// Placeholder for GPU buffer. Stores device and size only.
    /// The actual GPU buffer handle would be managed by a dedicated
    /// GPU memory manager.
    Gpu { device: StorageDevice, len: usize },
    /// Symbolic buffer backing a deferred-mode placeholder tensor.
    /// Carries the dtype but owns no storage; reading data from it fails
    /// with [`ManipuRustError::DataNotAvailable`].
    Symbolic { dtype: DType },
}

/// Enum for CPU-specific buffer types, one variant per supported dtype.
#[derive(Debug, Clone)]
pub enum CpuBuffer {
    F16(Arc<Vec<f16>>),
    F32(Arc<Vec<f32>>),
    F64(Arc<Vec<f64>>),
    I32(Arc<Vec<i32>>),
    I64(Arc<Vec<i64>>),
    Bool(Arc<Vec<bool>>),
}

impl CpuBuffer {
    /// The dtype stored by this buffer.
    pub fn dtype(&self) -> DType {
        match self {
            CpuBuffer::F16(_) => DType::F16,
            CpuBuffer::F32(_) => DType::F32,
            CpuBuffer::F64(_) => DType::F64,
            CpuBuffer::I32(_) => DType::I32,
            CpuBuffer::I64(_) => DType::I64,
            CpuBuffer::Bool(_) => DType::Bool,
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            CpuBuffer::F16(data) => data.len(),
            CpuBuffer::F32(data) => data.len(),
            CpuBuffer::F64(data) => data.len(),
            CpuBuffer::I32(data) => data.len(),
            CpuBuffer::I64(data) => data.len(),
            CpuBuffer::Bool(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! try_get_cpu_accessor {
    ($name:ident, $variant:ident, $ty:ty) => {
        /// Attempts to get a reference to the underlying CPU data of the
        /// matching dtype.
        ///
        /// Returns an error if the buffer is symbolic, not a CPU buffer, or
        /// holds a different dtype.
        pub fn $name(&self) -> Result<&Arc<Vec<$ty>>, ManipuRustError> {
            match self {
                Buffer::Cpu(CpuBuffer::$variant(data_arc)) => Ok(data_arc),
                Buffer::Cpu(other) => Err(ManipuRustError::UnsupportedDType {
                    dtype: other.dtype(),
                    operation: stringify!($name).to_string(),
                }),
                Buffer::Gpu { device, .. } => Err(ManipuRustError::DeviceMismatch {
                    expected: StorageDevice::CPU,
                    actual: *device,
                    operation: stringify!($name).to_string(),
                }),
                Buffer::Symbolic { .. } => Err(ManipuRustError::DataNotAvailable {
                    operation: stringify!($name).to_string(),
                }),
            }
        }
    };
}

impl Buffer {
    /// The dtype stored (or promised, for symbolic buffers) by this buffer.
    /// GPU buffers do not carry a dtype yet.
    pub fn dtype(&self) -> Option<DType> {
        match self {
            Buffer::Cpu(cpu) => Some(cpu.dtype()),
            Buffer::Gpu { .. } => None,
            Buffer::Symbolic { dtype } => Some(*dtype),
        }
    }

    /// Returns true if this buffer backs a deferred-mode placeholder.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Buffer::Symbolic { .. })
    }

    try_get_cpu_accessor!(try_get_cpu_f16, F16, f16);
    try_get_cpu_accessor!(try_get_cpu_f32, F32, f32);
    try_get_cpu_accessor!(try_get_cpu_f64, F64, f64);
    try_get_cpu_accessor!(try_get_cpu_i32, I32, i32);
    try_get_cpu_accessor!(try_get_cpu_i64, I64, i64);
    try_get_cpu_accessor!(try_get_cpu_bool, Bool, bool);
}
