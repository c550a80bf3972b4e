use crate::device::StorageDevice;
use crate::types::DType;
use thiserror::Error;

/// Custom error type for the ManipuRust framework.
///
/// Every argument-validation failure is raised synchronously, before any
/// kernel invocation or graph mutation takes place.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing, Clone added
pub enum ManipuRustError {
    #[error("Unsupported dtype {dtype:?} for operation {operation}")]
    UnsupportedDType { dtype: DType, operation: String },

    #[error("Axis list must not be empty for operation {operation}")]
    EmptyAxisList { operation: String },

    #[error("Invalid axis {axis} for rank {rank} during operation {operation}")]
    InvalidAxis {
        axis: usize,
        rank: usize,
        operation: String,
    },

    #[error("Shift count {shifts} does not match axis count {dims}")]
    ShiftsDimsMismatch { shifts: usize, dims: usize },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Data is not available for symbolic tensor during operation {operation}")]
    DataNotAvailable { operation: String },

    #[error("Device mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DeviceMismatch {
        expected: StorageDevice,
        actual: StorageDevice,
        operation: String,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Lock error ({lock_type}): {reason}")]
    LockError { lock_type: String, reason: String },

    #[error("Internal error: {0}")]
    InternalError(String),
    // Add more specific errors as needed
}
