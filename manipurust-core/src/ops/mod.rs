//! # Tensor Operations Module (`ops`)
//!
//! This module serves as the central hub for defining and organizing tensor
//! operations within ManipuRust. Operations are categorized into submodules
//! based on their functionality.
//!
//! ## Structure:
//!
//! - **Submodules:** Operations are grouped logically (`manipulation`, `view`).
//! - **`_op` Functions:** Each operation has a core function (named `xxx_op`)
//!   that validates its arguments and then dispatches on the ambient
//!   execution context: eager mode runs the CPU kernel immediately, deferred
//!   mode appends an operation node to the graph and returns a placeholder.
//!   The `Tensor` methods (`flip`, `roll`, `reshape`) are thin wrappers over
//!   these functions.
//!
//! ## Key Submodules:
//!
//! - [`manipulation`]: Data-movement operations (flip, roll).
//! - [`view`]: Operations that create new views of tensors without copying data (reshape).

use crate::device::StorageDevice;
use crate::error::ManipuRustError;
use crate::tensor::Tensor;
use crate::types::DType;

// Declare operation submodules
pub mod manipulation;
pub mod view;

/// Applies an index-remapping operation to a tensor, eagerly.
///
/// Both flip and roll are pure data movements: every output element is a
/// copy of exactly one input element. `src_index` maps each destination
/// flat index (row-major) to its source flat index. This helper handles the
/// CPU device check, the contiguity check, dtype dispatch over all
/// supported buffers, the gather loop and output tensor creation.
///
/// # Note
/// Currently requires the input tensor to be contiguous; every tensor
/// produced by this crate's eager operations is.
pub(crate) fn apply_remap_op<F>(
    input: &Tensor,
    src_index: F,
    op_name: &str,
) -> Result<Tensor, ManipuRustError>
where
    F: Fn(usize) -> usize,
{
    let guard = input.try_read(op_name)?;

    // Device Check
    if guard.device != StorageDevice::CPU {
        return Err(ManipuRustError::DeviceMismatch {
            operation: op_name.to_string(),
            expected: StorageDevice::CPU,
            actual: guard.device,
        });
    }

    // Contiguity Check
    if !guard.is_contiguous() {
        return Err(ManipuRustError::UnsupportedOperation(format!(
            "Remap op '{}' currently requires contiguous input tensor. Found strides: {:?}",
            op_name, guard.strides
        )));
    }

    let output_shape = guard.shape.clone();
    let numel = guard.numel();
    let offset = guard.offset;

    match guard.dtype {
        DType::F16 => {
            let buffer = guard.buffer().try_get_cpu_f16()?;
            let output_data: Vec<half::f16> =
                (0..numel).map(|i| buffer[offset + src_index(i)]).collect();
            drop(guard);
            Tensor::new_f16(output_data, output_shape)
        }
        DType::F32 => {
            let buffer = guard.buffer().try_get_cpu_f32()?;
            let output_data: Vec<f32> =
                (0..numel).map(|i| buffer[offset + src_index(i)]).collect();
            drop(guard);
            Tensor::new(output_data, output_shape)
        }
        DType::F64 => {
            let buffer = guard.buffer().try_get_cpu_f64()?;
            let output_data: Vec<f64> =
                (0..numel).map(|i| buffer[offset + src_index(i)]).collect();
            drop(guard);
            Tensor::new_f64(output_data, output_shape)
        }
        DType::I32 => {
            let buffer = guard.buffer().try_get_cpu_i32()?;
            let output_data: Vec<i32> =
                (0..numel).map(|i| buffer[offset + src_index(i)]).collect();
            drop(guard);
            Tensor::new_i32(output_data, output_shape)
        }
        DType::I64 => {
            let buffer = guard.buffer().try_get_cpu_i64()?;
            let output_data: Vec<i64> =
                (0..numel).map(|i| buffer[offset + src_index(i)]).collect();
            drop(guard);
            Tensor::new_i64(output_data, output_shape)
        }
        DType::Bool => {
            let buffer = guard.buffer().try_get_cpu_bool()?;
            let output_data: Vec<bool> =
                (0..numel).map(|i| buffer[offset + src_index(i)]).collect();
            drop(guard);
            Tensor::new_bool(output_data, output_shape)
        }
    }
}
