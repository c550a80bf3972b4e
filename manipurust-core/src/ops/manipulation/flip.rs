use std::collections::BTreeMap;

use super::utils::{ravel_index, unravel_index, validate_axes};
use crate::context;
use crate::error::ManipuRustError;
use crate::graph::AttrValue;
use crate::ops::apply_remap_op;
use crate::tensor::Tensor;

/// Reverses the order of elements along each axis listed in `dims`.
///
/// Reversal is applied independently per listed axis; since single-axis
/// reversals commute, the combined effect does not depend on the order of
/// `dims`. A duplicated axis is reversed twice, which cancels out.
///
/// The output tensor always has the same shape and dtype as the input. In
/// eager mode the result is computed immediately; in deferred mode a `flip`
/// node carrying `{dims}` is appended to the ambient graph and a placeholder
/// is returned.
///
/// # Arguments
/// * `input`: The input tensor.
/// * `dims`: The axes to flip on. Must be non-empty, each axis `< rank`.
pub fn flip_op(input: &Tensor, dims: &[usize]) -> Result<Tensor, ManipuRustError> {
    if dims.is_empty() {
        return Err(ManipuRustError::EmptyAxisList {
            operation: "flip".to_string(),
        });
    }

    let (dtype, shape) = {
        let guard = input.try_read("flip")?;
        (guard.dtype, guard.shape.clone())
    };
    validate_axes(shape.len(), dims, "flip")?;

    let context = context::get_context();
    if context.is_eager() {
        // Each occurrence of an axis toggles its reversal flag: reversing
        // the same axis twice is the identity.
        let mut reversed = vec![false; shape.len()];
        for &axis in dims {
            reversed[axis] = !reversed[axis];
        }

        let src_shape = shape;
        apply_remap_op(
            input,
            move |dst| {
                let mut coords = unravel_index(dst, &src_shape);
                for (axis, flag) in reversed.iter().enumerate() {
                    if *flag && src_shape[axis] > 1 {
                        coords[axis] = src_shape[axis] - 1 - coords[axis];
                    }
                }
                ravel_index(&coords, &src_shape)
            },
            "flip",
        )
    } else {
        let graph_arc = context.graph();
        let mut graph = graph_arc.write().map_err(|_| ManipuRustError::LockError {
            lock_type: "write".to_string(),
            reason: "Failed to lock ambient graph for write in flip_op".to_string(),
        })?;

        let output = graph.placeholder(dtype, shape);
        let mut attrs = BTreeMap::new();
        attrs.insert("dims".to_string(), AttrValue::AxisList(dims.to_vec()));
        graph.append_op("flip", vec![input.clone()], vec![output.clone()], attrs);
        Ok(output)
    }
}
