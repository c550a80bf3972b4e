use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context;
use crate::error::ManipuRustError;
use crate::graph::AttrValue;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// Reinterprets a tensor with a new shape holding the same elements.
///
/// In eager mode this creates a zero-copy view for contiguous tensors; for
/// non-contiguous tensors reshape is not supported yet. In deferred mode a
/// `reshape` node carrying `{shape}` is appended to the ambient graph and a
/// placeholder of the new shape is returned.
///
/// # Arguments
/// * `input`: The input tensor.
/// * `new_shape`: The desired new shape. Must describe the same number of
///   elements as the input shape.
pub fn reshape_op(input: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, ManipuRustError> {
    let guard = input.try_read("reshape")?;

    let original_numel = guard.numel();
    let new_numel: usize = new_shape.iter().product();
    if original_numel != new_numel {
        return Err(ManipuRustError::ShapeMismatch {
            expected: guard.shape.clone(),
            actual: new_shape,
            operation: "reshape (element count mismatch)".to_string(),
        });
    }

    let context = context::get_context();
    if context.is_eager() {
        if guard.is_symbolic() {
            return Err(ManipuRustError::DataNotAvailable {
                operation: "reshape".to_string(),
            });
        }
        if !guard.is_contiguous() {
            return Err(ManipuRustError::UnsupportedOperation(
                "Reshaping a non-contiguous tensor is not supported yet".to_string(),
            ));
        }

        let new_strides = TensorData::calculate_contiguous_strides(&new_shape);
        let view_td = TensorData::new_view(
            Arc::clone(guard.buffer()),
            guard.device,
            guard.offset,
            new_shape,
            new_strides,
        )?;
        drop(guard);
        Ok(Tensor::from_data(view_td))
    } else {
        let dtype = guard.dtype;
        drop(guard);

        let graph_arc = context.graph();
        let mut graph = graph_arc.write().map_err(|_| ManipuRustError::LockError {
            lock_type: "write".to_string(),
            reason: "Failed to lock ambient graph for write in reshape_op".to_string(),
        })?;

        let output = graph.placeholder(dtype, new_shape.clone());
        let mut attrs = BTreeMap::new();
        attrs.insert("shape".to_string(), AttrValue::Shape(new_shape));
        graph.append_op("reshape", vec![input.clone()], vec![output.clone()], attrs);
        Ok(output)
    }
}
