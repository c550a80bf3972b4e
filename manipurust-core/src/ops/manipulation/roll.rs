use std::collections::BTreeMap;

use super::utils::{normalize_shift, ravel_index, unravel_index, validate_axes};
use crate::context;
use crate::error::ManipuRustError;
use crate::graph::AttrValue;
use crate::ops::apply_remap_op;
use crate::ops::view::reshape_op;
use crate::tensor::Tensor;
use crate::types::DType;

/// Shift amounts for [`roll_op`]: a single integer or one amount per axis.
///
/// Scalar arguments are normalized to a single-element sequence at the
/// boundary, before any other processing.
#[derive(Debug, Clone, PartialEq)]
pub enum Shifts {
    One(i64),
    Many(Vec<i64>),
}

impl Shifts {
    pub(crate) fn into_vec(self) -> Vec<i64> {
        match self {
            Shifts::One(shift) => vec![shift],
            Shifts::Many(shifts) => shifts,
        }
    }
}

impl From<i64> for Shifts {
    fn from(shift: i64) -> Self {
        Shifts::One(shift)
    }
}

impl From<Vec<i64>> for Shifts {
    fn from(shifts: Vec<i64>) -> Self {
        Shifts::Many(shifts)
    }
}

impl From<&[i64]> for Shifts {
    fn from(shifts: &[i64]) -> Self {
        Shifts::Many(shifts.to_vec())
    }
}

/// Axis selection for [`roll_op`]: roll over the flattened tensor, a single
/// axis, or a list of axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Dims {
    /// Flatten the tensor to one dimension, roll it, then restore the
    /// original shape.
    Flatten,
    One(usize),
    Many(Vec<usize>),
}

impl From<usize> for Dims {
    fn from(axis: usize) -> Self {
        Dims::One(axis)
    }
}

impl From<Vec<usize>> for Dims {
    fn from(axes: Vec<usize>) -> Self {
        Dims::Many(axes)
    }
}

impl From<&[usize]> for Dims {
    fn from(axes: &[usize]) -> Self {
        Dims::Many(axes.to_vec())
    }
}

/// Rolls the `input` tensor along the given axes. Elements shifted beyond
/// the last position are re-introduced at the first position.
///
/// A positive shift moves each element toward higher indices:
/// `output[c] = input[(c - shift) mod size]` along each rolled axis. Shifts
/// along distinct axes commute; shifts listed twice for the same axis
/// accumulate.
///
/// With [`Dims::Flatten`] the tensor is flattened to one dimension, rolled
/// by the (sole) shift amount, and restored to its original shape. The
/// output always has the same shape and dtype as the input. Bool tensors
/// are not supported.
///
/// In eager mode the result is computed immediately; in deferred mode a
/// `roll` node carrying `{dims, shifts}` is appended to the ambient graph
/// (bracketed by `reshape` nodes on the flatten path) and a placeholder is
/// returned.
pub fn roll_op(input: &Tensor, shifts: Shifts, dims: Dims) -> Result<Tensor, ManipuRustError> {
    let (dtype, origin_shape) = {
        let guard = input.try_read("roll")?;
        (guard.dtype, guard.shape.clone())
    };
    if dtype == DType::Bool {
        return Err(ManipuRustError::UnsupportedDType {
            dtype,
            operation: "roll".to_string(),
        });
    }

    // Normalize scalar arguments to sequences before any other processing.
    let shifts = shifts.into_vec();
    let axes = match dims {
        Dims::Flatten => None,
        Dims::One(axis) => Some(vec![axis]),
        Dims::Many(axes) => Some(axes),
    };

    match axes {
        None => {
            if shifts.len() != 1 {
                return Err(ManipuRustError::ShiftsDimsMismatch {
                    shifts: shifts.len(),
                    dims: 1,
                });
            }
            let numel: usize = origin_shape.iter().product();
            let flat = reshape_op(input, vec![numel])?;
            let rolled = dispatch_roll(&flat, &[0], &shifts)?;
            reshape_op(&rolled, origin_shape)
        }
        Some(axes) => {
            if shifts.len() != axes.len() {
                return Err(ManipuRustError::ShiftsDimsMismatch {
                    shifts: shifts.len(),
                    dims: axes.len(),
                });
            }
            validate_axes(origin_shape.len(), &axes, "roll")?;
            dispatch_roll(input, &axes, &shifts)
        }
    }
}

/// Mode dispatch for a validated roll: run the gather kernel eagerly, or
/// append a `roll` node and return a placeholder.
fn dispatch_roll(
    input: &Tensor,
    dims: &[usize],
    shifts: &[i64],
) -> Result<Tensor, ManipuRustError> {
    let (dtype, shape) = {
        let guard = input.try_read("roll")?;
        (guard.dtype, guard.shape.clone())
    };

    let context = context::get_context();
    if context.is_eager() {
        // Shifts along the same axis accumulate before normalization.
        let mut accumulated = vec![0i64; shape.len()];
        for (&axis, &shift) in dims.iter().zip(shifts.iter()) {
            accumulated[axis] += shift;
        }
        let steps: Vec<usize> = accumulated
            .iter()
            .zip(shape.iter())
            .map(|(&shift, &size)| normalize_shift(shift, size))
            .collect();

        let src_shape = shape;
        apply_remap_op(
            input,
            move |dst| {
                let mut coords = unravel_index(dst, &src_shape);
                for axis in 0..src_shape.len() {
                    let size = src_shape[axis];
                    if size > 1 && steps[axis] != 0 {
                        coords[axis] = (coords[axis] + size - steps[axis]) % size;
                    }
                }
                ravel_index(&coords, &src_shape)
            },
            "roll",
        )
    } else {
        let graph_arc = context.graph();
        let mut graph = graph_arc.write().map_err(|_| ManipuRustError::LockError {
            lock_type: "write".to_string(),
            reason: "Failed to lock ambient graph for write in roll_op".to_string(),
        })?;

        let output = graph.placeholder(dtype, shape);
        let mut attrs = BTreeMap::new();
        attrs.insert("dims".to_string(), AttrValue::AxisList(dims.to_vec()));
        attrs.insert("shifts".to_string(), AttrValue::IntList(shifts.to_vec()));
        graph.append_op("roll", vec![input.clone()], vec![output.clone()], attrs);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GraphScope;
    use crate::utils::testing::{check_tensor_near, create_test_tensor};

    fn sample_3x3() -> Tensor {
        create_test_tensor((1..=9).map(|v| v as f32).collect(), vec![3, 3])
    }

    #[test]
    fn test_roll_flattened() {
        let t = sample_3x3();
        let rolled = t.roll(1, Dims::Flatten).unwrap();
        check_tensor_near(
            &rolled,
            &[3, 3],
            &[9.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
            0.0,
        );
    }

    #[test]
    fn test_roll_single_axis() {
        let t = sample_3x3();
        let rolled = t.roll(1, 0).unwrap();
        check_tensor_near(
            &rolled,
            &[3, 3],
            &[7.0, 8.0, 9.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            0.0,
        );
    }

    #[test]
    fn test_roll_multiple_axes() {
        let t = sample_3x3();
        // Slice arguments exercise the borrowed From impls.
        let rolled = t.roll(&[1i64, -1][..], &[0usize, 1][..]).unwrap();
        check_tensor_near(
            &rolled,
            &[3, 3],
            &[8.0, 9.0, 7.0, 2.0, 3.0, 1.0, 5.0, 6.0, 4.0],
            0.0,
        );
    }

    #[test]
    fn test_roll_negative_shift() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![5]);
        let rolled = t.roll(-2, 0).unwrap();
        check_tensor_near(&rolled, &[5], &[3.0, 4.0, 5.0, 1.0, 2.0], 0.0);
    }

    #[test]
    fn test_roll_shift_wraps_modulo_length() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![5]);
        let small = t.roll(2, Dims::Flatten).unwrap();
        let large = t.roll(7, Dims::Flatten).unwrap();
        assert_eq!(
            small.get_f32_data().unwrap(),
            large.get_f32_data().unwrap()
        );
    }

    #[test]
    fn test_roll_zero_shift_is_identity() {
        let t = sample_3x3();
        let rolled = t.roll(0, Dims::Flatten).unwrap();
        assert_eq!(rolled.get_f32_data().unwrap(), t.get_f32_data().unwrap());
        let full_turn = t.roll(9, Dims::Flatten).unwrap();
        assert_eq!(full_turn.get_f32_data().unwrap(), t.get_f32_data().unwrap());
    }

    #[test]
    fn test_roll_round_trip() {
        let t = create_test_tensor((0..24).map(|v| v as f32).collect(), vec![2, 3, 4]);
        let there = t.roll(vec![5, -2], vec![1, 2]).unwrap();
        let back = there.roll(vec![-5, 2], vec![1, 2]).unwrap();
        assert_eq!(back.get_f32_data().unwrap(), t.get_f32_data().unwrap());
    }

    #[test]
    fn test_roll_duplicate_axes_accumulate() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![5]);
        let twice = t.roll(vec![1, 1], vec![0, 0]).unwrap();
        let once = t.roll(2, 0).unwrap();
        assert_eq!(twice.get_f32_data().unwrap(), once.get_f32_data().unwrap());
    }

    #[test]
    fn test_roll_size_one_axis_is_noop() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0], vec![1, 3]);
        let rolled = t.roll(4, 0).unwrap();
        assert_eq!(rolled.get_f32_data().unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_roll_shifts_dims_length_mismatch() {
        let t = sample_3x3();
        let err = t.roll(vec![1, 2], 0).unwrap_err();
        assert_eq!(err, ManipuRustError::ShiftsDimsMismatch { shifts: 2, dims: 1 });
        let err = t.roll(vec![1, 2], Dims::Flatten).unwrap_err();
        assert_eq!(err, ManipuRustError::ShiftsDimsMismatch { shifts: 2, dims: 1 });
    }

    #[test]
    fn test_roll_axis_out_of_range() {
        let t = sample_3x3();
        let err = t.roll(1, 2).unwrap_err();
        assert!(matches!(err, ManipuRustError::InvalidAxis { axis: 2, rank: 2, .. }));
    }

    #[test]
    fn test_roll_bool_rejected() {
        let t = Tensor::new_bool(vec![true, false], vec![2]).unwrap();
        let err = t.roll(1, 0).unwrap_err();
        assert_eq!(
            err,
            ManipuRustError::UnsupportedDType {
                dtype: DType::Bool,
                operation: "roll".to_string(),
            }
        );
    }

    #[test]
    fn test_roll_preserves_integer_dtype() {
        let t = Tensor::new_i32(vec![1, 2, 3, 4], vec![4]).unwrap();
        let rolled = t.roll(1, 0).unwrap();
        assert_eq!(rolled.dtype(), DType::I32);
        assert_eq!(rolled.get_i32_data().unwrap(), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_roll_f16() {
        use half::f16;
        let data: Vec<f16> = [1.0f32, 2.0, 3.0].iter().map(|&v| f16::from_f32(v)).collect();
        let t = Tensor::new_f16(data, vec![3]).unwrap();
        let rolled = t.roll(1, 0).unwrap();
        assert_eq!(rolled.dtype(), DType::F16);
        assert_eq!(
            rolled.get_f16_data().unwrap(),
            [3.0f32, 1.0, 2.0]
                .iter()
                .map(|&v| f16::from_f32(v))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_roll_deferred_flatten_records_reshape_roll_reshape() {
        let t = sample_3x3();
        let scope = GraphScope::new();
        let out = t.roll(1, Dims::Flatten).unwrap();

        assert!(out.is_symbolic());
        assert_eq!(out.shape(), vec![3, 3]);
        assert_eq!(out.dtype(), DType::F32);

        let graph_arc = scope.graph();
        let graph = graph_arc.read().unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.node(0).unwrap().kind(), "reshape");
        assert_eq!(graph.node(1).unwrap().kind(), "roll");
        assert_eq!(graph.node(2).unwrap().kind(), "reshape");

        let roll_node = graph.node(1).unwrap();
        assert_eq!(roll_node.attr("dims"), Some(&AttrValue::AxisList(vec![0])));
        assert_eq!(roll_node.attr("shifts"), Some(&AttrValue::IntList(vec![1])));
        // The intermediate roll output is the flattened placeholder.
        assert_eq!(roll_node.outputs()[0].shape(), vec![9]);
        // The trailing reshape restores the original shape.
        assert_eq!(
            graph.node(2).unwrap().attr("shape"),
            Some(&AttrValue::Shape(vec![3, 3]))
        );
    }

    #[test]
    fn test_roll_deferred_with_axes_records_single_node() {
        let t = sample_3x3();
        let scope = GraphScope::new();
        let out = t.roll(vec![1, -1], vec![0, 1]).unwrap();

        assert!(out.is_symbolic());
        let graph_arc = scope.graph();
        let graph = graph_arc.read().unwrap();
        assert_eq!(graph.len(), 1);
        let node = graph.node(0).unwrap();
        assert_eq!(node.kind(), "roll");
        assert_eq!(node.attr("dims"), Some(&AttrValue::AxisList(vec![0, 1])));
        assert_eq!(node.attr("shifts"), Some(&AttrValue::IntList(vec![1, -1])));
    }

    #[test]
    fn test_roll_deferred_still_validates() {
        let t = Tensor::new_bool(vec![true, false], vec![2]).unwrap();
        let scope = GraphScope::new();
        assert!(t.roll(1, 0).is_err());
        assert!(scope.graph().read().unwrap().is_empty());
    }
}
