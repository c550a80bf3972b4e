use manipurust_core::{creation, AttrValue, DType, Dims, GraphScope, ManipuRustError, Tensor};

// Include the common helper module
mod common;
use common::create_test_tensor;

#[test]
fn test_roll_flattened_example() {
    let input = create_test_tensor(
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        vec![3, 3],
    );
    let out = input.roll(1, Dims::Flatten).expect("roll failed");
    assert_eq!(out.shape(), vec![3, 3]);
    assert_eq!(
        out.get_f32_data().unwrap(),
        vec![9.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
    );
}

#[test]
fn test_roll_axis_example() {
    let input = create_test_tensor(
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        vec![3, 3],
    );
    let out = input.roll(1, 0).expect("roll failed");
    assert_eq!(
        out.get_f32_data().unwrap(),
        vec![7.0, 8.0, 9.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
    );
}

#[test]
fn test_flip_joint_example() {
    let input = create_test_tensor((0..12).map(|v| v as f32).collect(), vec![3, 2, 2]);
    let out = input.flip(&[0, 1]).expect("flip failed");
    assert_eq!(out.shape(), vec![3, 2, 2]);
    assert_eq!(
        out.get_f32_data().unwrap(),
        vec![10.0, 11.0, 8.0, 9.0, 6.0, 7.0, 4.0, 5.0, 2.0, 3.0, 0.0, 1.0]
    );
}

#[test]
fn test_flip_involution_on_random_tensor() {
    let t = creation::randn(&[3, 4, 5]).unwrap();
    let round_trip = t.flip(&[0, 2]).unwrap().flip(&[0, 2]).unwrap();
    assert_eq!(
        round_trip.get_f32_data().unwrap(),
        t.get_f32_data().unwrap()
    );
}

#[test]
fn test_roll_inverse_on_random_tensor() {
    let t = creation::rand(&[4, 6]).unwrap();
    for &shift in &[1i64, 3, -5, 24, 0] {
        let back = t
            .roll(shift, Dims::Flatten)
            .unwrap()
            .roll(-shift, Dims::Flatten)
            .unwrap();
        assert_eq!(back.get_f32_data().unwrap(), t.get_f32_data().unwrap());
    }
}

#[test]
fn test_roll_shift_equivalent_modulo_length() {
    let t = creation::arange(10).unwrap();
    let a = t.roll(13, Dims::Flatten).unwrap();
    let b = t.roll(3, Dims::Flatten).unwrap();
    assert_eq!(a.get_f32_data().unwrap(), b.get_f32_data().unwrap());
}

#[test]
fn test_flip_and_roll_f64() {
    let t = manipurust_core::utils::testing::create_test_tensor_f64(
        vec![1.0, 2.0, 3.0, 4.0],
        vec![2, 2],
    );
    let flipped = t.flip(&[1]).unwrap();
    assert_eq!(flipped.dtype(), DType::F64);
    assert_eq!(flipped.get_f64_data().unwrap(), vec![2.0, 1.0, 4.0, 3.0]);

    let rolled = t.roll(1, 1).unwrap();
    assert_eq!(rolled.get_f64_data().unwrap(), vec![2.0, 1.0, 4.0, 3.0]);
}

#[test]
fn test_empty_flip_dims_rejected() {
    let t = creation::zeros(&[2, 2]).unwrap();
    assert!(matches!(
        t.flip(&[]),
        Err(ManipuRustError::EmptyAxisList { .. })
    ));
}

#[test]
fn test_dtype_and_shape_preserved() {
    let t = Tensor::new_i64((0..24).collect(), vec![2, 3, 4]).unwrap();
    let flipped = t.flip(&[1]).unwrap();
    assert_eq!(flipped.dtype(), DType::I64);
    assert_eq!(flipped.shape(), vec![2, 3, 4]);

    let rolled = t.roll(vec![2, -1], vec![0, 2]).unwrap();
    assert_eq!(rolled.dtype(), DType::I64);
    assert_eq!(rolled.shape(), vec![2, 3, 4]);

    let rolled_flat = t.roll(5, Dims::Flatten).unwrap();
    assert_eq!(rolled_flat.dtype(), DType::I64);
    assert_eq!(rolled_flat.shape(), vec![2, 3, 4]);
}

#[test]
fn test_graph_construction_end_to_end() {
    let input = create_test_tensor((0..6).map(|v| v as f32).collect(), vec![2, 3]);

    let scope = GraphScope::new();
    let flipped = input.flip(&[0]).unwrap();
    let rolled = flipped.roll(1, Dims::Flatten).unwrap();
    drop(scope);

    // Dropping the scope restores eager mode; the recorded placeholders stay
    // symbolic and hold no data.
    assert!(flipped.is_symbolic());
    assert!(rolled.is_symbolic());
    assert_eq!(rolled.shape(), vec![2, 3]);
    assert!(matches!(
        rolled.get_f32_data(),
        Err(ManipuRustError::DataNotAvailable { .. })
    ));

    // Back in eager mode, the same expressions compute real data.
    let eager = input.flip(&[0]).unwrap().roll(1, Dims::Flatten).unwrap();
    assert_eq!(
        eager.get_f32_data().unwrap(),
        vec![2.0, 3.0, 4.0, 5.0, 0.0, 1.0]
    );
}

#[test]
fn test_graph_records_flip_then_roll_chain() {
    let input = create_test_tensor((0..6).map(|v| v as f32).collect(), vec![2, 3]);

    let scope = GraphScope::new();
    let flipped = input.flip(&[1]).unwrap();
    let _rolled = flipped.roll(2, 0).unwrap();

    let graph_arc = scope.graph();
    let graph = graph_arc.read().unwrap();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.node(0).unwrap().kind(), "flip");
    assert_eq!(graph.node(1).unwrap().kind(), "roll");
    assert_eq!(
        graph.node(1).unwrap().attr("shifts"),
        Some(&AttrValue::IntList(vec![2]))
    );
}
