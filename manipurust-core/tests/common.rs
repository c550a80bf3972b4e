use manipurust_core::Tensor;

// Helper function to create a basic f32 tensor for testing.
// Made available to the integration test modules that include this file.
// Added allow(dead_code) because usage across different test crates isn't detected easily.
#[allow(dead_code)]
pub fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}
