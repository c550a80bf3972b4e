//! Tensor creation helpers (zeros, ones, arange, random tensors).

use num_traits::{One, Zero};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::ManipuRustError;
use crate::tensor::Tensor;

fn zeros_vec<T: Zero + Clone>(numel: usize) -> Vec<T> {
    vec![T::zero(); numel]
}

fn ones_vec<T: One + Clone>(numel: usize) -> Vec<T> {
    vec![T::one(); numel]
}

/// Creates an f32 tensor filled with zeros.
pub fn zeros(shape: &[usize]) -> Result<Tensor, ManipuRustError> {
    let numel = shape.iter().product();
    Tensor::new(zeros_vec::<f32>(numel), shape.to_vec())
}

/// Creates an f64 tensor filled with zeros.
pub fn zeros_f64(shape: &[usize]) -> Result<Tensor, ManipuRustError> {
    let numel = shape.iter().product();
    Tensor::new_f64(zeros_vec::<f64>(numel), shape.to_vec())
}

/// Creates an f32 tensor filled with ones.
pub fn ones(shape: &[usize]) -> Result<Tensor, ManipuRustError> {
    let numel = shape.iter().product();
    Tensor::new(ones_vec::<f32>(numel), shape.to_vec())
}

/// Creates an f64 tensor filled with ones.
pub fn ones_f64(shape: &[usize]) -> Result<Tensor, ManipuRustError> {
    let numel = shape.iter().product();
    Tensor::new_f64(ones_vec::<f64>(numel), shape.to_vec())
}

/// Creates an f32 tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, ManipuRustError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a 1-D f32 tensor holding `0.0, 1.0, ..., (end - 1) as f32`.
pub fn arange(end: usize) -> Result<Tensor, ManipuRustError> {
    let data: Vec<f32> = (0..end).map(|v| v as f32).collect();
    Tensor::new(data, vec![end])
}

/// Creates a 1-D i64 tensor holding `0, 1, ..., end - 1`.
pub fn arange_i64(end: usize) -> Result<Tensor, ManipuRustError> {
    let data: Vec<i64> = (0..end as i64).collect();
    Tensor::new_i64(data, vec![end])
}

/// Creates an f32 tensor with values drawn uniformly from `[0, 1)`.
pub fn rand(shape: &[usize]) -> Result<Tensor, ManipuRustError> {
    let numel: usize = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..numel).map(|_| rng.gen::<f32>()).collect();
    Tensor::new(data, shape.to_vec())
}

/// Creates an f32 tensor with values drawn from the standard normal
/// distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, ManipuRustError> {
    let numel: usize = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..numel)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    Tensor::new(data, shape.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DType;

    #[test]
    fn test_zeros_and_ones() {
        let z = zeros(&[2, 2]).unwrap();
        assert_eq!(z.get_f32_data().unwrap(), vec![0.0; 4]);
        let o = ones(&[2]).unwrap();
        assert_eq!(o.get_f32_data().unwrap(), vec![1.0; 2]);

        let z64 = zeros_f64(&[2]).unwrap();
        assert_eq!(z64.dtype(), DType::F64);
        assert_eq!(z64.get_f64_data().unwrap(), vec![0.0; 2]);
        let o64 = ones_f64(&[3]).unwrap();
        assert_eq!(o64.dtype(), DType::F64);
        assert_eq!(o64.get_f64_data().unwrap(), vec![1.0; 3]);
    }

    #[test]
    fn test_full() {
        let f = full(&[2], 7.5).unwrap();
        assert_eq!(f.get_f32_data().unwrap(), vec![7.5, 7.5]);
    }

    #[test]
    fn test_arange() {
        let a = arange(4).unwrap();
        assert_eq!(a.shape(), vec![4]);
        assert_eq!(a.get_f32_data().unwrap(), vec![0.0, 1.0, 2.0, 3.0]);
        let b = arange_i64(3).unwrap();
        assert_eq!(b.get_i64_data().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_rand_bounds_and_shape() {
        let r = rand(&[4, 5]).unwrap();
        assert_eq!(r.shape(), vec![4, 5]);
        assert_eq!(r.dtype(), DType::F32);
        assert!(r.get_f32_data().unwrap().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_randn_shape_and_dtype() {
        let r = randn(&[6]).unwrap();
        assert_eq!(r.shape(), vec![6]);
        assert_eq!(r.dtype(), DType::F32);
        assert_eq!(r.numel(), 6);
    }
}
