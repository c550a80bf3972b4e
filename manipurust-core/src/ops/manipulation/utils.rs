use crate::error::ManipuRustError;

/// Validates that every axis is a valid index into a tensor of the given rank.
pub(crate) fn validate_axes(
    rank: usize,
    dims: &[usize],
    operation: &str,
) -> Result<(), ManipuRustError> {
    for &axis in dims {
        if axis >= rank {
            return Err(ManipuRustError::InvalidAxis {
                axis,
                rank,
                operation: operation.to_string(),
            });
        }
    }
    Ok(())
}

/// Reduces an arbitrary (possibly negative, possibly larger than the axis)
/// shift amount to a canonical value in `0..size`. Size-0 and size-1 axes
/// always normalize to 0: rolling them is a no-op.
pub(crate) fn normalize_shift(shift: i64, size: usize) -> usize {
    if size <= 1 {
        return 0;
    }
    let size = size as i64;
    (((shift % size) + size) % size) as usize
}

/// Converts a row-major flat index into per-axis coordinates.
pub(crate) fn unravel_index(index: usize, shape: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; shape.len()];
    let mut remainder = index;
    for axis in (0..shape.len()).rev() {
        let extent = shape[axis];
        if extent > 0 {
            coords[axis] = remainder % extent;
            remainder /= extent;
        }
    }
    coords
}

/// Converts per-axis coordinates back into a row-major flat index.
pub(crate) fn ravel_index(coords: &[usize], shape: &[usize]) -> usize {
    let mut index = 0;
    let mut stride = 1;
    for axis in (0..shape.len()).rev() {
        if shape[axis] > 0 {
            index += coords[axis] * stride;
            stride *= shape[axis];
        }
    }
    index
}
