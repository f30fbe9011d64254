//! Mixed-radix coordinate encoding (first axis varies fastest)

/// Flatten `coords` into a single index: `Σ coords[i] * Π_{j<i} dimensions[j]`.
///
/// Only the axes present in both slices contribute.
pub fn index_map(coords: &[usize], dimensions: &[usize]) -> usize {
    let mut result = 0;
    let mut scale = 1;
    for (&c, &size) in coords.iter().zip(dimensions) {
        result += c * scale;
        scale *= size;
    }
    result
}

/// Inverse of [`index_map`]. Peels axes off from the highest index down.
pub fn index_unmap(mut index: usize, dimensions: &[usize]) -> Vec<usize> {
    let mut result = vec![0; dimensions.len()];
    let mut divisor: usize = dimensions.iter().product();
    for i in (0..dimensions.len()).rev() {
        divisor /= dimensions[i];
        result[i] = index / divisor;
        index %= divisor;
    }
    result
}
