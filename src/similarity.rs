//! Pure vector math shared by the search flow.

/// Cosine similarity between two equal-length vectors.
///
/// Returns `0.0` when the lengths differ or either magnitude is zero, so a
/// record with a missing or incompatible vector ranks as maximally
/// dissimilar instead of aborting the caller. The result is the plain
/// dot-product-over-magnitudes ratio and is not clamped.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
