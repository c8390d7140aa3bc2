//! Cosine similarity over sparse rows.

use rayon::prelude::*;

use crate::error::{RecomendarError, Result};
use crate::primitives::CsrMatrix;

/// Computes cosine similarity between two sparse rows.
///
/// `sim(a, b) = dot(a, b) / (‖a‖ · ‖b‖)`, accumulated in f64. Similarity
/// with any zero vector is defined as 0.0 to avoid division by zero.
///
/// Rows are given as parallel (ascending column indices, values) slices, as
/// returned by [`CsrMatrix::row`].
///
/// # Examples
///
/// ```
/// use recomendar::recommend::similarity::cosine_similarity;
///
/// let sim = cosine_similarity(&[0, 2], &[1.0, 2.0], &[0, 2], &[1.0, 2.0]);
/// assert!((sim - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn cosine_similarity(
    a_indices: &[usize],
    a_values: &[f32],
    b_indices: &[usize],
    b_values: &[f32],
) -> f64 {
    let norm_a = l2_norm(a_values);
    let norm_b = l2_norm(b_values);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    sparse_dot(a_indices, a_values, b_indices, b_values) / (norm_a * norm_b)
}

/// Scores one matrix row against every row, in row order.
///
/// # Errors
///
/// Returns an error if `row` is out of bounds.
pub fn scores_against_all(matrix: &CsrMatrix, row: usize) -> Result<Vec<f64>> {
    if row >= matrix.n_rows() {
        return Err(RecomendarError::dimension_mismatch(
            format!("row < {}", matrix.n_rows()),
            format!("row {row}"),
        ));
    }
    let (q_indices, q_values) = matrix.row(row);
    Ok((0..matrix.n_rows())
        .into_par_iter()
        .map(|i| {
            let (indices, values) = matrix.row(i);
            cosine_similarity(q_indices, q_values, indices, values)
        })
        .collect())
}

/// Ranks scores descending; equal scores keep original row order.
///
/// Returns at most `k` (index, score) pairs. Two calls with identical inputs
/// produce identical orderings: the comparison key (score desc, index asc)
/// is total.
#[must_use]
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(k);
    ranked
}

/// Merge-walk dot product of two sparse rows, accumulated in f64.
fn sparse_dot(a_indices: &[usize], a_values: &[f32], b_indices: &[usize], b_values: &[f32]) -> f64 {
    let mut dot = 0.0;
    let mut i = 0;
    let mut j = 0;
    while i < a_indices.len() && j < b_indices.len() {
        match a_indices[i].cmp(&b_indices[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += f64::from(a_values[i]) * f64::from(b_values[j]);
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

fn l2_norm(values: &[f32]) -> f64 {
    values
        .iter()
        .map(|&v| f64::from(v) * f64::from(v))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;
