//! Top-K content-based recommendations for a query song.

use serde::Serialize;

use crate::data::{normalize, SongTable};
use crate::error::{RecomendarError, Result};
use crate::primitives::CsrMatrix;
use crate::recommend::similarity::{scores_against_all, top_k};

/// One recommended song, most similar first in the result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub artist: String,
    pub spotify_preview_url: String,
    /// Cosine similarity to the query song, in [0, 1] for non-negative
    /// feature spaces.
    pub score: f64,
}

/// Recommends the top `k` songs most similar to the query.
///
/// The query is resolved by exact case-insensitive (name, artist) match
/// (first row wins on duplicates), scored against every matrix row, and
/// ranked descending with ties broken by original row order. The query row,
/// any other row carrying the query's (name, artist) pair, and duplicate
/// (name, artist) pairs are excluded from the result, so the list never
/// echoes the query and never repeats an entry.
///
/// # Errors
///
/// Returns `SongNotFound` if no row matches the query, or a dimension error
/// if the table and matrix row counts differ.
///
/// # Examples
///
/// ```
/// use recomendar::data::{SongRecord, SongTable};
/// use recomendar::primitives::CsrMatrix;
/// use recomendar::recommend::recommend;
///
/// let table = SongTable::from_records(vec![
///     SongRecord { name: "a".into(), artist: "x".into(), ..SongRecord::default() },
///     SongRecord { name: "b".into(), artist: "y".into(), ..SongRecord::default() },
/// ]);
/// let matrix = CsrMatrix::from_dense_rows(&[vec![1.0, 0.0], vec![1.0, 0.0]]).expect("rows");
///
/// let results = recommend("a", "x", &table, &matrix, 5).expect("query exists");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].name, "b");
/// assert!((results[0].score - 1.0).abs() < 1e-9);
/// ```
pub fn recommend(
    song_name: &str,
    artist_name: &str,
    table: &SongTable,
    matrix: &CsrMatrix,
    k: usize,
) -> Result<Vec<Recommendation>> {
    if table.len() != matrix.n_rows() {
        return Err(RecomendarError::dimension_mismatch(
            format!("{} table rows", table.len()),
            format!("{} matrix rows", matrix.n_rows()),
        ));
    }

    let query_row = table.find(song_name, artist_name)?;
    let query_pair = (
        normalize(&table.records()[query_row].name),
        normalize(&table.records()[query_row].artist),
    );

    let scores = scores_against_all(matrix, query_row)?;
    let ranked = top_k(&scores, scores.len());

    let mut results = Vec::with_capacity(k);
    let mut seen: std::collections::HashSet<(String, String)> = std::collections::HashSet::new();
    for (row, score) in ranked {
        if results.len() == k {
            break;
        }
        if row == query_row {
            continue;
        }
        let record = &table.records()[row];
        let pair = (normalize(&record.name), normalize(&record.artist));
        if pair == query_pair || !seen.insert(pair) {
            continue;
        }
        results.push(Recommendation {
            name: record.name.clone(),
            artist: record.artist.clone(),
            spotify_preview_url: record.spotify_preview_url.clone(),
            score,
        });
    }

    Ok(results)
}

#[cfg(test)]
#[path = "content_based_tests.rs"]
mod tests;
