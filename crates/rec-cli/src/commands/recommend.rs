//! Recommend command: top-K similarity query over a saved feature matrix.

use std::path::Path;
use tracing::info;

use recomendar::data::SongTable;
use recomendar::recommend::recommend;
use recomendar::serialization::load_matrix;

use crate::error::{CliError, Result};

pub(crate) fn run(
    song: &str,
    artist: &str,
    data: &Path,
    matrix_path: &Path,
    k: usize,
    json: bool,
) -> Result<()> {
    let table = SongTable::from_csv_path(data)?;
    let matrix = load_matrix(matrix_path)?;
    info!(
        rows = table.len(),
        cols = matrix.n_cols(),
        "scoring query against catalog"
    );

    let results = recommend(song, artist, &table, &matrix, k)?;

    if json {
        let out = serde_json::to_string_pretty(&results)
            .map_err(|e| CliError::Recomendar(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    if results.is_empty() {
        println!("No similar songs found for {song:?} by {artist:?}");
        return Ok(());
    }

    println!("Top {} songs similar to {song:?} by {artist:?}:", results.len());
    for (rank, r) in results.iter().enumerate() {
        println!(
            "{:>3}. [{:.4}] {} by {} ({})",
            rank + 1,
            r.score,
            r.name,
            r.artist,
            r.spotify_preview_url
        );
    }
    Ok(())
}
