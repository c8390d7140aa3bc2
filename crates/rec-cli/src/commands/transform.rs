//! Transform command: CSV table -> fitted pipeline + sparse feature matrix.

use std::fs;
use std::path::Path;
use tracing::info;

use recomendar::compose::FeaturePipeline;
use recomendar::data::SongTable;
use recomendar::serialization::save_matrix;

use crate::error::Result;

pub(crate) fn run(input: &Path, output: &Path, pipeline_path: &Path) -> Result<()> {
    info!(input = %input.display(), "loading song table");
    let table = SongTable::from_csv_path(input)?;
    info!(rows = table.len(), "fitting feature pipeline");

    let mut pipeline = FeaturePipeline::songs();
    let matrix = pipeline.fit_transform(&table)?;
    let (rows, cols) = matrix.shape();
    info!(rows, cols, nnz = matrix.nnz(), "built feature matrix");

    ensure_parent(output)?;
    save_matrix(output, &matrix)?;
    ensure_parent(pipeline_path)?;
    pipeline.save_json(pipeline_path)?;

    println!(
        "Transformed {} songs into a {}x{} feature matrix ({} non-zeros)",
        table.len(),
        rows,
        cols,
        matrix.nnz()
    );
    println!("  matrix:   {}", output.display());
    println!("  pipeline: {}", pipeline_path.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
