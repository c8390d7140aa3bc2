use super::*;
use crate::data::SongRecord;

fn song(name: &str, artist: &str, year: i32, tempo: f32, tags: &str) -> SongRecord {
    SongRecord {
        track_id: format!("{name}-{artist}"),
        name: name.to_string(),
        artist: artist.to_string(),
        spotify_preview_url: format!("http://p/{name}"),
        year,
        key: 4,
        mode: 1,
        time_signature: 4,
        duration_ms: 200_000.0,
        loudness: -8.0,
        tempo,
        danceability: 0.5,
        energy: 0.7,
        speechiness: 0.05,
        acousticness: 0.2,
        instrumentalness: 0.0,
        liveness: 0.15,
        valence: 0.6,
        tags: tags.to_string(),
    }
}

fn sample_table() -> SongTable {
    SongTable::from_records(vec![
        song("Paranoid", "Black Sabbath", 1970, 163.0, "heavy metal, rock"),
        song("Changes", "Black Sabbath", 1972, 78.0, "ballad, rock"),
        song("Imagine", "John Lennon", 1971, 75.0, "soft rock, classic"),
        song("Jealous Guy", "John Lennon", 1971, 68.0, "soft rock"),
    ])
}

#[test]
fn test_songs_spec_shape() {
    let spec = EncodingSpec::songs();
    assert_eq!(spec.version, 1);
    assert_eq!(spec.steps.len(), 5);
    assert!(spec.validate().is_ok());
    assert_eq!(spec.steps[2].kind, EncoderKind::Tfidf { max_features: 85 });
}

#[test]
fn test_spec_validation_rejects_bad_steps() {
    let mut spec = EncodingSpec::songs();
    spec.steps[0].columns = vec!["year".to_string(), "key".to_string()];
    assert!(spec.validate().is_err());

    let mut spec = EncodingSpec::songs();
    spec.steps[1].columns.clear();
    assert!(spec.validate().is_err());

    let empty = EncodingSpec {
        version: 1,
        steps: Vec::new(),
    };
    assert!(empty.validate().is_err());
}

#[test]
fn test_fit_transform_row_alignment_and_layout() {
    let table = sample_table();
    let mut pipeline = FeaturePipeline::songs();
    let matrix = pipeline.fit_transform(&table).expect("fit_transform");

    assert_eq!(matrix.n_rows(), table.len());

    // Layout: 1 (year freq) + one-hot (2 artists + 1 key + 1 time_signature)
    // + tfidf vocabulary + 4 standard + 7 min-max.
    let n_tfidf = matrix.n_cols() - (1 + 4 + 4 + 7);
    assert!(n_tfidf > 0 && n_tfidf <= 85, "tfidf block {n_tfidf}");

    // Year frequency for 1971 (2 of 4 rows) lands in column 0.
    assert!((matrix.get(2, 0) - 0.5).abs() < 1e-6);
    // One-hot artist block: 2 sorted artists at columns 1..3.
    assert_eq!(matrix.get(0, 1), 1.0); // Black Sabbath
    assert_eq!(matrix.get(2, 2), 1.0); // John Lennon
}

#[test]
fn test_deterministic_refit() {
    let table = sample_table();
    let a = FeaturePipeline::songs().fit_transform(&table).expect("a");
    let b = FeaturePipeline::songs().fit_transform(&table).expect("b");
    assert_eq!(a, b);
}

#[test]
fn test_transform_before_fit_is_error() {
    let pipeline = FeaturePipeline::songs();
    let err = pipeline.transform(&sample_table()).expect_err("not fitted");
    assert!(matches!(err, RecomendarError::NotFitted { .. }));
}

#[test]
fn test_fit_empty_table_is_error() {
    let mut pipeline = FeaturePipeline::songs();
    assert!(pipeline.fit(&SongTable::from_records(Vec::new())).is_err());
}

#[test]
fn test_transform_new_data_in_fitted_space() {
    let table = sample_table();
    let mut pipeline = FeaturePipeline::songs();
    let trained = pipeline.fit_transform(&table).expect("fit_transform");

    // New data with an unseen artist and unseen year.
    let new_table = SongTable::from_records(vec![song(
        "New Song",
        "Unknown Artist",
        1999,
        120.0,
        "rock",
    )]);
    let encoded = pipeline.transform(&new_table).expect("transform");

    assert_eq!(encoded.n_cols(), trained.n_cols());
    // Unseen year: frequency fallback 0.
    assert_eq!(encoded.get(0, 0), 0.0);
    // Unseen artist: all-zero one-hot sub-vector (columns 1..3).
    assert_eq!(encoded.get(0, 1), 0.0);
    assert_eq!(encoded.get(0, 2), 0.0);
}

#[test]
fn test_save_load_json_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pipeline.json");

    let table = sample_table();
    let mut pipeline = FeaturePipeline::songs();
    let before = pipeline.fit_transform(&table).expect("fit_transform");
    pipeline.save_json(&path).expect("save");

    let loaded = FeaturePipeline::load_json(&path).expect("load");
    assert!(loaded.is_fitted());
    assert_eq!(loaded.spec(), pipeline.spec());
    let after = loaded.transform(&table).expect("transform");
    assert_eq!(before, after);
}

#[test]
fn test_save_unfitted_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = FeaturePipeline::songs();
    assert!(pipeline.save_json(dir.path().join("p.json")).is_err());
}
