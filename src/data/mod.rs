//! Song table: the typed view over the cleaned input CSV.
//!
//! One [`SongRecord`] per row. Identifier, name and preview-link columns are
//! never encoded; they ride along for joining recommendation results back to
//! human-readable output.

mod csv;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RecomendarError, Result};

/// Columns that must be present in the input CSV.
///
/// `tags` is deliberately absent: a table without a tags column is treated as
/// all-empty tag text.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "track_id",
    "name",
    "artist",
    "spotify_preview_url",
    "year",
    "key",
    "mode",
    "time_signature",
    "duration_ms",
    "loudness",
    "tempo",
    "danceability",
    "energy",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
];

/// One row of the cleaned song dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongRecord {
    pub track_id: String,
    pub name: String,
    pub artist: String,
    pub spotify_preview_url: String,
    pub year: i32,
    pub key: i32,
    pub mode: i32,
    pub time_signature: i32,
    pub duration_ms: f32,
    pub loudness: f32,
    pub tempo: f32,
    pub danceability: f32,
    pub energy: f32,
    pub speechiness: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
    pub liveness: f32,
    pub valence: f32,
    pub tags: String,
}

/// Row-ordered song table.
///
/// Row order is load order and is the alignment contract with any feature
/// matrix produced from this table: matrix row `i` encodes record `i`.
///
/// # Examples
///
/// ```
/// use recomendar::data::{SongRecord, SongTable};
///
/// let table = SongTable::from_records(vec![
///     SongRecord {
///         name: "Paranoid".to_string(),
///         artist: "Black Sabbath".to_string(),
///         ..SongRecord::default()
///     },
/// ]);
/// assert_eq!(table.find("paranoid", "BLACK SABBATH").expect("present"), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SongTable {
    records: Vec<SongRecord>,
}

/// Canonical case-insensitive form used for all (name, artist) comparisons.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

impl SongTable {
    /// Creates a table from in-memory records.
    #[must_use]
    pub fn from_records(records: Vec<SongRecord>) -> Self {
        Self { records }
    }

    /// Loads a table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `MissingColumn` if a required
    /// column is absent, `InvalidCell` if a numeric cell fails to parse.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text)
    }

    /// Parses a table from CSV text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SongTable::from_csv_path`], minus I/O.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        let (header, rows) = csv::parse(text)?;

        for column in REQUIRED_COLUMNS {
            if !header.iter().any(|h| h == column) {
                return Err(RecomendarError::missing_column(column));
            }
        }

        let position = |column: &str| -> Result<usize> {
            header
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| RecomendarError::missing_column(column))
        };

        let col_track_id = position("track_id")?;
        let col_name = position("name")?;
        let col_artist = position("artist")?;
        let col_preview = position("spotify_preview_url")?;
        let col_year = position("year")?;
        let col_key = position("key")?;
        let col_mode = position("mode")?;
        let col_time_signature = position("time_signature")?;
        let col_duration = position("duration_ms")?;
        let col_loudness = position("loudness")?;
        let col_tempo = position("tempo")?;
        let col_danceability = position("danceability")?;
        let col_energy = position("energy")?;
        let col_speechiness = position("speechiness")?;
        let col_acousticness = position("acousticness")?;
        let col_instrumentalness = position("instrumentalness")?;
        let col_liveness = position("liveness")?;
        let col_valence = position("valence")?;
        // Optional: absent column means no tag text anywhere.
        let col_tags = header.iter().position(|h| h == "tags");

        let mut records = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            records.push(SongRecord {
                track_id: row[col_track_id].clone(),
                name: row[col_name].clone(),
                artist: row[col_artist].clone(),
                spotify_preview_url: row[col_preview].clone(),
                year: parse_int(&row[col_year], "year", row_idx)?,
                key: parse_int(&row[col_key], "key", row_idx)?,
                mode: parse_int(&row[col_mode], "mode", row_idx)?,
                time_signature: parse_int(&row[col_time_signature], "time_signature", row_idx)?,
                duration_ms: parse_float(&row[col_duration], "duration_ms", row_idx)?,
                loudness: parse_float(&row[col_loudness], "loudness", row_idx)?,
                tempo: parse_float(&row[col_tempo], "tempo", row_idx)?,
                danceability: parse_float(&row[col_danceability], "danceability", row_idx)?,
                energy: parse_float(&row[col_energy], "energy", row_idx)?,
                speechiness: parse_float(&row[col_speechiness], "speechiness", row_idx)?,
                acousticness: parse_float(&row[col_acousticness], "acousticness", row_idx)?,
                instrumentalness: parse_float(
                    &row[col_instrumentalness],
                    "instrumentalness",
                    row_idx,
                )?,
                liveness: parse_float(&row[col_liveness], "liveness", row_idx)?,
                valence: parse_float(&row[col_valence], "valence", row_idx)?,
                tags: col_tags.map(|c| row[c].clone()).unwrap_or_default(),
            });
        }

        Ok(Self { records })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns record `i`, if in bounds.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&SongRecord> {
        self.records.get(i)
    }

    /// Returns all records in row order.
    #[must_use]
    pub fn records(&self) -> &[SongRecord] {
        &self.records
    }

    /// Resolves a (name, artist) pair to its row index.
    ///
    /// Comparison is exact after [`normalize`] on both sides. When duplicate
    /// pairs exist the first row wins.
    ///
    /// # Errors
    ///
    /// Returns `SongNotFound` if no row matches; never an empty default.
    pub fn find(&self, name: &str, artist: &str) -> Result<usize> {
        let want_name = normalize(name);
        let want_artist = normalize(artist);
        self.records
            .iter()
            .position(|r| normalize(&r.name) == want_name && normalize(&r.artist) == want_artist)
            .ok_or_else(|| RecomendarError::SongNotFound {
                name: want_name.clone(),
                artist: want_artist.clone(),
            })
    }

    /// Returns a categorical column stringified, ready for category encoding.
    ///
    /// Numeric-looking categories (`year`, `key`, `time_signature`) are
    /// stringified here so they cannot leak into the scaled columns.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` for a name that is not a categorical column.
    pub fn categorical_column(&self, column: &str) -> Result<Vec<String>> {
        let values = match column {
            "artist" => self.records.iter().map(|r| r.artist.clone()).collect(),
            "year" => self.records.iter().map(|r| r.year.to_string()).collect(),
            "key" => self.records.iter().map(|r| r.key.to_string()).collect(),
            "time_signature" => self
                .records
                .iter()
                .map(|r| r.time_signature.to_string())
                .collect(),
            _ => return Err(RecomendarError::missing_column(column)),
        };
        Ok(values)
    }

    /// Returns a numeric column as f32 values.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` for a name that is not a numeric column.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f32>> {
        let values = match column {
            "duration_ms" => self.records.iter().map(|r| r.duration_ms).collect(),
            "loudness" => self.records.iter().map(|r| r.loudness).collect(),
            "tempo" => self.records.iter().map(|r| r.tempo).collect(),
            "mode" => self.records.iter().map(|r| r.mode as f32).collect(),
            "danceability" => self.records.iter().map(|r| r.danceability).collect(),
            "energy" => self.records.iter().map(|r| r.energy).collect(),
            "speechiness" => self.records.iter().map(|r| r.speechiness).collect(),
            "acousticness" => self.records.iter().map(|r| r.acousticness).collect(),
            "instrumentalness" => self.records.iter().map(|r| r.instrumentalness).collect(),
            "liveness" => self.records.iter().map(|r| r.liveness).collect(),
            "valence" => self.records.iter().map(|r| r.valence).collect(),
            _ => return Err(RecomendarError::missing_column(column)),
        };
        Ok(values)
    }

    /// Returns a text column; missing tag text is the empty string.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` for a name that is not a text column.
    pub fn text_column(&self, column: &str) -> Result<Vec<&str>> {
        match column {
            "tags" => Ok(self.records.iter().map(|r| r.tags.as_str()).collect()),
            _ => Err(RecomendarError::missing_column(column)),
        }
    }
}

fn parse_int(value: &str, column: &str, row: usize) -> Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| RecomendarError::InvalidCell {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
}

fn parse_float(value: &str, column: &str, row: usize) -> Result<f32> {
    value
        .trim()
        .parse()
        .map_err(|_| RecomendarError::InvalidCell {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
