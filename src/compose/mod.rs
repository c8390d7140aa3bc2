//! Feature pipeline: a declarative column-to-encoder mapping applied to a
//! song table.
//!
//! The encoding specification is data, not code: an ordered list of steps,
//! each naming its input columns and encoder kind. The final matrix layout is
//! the concatenation of each step's output block in declaration order, so a
//! given spec plus a given fit corpus always yields the same column layout.
//!
//! Fitted state (category sets, vocabularies, scale statistics) is explicit
//! and persistable; transforming new data never refits, which keeps feature
//! spaces from two points in time aligned.
//!
//! # Example
//!
//! ```
//! use recomendar::compose::FeaturePipeline;
//! use recomendar::data::{SongRecord, SongTable};
//!
//! let table = SongTable::from_records(vec![
//!     SongRecord { name: "a".into(), artist: "x".into(), tempo: 120.0, ..SongRecord::default() },
//!     SongRecord { name: "b".into(), artist: "y".into(), tempo: 90.0, ..SongRecord::default() },
//! ]);
//!
//! let mut pipeline = FeaturePipeline::songs();
//! let matrix = pipeline.fit_transform(&table).expect("fit_transform should succeed");
//! assert_eq!(matrix.n_rows(), 2);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::SongTable;
use crate::error::{RecomendarError, Result};
use crate::preprocessing::{FrequencyEncoder, MinMaxScaler, OneHotEncoder, StandardScaler};
use crate::primitives::CsrMatrix;
use crate::text::TfidfVectorizer;

/// Encoding strategy for one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncoderKind {
    /// Replace each category with its fit-set occurrence rate.
    Frequency,
    /// Indicator column per known category, per input column.
    OneHot,
    /// TF-IDF over free text with a capped vocabulary.
    Tfidf {
        /// Vocabulary size cap.
        max_features: usize,
    },
    /// Zero mean, unit variance using fit-time statistics.
    Standard,
    /// Scale to [0, 1] using fit-time min/max.
    MinMax,
}

/// One step of the encoding specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderStep {
    /// Step name, for diagnostics and the persisted pipeline file.
    pub name: String,
    /// Input column names, in order.
    pub columns: Vec<String>,
    /// Encoding strategy.
    pub kind: EncoderKind,
}

impl EncoderStep {
    fn new(name: &str, columns: &[&str], kind: EncoderKind) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            kind,
        }
    }
}

/// Ordered, versioned column-to-encoder mapping.
///
/// Immutable for a given pipeline version. Fit and transform must use the
/// identical spec or feature columns misalign; [`FeaturePipeline`] enforces
/// this by carrying the spec inside the fitted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingSpec {
    /// Spec revision, bumped whenever the mapping changes.
    pub version: u32,
    /// Steps in declaration order = output block order.
    pub steps: Vec<EncoderStep>,
}

impl EncodingSpec {
    /// The production song encoding: frequency-encoded year, one-hot
    /// artist/key/time-signature, TF-IDF tags capped at 85 terms,
    /// standard-scaled duration/loudness/tempo/mode, min-max-scaled bounded
    /// audio features.
    #[must_use]
    pub fn songs() -> Self {
        Self {
            version: 1,
            steps: vec![
                EncoderStep::new("frequency_encode", &["year"], EncoderKind::Frequency),
                EncoderStep::new(
                    "ohe",
                    &["artist", "key", "time_signature"],
                    EncoderKind::OneHot,
                ),
                EncoderStep::new("tfidf", &["tags"], EncoderKind::Tfidf { max_features: 85 }),
                EncoderStep::new(
                    "standard_scale",
                    &["duration_ms", "loudness", "tempo", "mode"],
                    EncoderKind::Standard,
                ),
                EncoderStep::new(
                    "min_max_scale",
                    &[
                        "danceability",
                        "energy",
                        "speechiness",
                        "acousticness",
                        "instrumentalness",
                        "liveness",
                        "valence",
                    ],
                    EncoderKind::MinMax,
                ),
            ],
        }
    }

    /// Checks structural validity: at least one step, no step without
    /// columns, single-column text/frequency steps.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err("EncodingSpec must declare at least one step".into());
        }
        for step in &self.steps {
            if step.columns.is_empty() {
                return Err(format!("step {:?} declares no columns", step.name).into());
            }
            match step.kind {
                EncoderKind::Frequency | EncoderKind::Tfidf { .. } => {
                    if step.columns.len() != 1 {
                        return Err(format!(
                            "step {:?} takes exactly one column, got {}",
                            step.name,
                            step.columns.len()
                        )
                        .into());
                    }
                }
                EncoderKind::OneHot | EncoderKind::Standard | EncoderKind::MinMax => {}
            }
        }
        Ok(())
    }
}

/// Fitted state of one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum FittedEncoder {
    Frequency(FrequencyEncoder),
    /// One encoder per input column, in column order.
    OneHot(Vec<OneHotEncoder>),
    Tfidf(TfidfVectorizer),
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

/// The feature transformer: spec + fitted sub-encoders.
///
/// `fit` learns every sub-encoder from a table; `transform` maps a table
/// (the fit table or new data) into the fitted feature space. Matrix row `i`
/// always corresponds to table record `i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePipeline {
    spec: EncodingSpec,
    fitted: Option<Vec<FittedEncoder>>,
}

impl FeaturePipeline {
    /// Creates an unfitted pipeline from a spec.
    #[must_use]
    pub fn new(spec: EncodingSpec) -> Self {
        Self { spec, fitted: None }
    }

    /// Creates an unfitted pipeline with the production song spec.
    #[must_use]
    pub fn songs() -> Self {
        Self::new(EncodingSpec::songs())
    }

    /// Returns the spec this pipeline was built with.
    #[must_use]
    pub fn spec(&self) -> &EncodingSpec {
        &self.spec
    }

    /// Returns true if the pipeline has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fits every sub-encoder to the table.
    ///
    /// Steps are fitted in parallel; results are assembled in declaration
    /// order, so the outcome is identical to a sequential fit.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid spec, an empty table, or a column the
    /// table does not provide.
    pub fn fit(&mut self, table: &SongTable) -> Result<()> {
        self.spec.validate()?;
        if table.is_empty() {
            return Err("Cannot fit FeaturePipeline on an empty table".into());
        }

        let fitted = self
            .spec
            .steps
            .par_iter()
            .map(|step| fit_step(step, table))
            .collect::<Result<Vec<_>>>()?;

        self.fitted = Some(fitted);
        Ok(())
    }

    /// Transforms a table into the fitted feature space.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, or an error from a sub-encoder.
    pub fn transform(&self, table: &SongTable) -> Result<CsrMatrix> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("FeaturePipeline"))?;

        let blocks = self
            .spec
            .steps
            .par_iter()
            .zip(fitted)
            .map(|(step, encoder)| transform_step(step, encoder, table))
            .collect::<Result<Vec<_>>>()?;

        let refs: Vec<&CsrMatrix> = blocks.iter().collect();
        CsrMatrix::hstack(&refs).map_err(Into::into)
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform(&mut self, table: &SongTable) -> Result<CsrMatrix> {
        self.fit(table)?;
        self.transform(table)
    }

    /// Saves the fitted pipeline (spec + all sub-encoder state) as JSON.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, `Serialization` on encode failure,
    /// `Io` on write failure.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if !self.is_fitted() {
            return Err(RecomendarError::not_fitted("FeaturePipeline"));
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RecomendarError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a fitted pipeline from JSON.
    ///
    /// # Errors
    ///
    /// Returns `Io` on read failure or `Serialization` on decode failure.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| RecomendarError::Serialization(e.to_string()))
    }
}

fn fit_step(step: &EncoderStep, table: &SongTable) -> Result<FittedEncoder> {
    match &step.kind {
        EncoderKind::Frequency => {
            let column = table.categorical_column(&step.columns[0])?;
            let mut encoder = FrequencyEncoder::new();
            encoder.fit(&column)?;
            Ok(FittedEncoder::Frequency(encoder))
        }
        EncoderKind::OneHot => {
            let mut encoders = Vec::with_capacity(step.columns.len());
            for name in &step.columns {
                let column = table.categorical_column(name)?;
                let mut encoder = OneHotEncoder::new();
                encoder.fit(&column)?;
                encoders.push(encoder);
            }
            Ok(FittedEncoder::OneHot(encoders))
        }
        EncoderKind::Tfidf { max_features } => {
            let column = table.text_column(&step.columns[0])?;
            let mut vectorizer = TfidfVectorizer::new().with_max_features(*max_features);
            vectorizer.fit(&column)?;
            Ok(FittedEncoder::Tfidf(vectorizer))
        }
        EncoderKind::Standard => {
            let columns = numeric_columns(table, &step.columns)?;
            let mut scaler = StandardScaler::new();
            scaler.fit(&columns)?;
            Ok(FittedEncoder::Standard(scaler))
        }
        EncoderKind::MinMax => {
            let columns = numeric_columns(table, &step.columns)?;
            let mut scaler = MinMaxScaler::new();
            scaler.fit(&columns)?;
            Ok(FittedEncoder::MinMax(scaler))
        }
    }
}

fn transform_step(
    step: &EncoderStep,
    encoder: &FittedEncoder,
    table: &SongTable,
) -> Result<CsrMatrix> {
    match encoder {
        FittedEncoder::Frequency(enc) => {
            let column = table.categorical_column(&step.columns[0])?;
            let encoded = enc.transform(&column)?;
            CsrMatrix::from_dense_columns(&[encoded]).map_err(Into::into)
        }
        FittedEncoder::OneHot(encoders) => {
            if encoders.len() != step.columns.len() {
                return Err(RecomendarError::dimension_mismatch(
                    format!("{} one-hot columns", encoders.len()),
                    format!("{} spec columns", step.columns.len()),
                ));
            }
            let mut blocks = Vec::with_capacity(encoders.len());
            for (name, enc) in step.columns.iter().zip(encoders) {
                let column = table.categorical_column(name)?;
                blocks.push(enc.transform(&column)?);
            }
            let refs: Vec<&CsrMatrix> = blocks.iter().collect();
            CsrMatrix::hstack(&refs).map_err(Into::into)
        }
        FittedEncoder::Tfidf(vectorizer) => {
            let column = table.text_column(&step.columns[0])?;
            vectorizer.transform(&column)
        }
        FittedEncoder::Standard(scaler) => {
            let columns = numeric_columns(table, &step.columns)?;
            let scaled = scaler.transform(&columns)?;
            CsrMatrix::from_dense_columns(&scaled).map_err(Into::into)
        }
        FittedEncoder::MinMax(scaler) => {
            let columns = numeric_columns(table, &step.columns)?;
            let scaled = scaler.transform(&columns)?;
            CsrMatrix::from_dense_columns(&scaled).map_err(Into::into)
        }
    }
}

fn numeric_columns(table: &SongTable, names: &[String]) -> Result<Vec<Vec<f32>>> {
    names.iter().map(|n| table.numeric_column(n)).collect()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
