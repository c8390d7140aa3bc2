//! Preprocessing encoders for categorical and numeric columns.
//!
//! Every encoder learns its state at fit time and holds it in `Option`
//! fields; transforming before fitting is a typed error. Fitted state is
//! serde-serializable so a pipeline can be persisted and reloaded without
//! refitting (feature spaces from two fits may not align).
//!
//! # Example
//!
//! ```
//! use recomendar::preprocessing::StandardScaler;
//!
//! let mut scaler = StandardScaler::new();
//! let scaled = scaler
//!     .fit_transform(&[vec![1.0, 2.0, 3.0]])
//!     .expect("fit_transform should succeed");
//! let mean: f32 = scaled[0].iter().sum::<f32>() / 3.0;
//! assert!(mean.abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{RecomendarError, Result};
use crate::primitives::CsrMatrix;

/// Replaces a categorical value with its relative occurrence rate in the fit
/// set.
///
/// Categories unseen at fit time map to a fallback (default 0.0).
///
/// # Examples
///
/// ```
/// use recomendar::preprocessing::FrequencyEncoder;
///
/// let years: Vec<String> = ["1970", "1970", "1972"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let mut enc = FrequencyEncoder::new();
/// enc.fit(&years).expect("fit should succeed");
/// let out = enc.transform(&years).expect("transform should succeed");
/// assert!((out[0] - 2.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyEncoder {
    /// Category → count/n, computed during fit.
    frequencies: Option<BTreeMap<String, f32>>,
    /// Value emitted for categories unseen at fit time.
    fallback: f32,
}

impl Default for FrequencyEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyEncoder {
    /// Creates a new `FrequencyEncoder` with a 0.0 unseen-category fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frequencies: None,
            fallback: 0.0,
        }
    }

    /// Sets the value emitted for categories unseen at fit time.
    #[must_use]
    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.frequencies.is_some()
    }

    /// Learns normalized category frequencies.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty column.
    pub fn fit(&mut self, column: &[String]) -> Result<()> {
        if column.is_empty() {
            return Err("Cannot fit FrequencyEncoder on an empty column".into());
        }
        let n = column.len() as f32;
        let mut counts: BTreeMap<String, f32> = BTreeMap::new();
        for value in column {
            *counts.entry(value.clone()).or_insert(0.0) += 1.0;
        }
        for count in counts.values_mut() {
            *count /= n;
        }
        self.frequencies = Some(counts);
        Ok(())
    }

    /// Maps each value to its fit-time frequency.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if called before `fit`.
    pub fn transform(&self, column: &[String]) -> Result<Vec<f32>> {
        let frequencies = self
            .frequencies
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("FrequencyEncoder"))?;
        Ok(column
            .iter()
            .map(|v| frequencies.get(v).copied().unwrap_or(self.fallback))
            .collect())
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform(&mut self, column: &[String]) -> Result<Vec<f32>> {
        self.fit(column)?;
        self.transform(column)
    }
}

/// Represents a categorical value as a sparse indicator vector over the
/// categories seen at fit time.
///
/// Unseen categories transform to an all-zero sub-vector, never an error.
///
/// # Examples
///
/// ```
/// use recomendar::preprocessing::OneHotEncoder;
///
/// let keys: Vec<String> = ["4", "9", "4"].iter().map(|s| s.to_string()).collect();
/// let mut enc = OneHotEncoder::new();
/// let m = enc.fit_transform(&keys).expect("fit_transform should succeed");
/// assert_eq!(m.shape(), (3, 2));
/// assert_eq!(m.get(0, 0), 1.0); // "4" is the first sorted category
/// assert_eq!(m.get(1, 1), 1.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Sorted distinct categories, computed during fit.
    categories: Option<Vec<String>>,
}

impl OneHotEncoder {
    /// Creates a new `OneHotEncoder`.
    #[must_use]
    pub fn new() -> Self {
        Self { categories: None }
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }

    /// Returns the number of output columns (known categories).
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn n_categories(&self) -> usize {
        self.categories
            .as_ref()
            .expect("Encoder not fitted. Call fit() first.")
            .len()
    }

    /// Learns the sorted distinct category set.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty column.
    pub fn fit(&mut self, column: &[String]) -> Result<()> {
        if column.is_empty() {
            return Err("Cannot fit OneHotEncoder on an empty column".into());
        }
        let mut categories: Vec<String> = column.to_vec();
        categories.sort_unstable();
        categories.dedup();
        self.categories = Some(categories);
        Ok(())
    }

    /// Emits one indicator column per known category.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if called before `fit`.
    pub fn transform(&self, column: &[String]) -> Result<CsrMatrix> {
        let categories = self
            .categories
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("OneHotEncoder"))?;

        let mut triplets = Vec::with_capacity(column.len());
        for (row, value) in column.iter().enumerate() {
            if let Ok(col) = categories.binary_search(value) {
                triplets.push((row, col, 1.0));
            }
            // Unseen category: all-zero row for this block.
        }
        CsrMatrix::from_triplets(column.len(), categories.len(), &triplets).map_err(Into::into)
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform(&mut self, column: &[String]) -> Result<CsrMatrix> {
        self.fit(column)?;
        self.transform(column)
    }
}

/// Standardizes columns by removing the mean and scaling to unit variance.
///
/// The standard score of a sample x is `z = (x - mean) / std`, with fit-time
/// statistics. Uses population std (divide by n, not n-1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each column (computed during fit).
    mean: Option<Vec<f32>>,
    /// Standard deviation of each column (computed during fit).
    std: Option<Vec<f32>>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Creates a new `StandardScaler`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    /// Returns the mean of each column.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        self.mean
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns the standard deviation of each column.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn std(&self) -> &[f32] {
        self.std
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }

    /// Computes the mean and standard deviation of each column.
    ///
    /// # Errors
    ///
    /// Returns an error on empty input.
    pub fn fit(&mut self, columns: &[Vec<f32>]) -> Result<()> {
        let n_rows = columns.first().map_or(0, Vec::len);
        if n_rows == 0 {
            return Err("Cannot fit StandardScaler with zero samples".into());
        }

        let mut mean = Vec::with_capacity(columns.len());
        let mut std = Vec::with_capacity(columns.len());
        for col in columns {
            let m = col.iter().sum::<f32>() / n_rows as f32;
            let var = col.iter().map(|x| (x - m) * (x - m)).sum::<f32>() / n_rows as f32;
            mean.push(m);
            std.push(var.sqrt());
        }

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    /// Standardizes columns using fitted statistics.
    ///
    /// Columns with ~zero std are centered but not scaled.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, or a dimension error if the column
    /// count differs from fit time.
    pub fn transform(&self, columns: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        let mean = self
            .mean
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("StandardScaler"))?;
        let std = self
            .std
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("StandardScaler"))?;
        if columns.len() != mean.len() {
            return Err(RecomendarError::dimension_mismatch(
                format!("{} columns", mean.len()),
                format!("{} columns", columns.len()),
            ));
        }

        Ok(columns
            .iter()
            .enumerate()
            .map(|(j, col)| {
                col.iter()
                    .map(|x| {
                        let centered = x - mean[j];
                        if std[j] > 1e-10 {
                            centered / std[j]
                        } else {
                            centered
                        }
                    })
                    .collect()
            })
            .collect())
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform(&mut self, columns: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        self.fit(columns)?;
        self.transform(columns)
    }
}

/// Scales columns to [0, 1] using fit-time min/max.
///
/// The transformation is `(x - min) / (max - min)`; constant columns map
/// to 0.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Minimum of each column (computed during fit).
    data_min: Option<Vec<f32>>,
    /// Maximum of each column (computed during fit).
    data_max: Option<Vec<f32>>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Creates a new `MinMaxScaler`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_min: None,
            data_max: None,
        }
    }

    /// Returns the minimum of each column.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn data_min(&self) -> &[f32] {
        self.data_min
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns the maximum of each column.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn data_max(&self) -> &[f32] {
        self.data_max
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.data_min.is_some()
    }

    /// Computes the min and max of each column.
    ///
    /// # Errors
    ///
    /// Returns an error on empty input.
    pub fn fit(&mut self, columns: &[Vec<f32>]) -> Result<()> {
        let n_rows = columns.first().map_or(0, Vec::len);
        if n_rows == 0 {
            return Err("Cannot fit MinMaxScaler with zero samples".into());
        }

        let mut data_min = Vec::with_capacity(columns.len());
        let mut data_max = Vec::with_capacity(columns.len());
        for col in columns {
            let mut lo = f32::INFINITY;
            let mut hi = f32::NEG_INFINITY;
            for &x in col {
                lo = lo.min(x);
                hi = hi.max(x);
            }
            data_min.push(lo);
            data_max.push(hi);
        }

        self.data_min = Some(data_min);
        self.data_max = Some(data_max);
        Ok(())
    }

    /// Scales columns to [0, 1] using fitted min/max.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, or a dimension error if the column
    /// count differs from fit time.
    pub fn transform(&self, columns: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        let data_min = self
            .data_min
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("MinMaxScaler"))?;
        let data_max = self
            .data_max
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("MinMaxScaler"))?;
        if columns.len() != data_min.len() {
            return Err(RecomendarError::dimension_mismatch(
                format!("{} columns", data_min.len()),
                format!("{} columns", columns.len()),
            ));
        }

        Ok(columns
            .iter()
            .enumerate()
            .map(|(j, col)| {
                let range = data_max[j] - data_min[j];
                col.iter()
                    .map(|x| {
                        if range > 0.0 {
                            (x - data_min[j]) / range
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect())
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform(&mut self, columns: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        self.fit(columns)?;
        self.transform(columns)
    }
}
