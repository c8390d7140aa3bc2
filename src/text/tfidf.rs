//! TF-IDF vectorizer over tag text.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{RecomendarError, Result};
use crate::primitives::CsrMatrix;
use crate::text::tokenize::word_tokens;

/// Converts tag text into TF-IDF weighted sparse rows.
///
/// The vocabulary is fixed at fit time: the top `max_features` terms by
/// corpus frequency (ties broken alphabetically), column index = frequency
/// rank. Inverse document frequency is smoothed,
/// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, and every output row is L2
/// normalized. A document with no known terms stays an all-zero row.
///
/// # Examples
///
/// ```
/// use recomendar::text::TfidfVectorizer;
///
/// let docs = vec!["heavy metal rock", "soft rock ballad"];
/// let mut vectorizer = TfidfVectorizer::new().with_max_features(10);
/// let matrix = vectorizer.fit_transform(&docs).expect("fit_transform should succeed");
/// assert_eq!(matrix.n_rows(), 2);
/// assert!(vectorizer.vocabulary_size() <= 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Vocabulary size cap; `None` keeps every term.
    max_features: Option<usize>,
    /// Term → column index, learned during fit.
    vocabulary: Option<BTreeMap<String, usize>>,
    /// Smoothed inverse document frequency per column, learned during fit.
    idf: Option<Vec<f32>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// Creates a new `TfidfVectorizer` with an uncapped vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_features: None,
            vocabulary: None,
            idf: None,
        }
    }

    /// Caps the vocabulary at the top `max_features` terms by corpus
    /// frequency.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Returns true if the vectorizer has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    /// Returns the learned vocabulary size.
    ///
    /// # Panics
    ///
    /// Panics if the vectorizer is not fitted.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary
            .as_ref()
            .expect("Vectorizer not fitted. Call fit() first.")
            .len()
    }

    /// Learns the vocabulary and idf weights from documents.
    ///
    /// All-empty documents are legal (an absent tags column); the learned
    /// vocabulary is then empty and transform emits zero-width rows.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty document collection.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err("Cannot fit TfidfVectorizer on zero documents".into());
        }

        let n_docs = documents.len();
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = word_tokens(doc.as_ref());
            let mut seen: std::collections::HashSet<&str> = std::collections::HashSet::new();
            for token in &tokens {
                *term_freq.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        // Top terms by corpus frequency, alphabetical on ties, then column
        // index = rank. The full sort makes the layout independent of hash
        // iteration order.
        let mut sorted_terms: Vec<(String, usize)> = term_freq.into_iter().collect();
        sorted_terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max_features) = self.max_features {
            sorted_terms.truncate(max_features);
        }

        let mut idf = Vec::with_capacity(sorted_terms.len());
        let mut vocabulary = BTreeMap::new();
        for (idx, (term, _)) in sorted_terms.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0);
            let weight = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
            idf.push(weight as f32);
            vocabulary.insert(term, idx);
        }

        self.vocabulary = Some(vocabulary);
        self.idf = Some(idf);
        Ok(())
    }

    /// Transforms documents into L2-normalized tf·idf rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if called before `fit`.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<CsrMatrix> {
        let vocabulary = self
            .vocabulary
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("TfidfVectorizer"))?;
        let idf = self
            .idf
            .as_ref()
            .ok_or_else(|| RecomendarError::not_fitted("TfidfVectorizer"))?;

        let mut triplets = Vec::new();
        for (row, doc) in documents.iter().enumerate() {
            let mut counts: HashMap<usize, f64> = HashMap::new();
            for token in word_tokens(doc.as_ref()) {
                if let Some(&col) = vocabulary.get(&token) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }
            if counts.is_empty() {
                continue;
            }

            let mut entries: Vec<(usize, f64)> = counts
                .into_iter()
                .map(|(col, tf)| (col, tf * f64::from(idf[col])))
                .collect();
            entries.sort_by_key(|&(col, _)| col);

            let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            for (col, value) in entries {
                triplets.push((row, col, (value / norm) as f32));
            }
        }

        CsrMatrix::from_triplets(documents.len(), idf.len(), &triplets).map_err(Into::into)
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<CsrMatrix> {
        self.fit(documents)?;
        self.transform(documents)
    }
}

#[cfg(test)]
#[path = "tfidf_tests.rs"]
mod tests;
