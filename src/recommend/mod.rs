//! Content-based song recommendation.
//!
//! Brute-force cosine similarity over the feature matrix: locate the query
//! song's row, score it against every row, return the top-K. O(n) per query
//! is acceptable at this data scale; an approximate-nearest-neighbor index
//! would be an enhancement, not part of the contract.

pub mod similarity;

mod content_based;

pub use content_based::{recommend, Recommendation};
