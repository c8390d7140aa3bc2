//! Text processing for the free-text tags column.

pub mod tokenize;

mod tfidf;

pub use tfidf::TfidfVectorizer;
