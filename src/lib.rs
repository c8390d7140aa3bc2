//! Recomendar: content-based music recommendation in pure Rust.
//!
//! Transforms a table of song records into a sparse numeric feature matrix
//! through a declared, column-specific set of encodings, then recommends
//! songs similar to a query song by cosine similarity over matrix rows.
//!
//! # Quick Start
//!
//! ```
//! use recomendar::prelude::*;
//!
//! let table = SongTable::from_records(vec![
//!     SongRecord {
//!         name: "Paranoid".into(),
//!         artist: "Black Sabbath".into(),
//!         tempo: 163.0,
//!         tags: "heavy metal, rock".into(),
//!         ..SongRecord::default()
//!     },
//!     SongRecord {
//!         name: "Iron Man".into(),
//!         artist: "Black Sabbath".into(),
//!         tempo: 160.0,
//!         tags: "heavy metal, rock".into(),
//!         ..SongRecord::default()
//!     },
//! ]);
//!
//! // Fit the encoding pipeline and build the feature matrix.
//! let mut pipeline = FeaturePipeline::songs();
//! let matrix = pipeline.fit_transform(&table).unwrap();
//!
//! // Query by (song, artist).
//! let results = recommend("Paranoid", "Black Sabbath", &table, &matrix, 5).unwrap();
//! assert_eq!(results[0].name, "Iron Man");
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: CSR sparse matrix
//! - [`data`]: song table and CSV loading
//! - [`preprocessing`]: frequency/one-hot encoders, standard/min-max scalers
//! - [`text`]: tokenization and TF-IDF vectorization
//! - [`compose`]: declarative encoding spec + feature pipeline
//! - [`recommend`]: cosine similarity and top-K recommendation
//! - [`serialization`]: sparse matrix file format

pub mod compose;
pub mod data;
pub mod error;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod recommend;
pub mod serialization;
pub mod text;

pub use error::{RecomendarError, Result};
pub use primitives::CsrMatrix;
