//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use recomendar::prelude::*;
//! ```

pub use crate::compose::{EncoderKind, EncoderStep, EncodingSpec, FeaturePipeline};
pub use crate::data::{SongRecord, SongTable};
pub use crate::error::{RecomendarError, Result};
pub use crate::primitives::CsrMatrix;
pub use crate::recommend::{recommend, Recommendation};
pub use crate::serialization::{load_matrix, save_matrix};
