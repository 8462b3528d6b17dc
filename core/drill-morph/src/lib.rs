//! Normalization, relevance and scoring of grammatical parses.
//!
//! Everything here is a pure function of its arguments: no caches, no I/O.

pub mod normalize;
pub mod relevance;
pub mod score;
pub mod status;
pub mod surface;

pub use normalize::{normalize, Normalized, Normalizer, SENTINELS};
pub use relevance::{is_relevant, relevant_fields, Relevance, PRONOMINAL_SUFFIX};
pub use score::{score, FieldDetail, ScoreReport, ScoreSummary, Scorer};
pub use status::{field_status, visible_suffix_fields, FieldStatus};
pub use surface::{masked_width, SurfaceMatcher};
