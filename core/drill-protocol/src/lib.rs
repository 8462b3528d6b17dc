#![no_std] // Shared with the wasm platform crate

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod ids;
pub mod fields;
pub mod catalog;

// Re-export core types for convenience
pub use ids::{WordId, VerseId};
pub use fields::*;
pub use catalog::{catalog, field_spec, FieldSpec};

pub mod model;
pub use model::*;
