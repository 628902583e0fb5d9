//! Independent per-column transformers.
//!
//! Some preprocessing algorithms need to be applied to each feature on its
//! own. The [`PerColumnTransformer`] builds one transformer per column from a
//! factory and keeps them apart.

#[allow(clippy::module_inception)]
mod per_column;

pub use per_column::{PerColumnTransformer, TransformerArgs, TransformerFactory};
