//! Column adapters for table preprocessing.
//!
//! This module wraps ordinary transformers so they can be applied to parts of
//! a named-column [`Table`](crate::table::Table).
//!
//! # Design Philosophy
//!
//! - **Explicit state**: [`PerColumnTransformer`] knows whether it has been
//!   fitted and refuses to transform before it has
//! - **Typed label handling**: a [`Delegate`] declares up front whether it
//!   takes labels, instead of being probed at call time
//! - **Copy control**: every adapter either leaves its input alone or writes
//!   its output into it, chosen by a `copy` flag
//!
//! # Core Traits
//!
//! - [`Transformer`]: Fit/transform over one kind of data, without labels
//! - [`SupervisedTransformer`]: Same, with optional labels
//! - [`TableTransformer`]: The contract every adapter exposes to a pipeline
//!
//! # Adapters
//!
//! - [`SubsetSelector`]: One transformer on a subset of columns, chosen by
//!   name and/or dtype
//! - [`PerColumnTransformer`]: An independent transformer per column
//! - [`TablePipeline`]: Chain adapters together
//!
//! # Example
//!
//! ```ignore
//! use column_adapters::preprocessing::{
//!     Delegate, PerColumnTransformer, SubsetSelector, TablePipeline, TableTransformer,
//!     TransformerArgs,
//! };
//! use column_adapters::table::DTypeSelector;
//!
//! let mut pipeline = TablePipeline::new()
//!     .add(
//!         "impute",
//!         SubsetSelector::new(Delegate::unsupervised(MeanImputer::default()))
//!             .include_dtypes([DTypeSelector::Numeric]),
//!     )
//!     .add(
//!         "bin",
//!         PerColumnTransformer::new(|args: &TransformerArgs| {
//!             Ok(Delegate::unsupervised(Binner::from_args(args)?))
//!         }),
//!     );
//!
//! let prepared = pipeline.fit_transform(&mut train, Some(&labels))?;
//! ```

pub mod config;
pub mod delegate;
pub mod error;
pub mod per_column;
pub mod pipeline;
pub mod subset;
pub mod traits;

// Re-export main types
pub use config::{ConfigFile, PerColumnConfig, SubsetSelectorConfig};
pub use delegate::Delegate;
pub use error::PreprocessingError;
pub use per_column::{PerColumnTransformer, TransformerArgs, TransformerFactory};
pub use pipeline::TablePipeline;
pub use subset::{ColumnSelection, SubsetSelector};
pub use traits::{SupervisedTransformer, TableTransformer, Transformer};
