//! Wrapped transformers and their label capability.
//!
//! Whether a transformer takes labels is decided once, when it is wrapped,
//! instead of being probed on every call. Failures raised by the transformer
//! are always returned unchanged.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{SupervisedTransformer, Transformer};
use crate::table::Column;

/// A caller-supplied transformer together with its label capability.
pub enum Delegate<D> {
    /// Receives the label column on every call.
    Supervised(Box<dyn SupervisedTransformer<D>>),
    /// Never receives labels; any labels passed by the caller are dropped.
    Unsupervised(Box<dyn Transformer<D>>),
}

impl<D> Delegate<D> {
    /// Wrap a transformer that takes labels.
    pub fn supervised<T: SupervisedTransformer<D> + 'static>(transformer: T) -> Self {
        Delegate::Supervised(Box::new(transformer))
    }

    /// Wrap a transformer that learns from the data alone.
    pub fn unsupervised<T: Transformer<D> + 'static>(transformer: T) -> Self {
        Delegate::Unsupervised(Box::new(transformer))
    }

    /// Whether the wrapped transformer receives labels.
    pub fn accepts_labels(&self) -> bool {
        matches!(self, Delegate::Supervised(_))
    }

    /// Fit the wrapped transformer, passing labels only if it takes them.
    pub fn fit(&mut self, data: &D, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        match self {
            Delegate::Supervised(t) => t.fit(data, labels),
            Delegate::Unsupervised(t) => {
                log_dropped_labels("fit", labels);
                t.fit(data)
            }
        }
    }

    /// Transform with the wrapped transformer.
    pub fn transform(&self, data: &D, labels: Option<&Column>) -> Result<D, PreprocessingError> {
        match self {
            Delegate::Supervised(t) => t.transform(data, labels),
            Delegate::Unsupervised(t) => {
                log_dropped_labels("transform", labels);
                t.transform(data)
            }
        }
    }

    /// Call the wrapped transformer's combined fit and transform.
    pub fn fit_transform(
        &mut self,
        data: &D,
        labels: Option<&Column>,
    ) -> Result<D, PreprocessingError> {
        match self {
            Delegate::Supervised(t) => t.fit_transform(data, labels),
            Delegate::Unsupervised(t) => {
                log_dropped_labels("fit_transform", labels);
                t.fit_transform(data)
            }
        }
    }
}

fn log_dropped_labels(operation: &'static str, labels: Option<&Column>) {
    if labels.is_some() {
        tracing::trace!(operation, "delegate takes no labels, calling without them");
    }
}
