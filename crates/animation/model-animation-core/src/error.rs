//! Error types for the animation core

use serde::{Deserialize, Serialize};

/// Errors raised synchronously by collection, model, and document operations.
///
/// None of these are transient: each one reports a misuse of the API or a
/// defect in the supplied document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// No document has been loaded into the owning model yet
    #[error("The model document is not loaded; wait until load_document has completed")]
    DocumentNotLoaded,

    /// Name does not match any animation in the loaded document
    #[error("Unknown animation name: {name:?}")]
    UnknownAnimation { name: String },

    /// Speed multiplier must be strictly positive
    #[error("speedup must be greater than zero, got {speedup}")]
    InvalidSpeedup { speedup: f64 },

    /// Document text could not be decoded
    #[error("Document parse error: {reason}")]
    Parse { reason: String },

    /// Animation data violates a structural invariant
    #[error("Invalid animation {animation:?}: {reason}")]
    InvalidDefinition { animation: String, reason: String },

    /// A channel targets a node that the document does not declare
    #[error("Animation {animation:?} targets unknown node {node:?}")]
    UnresolvedTarget { animation: String, node: String },
}

impl AnimationError {
    pub(crate) fn invalid(animation: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            animation: animation.to_string(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DocumentNotLoaded => "invalid_state",
            Self::UnknownAnimation { .. } | Self::InvalidSpeedup { .. } => "invalid_argument",
            Self::Parse { .. } | Self::InvalidDefinition { .. } | Self::UnresolvedTarget { .. } => {
                "document"
            }
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(AnimationError::DocumentNotLoaded.category(), "invalid_state");
        let unknown = AnimationError::UnknownAnimation {
            name: "walk".to_string(),
        };
        assert_eq!(unknown.category(), "invalid_argument");
        assert_eq!(
            AnimationError::InvalidSpeedup { speedup: 0.0 }.category(),
            "invalid_argument"
        );
        assert_eq!(AnimationError::invalid("walk", "empty").category(), "document");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: AnimationError = err.into();
        assert!(matches!(converted, AnimationError::Parse { .. }));
    }

    #[test]
    fn test_display() {
        let err = AnimationError::InvalidSpeedup { speedup: -1.0 };
        assert_eq!(err.to_string(), "speedup must be greater than zero, got -1");
    }
}
