//! Error types for the animation engine

use serde::{Deserialize, Serialize};

use crate::ids::TemplateId;

/// Failures reported at the engine boundary.
///
/// Control operations on stale instance ids are not errors; they are absorbed
/// by the engine and never surface here.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimateError {
    /// Attach referenced a template that was never created or has been removed
    #[error("Animation template not found: {id}")]
    TemplateNotFound { id: TemplateId },

    /// Attach was given a duration that cannot produce a progress fraction
    #[error("Invalid duration {duration}: expected a finite value greater than zero")]
    InvalidDuration { duration: f32 },
}

impl AnimateError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TemplateNotFound { .. } => "template",
            Self::InvalidDuration { .. } => "validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnimateError::TemplateNotFound { id: TemplateId(7) };
        assert_eq!(err.to_string(), "Animation template not found: #7");

        let err = AnimateError::InvalidDuration { duration: 0.0 };
        assert!(err.to_string().starts_with("Invalid duration 0"));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            AnimateError::TemplateNotFound { id: TemplateId(0) }.category(),
            "template"
        );
        assert_eq!(
            AnimateError::InvalidDuration { duration: -1.0 }.category(),
            "validation"
        );
    }

    #[test]
    fn test_serialization() {
        let error = AnimateError::TemplateNotFound { id: TemplateId(3) };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: AnimateError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
