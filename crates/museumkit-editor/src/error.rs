//! Errors raised by the editor state store
//!
//! Only conditions a caller can act on become errors. A rejected placement
//! still carries the full [`ValidationResult`] so the host can show it.

use museumkit_core::{ElementId, ElementType, InvariantViolation, ModelError};
use thiserror::Error;

use crate::validation::ValidationResult;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The validator blocked the mutation
    #[error("Placement rejected: {} ({})", .0.message, .0.code)]
    PlacementRejected(ValidationResult),

    /// `end_gesture` or an update arrived with no gesture in progress
    #[error("No gesture in progress")]
    NoActiveGesture,

    /// A second gesture was started before the first ended
    #[error("A gesture is already in progress")]
    GestureActive,

    /// The only remaining floor cannot be deleted
    #[error("Cannot delete the last floor {floor_id}")]
    LastFloor {
        /// The floor that was targeted.
        floor_id: ElementId,
    },

    /// The operation does not apply to this element kind
    #[error("Unsupported operation on {element_type}: {reason}")]
    Unsupported {
        /// Element kind the operation was attempted on.
        element_type: ElementType,
        /// Why it was refused.
        reason: String,
    },

    /// Lookup failure against the floors
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The state would break an internal invariant
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl EditorError {
    /// The rejected validation verdict, if that is what this is
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            EditorError::PlacementRejected(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, EditorError::Invariant(_))
    }
}

impl From<EditorError> for museumkit_core::Error {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Model(e) => museumkit_core::Error::Model(e),
            EditorError::Invariant(e) => museumkit_core::Error::Invariant(e),
            other => museumkit_core::Error::other(other.to_string()),
        }
    }
}

pub type EditorResult<T> = std::result::Result<T, EditorError>;
