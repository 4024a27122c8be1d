//! Error handling for MuseumKit
//!
//! Two families of errors live here:
//! - Model errors (lookups that fail against the floor collection)
//! - Invariant violations (internal defects that must never happen)
//!
//! Expected editing conditions such as a rejected placement are not errors;
//! they are reported as validation values by the editor crate.

use thiserror::Error;

use crate::data::ElementType;

/// Model error type
///
/// Raised when an operation names an element or floor that cannot be
/// resolved in the supplied floors collection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Floor lookup failed
    #[error("Floor not found: {floor_id}")]
    FloorNotFound {
        /// The floor identifier that was requested.
        floor_id: String,
    },

    /// Element lookup failed
    #[error("{element_type} not found: {id}")]
    ElementNotFound {
        /// The element kind that was requested.
        element_type: ElementType,
        /// The identifier that was requested.
        id: String,
    },

    /// An element with the same id already exists
    #[error("Duplicate {element_type} id: {id}")]
    DuplicateId {
        /// The element kind being inserted.
        element_type: ElementType,
        /// The conflicting identifier.
        id: String,
    },
}

/// Internal invariant violation
///
/// A distinct defect class: these describe states the engine must never
/// produce. They are always logged at error level when raised through
/// [`InvariantViolation::report`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// The editor has no floors left
    #[error("Invariant violated: editor state has no floors")]
    NoFloors,

    /// The current floor id does not resolve
    #[error("Invariant violated: current floor {floor_id} does not exist")]
    DanglingCurrentFloor {
        /// The unresolved floor id.
        floor_id: String,
    },

    /// Two elements share one id
    #[error("Invariant violated: id {id} is used more than once")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// A weak reference points at an element that is gone
    #[error("Invariant violated: {owner} on floor {floor_id} references missing {element_type} {id}")]
    DanglingReference {
        /// Floor that holds the referencing element.
        floor_id: String,
        /// The referencing element id.
        owner: String,
        /// Kind of the missing target.
        element_type: ElementType,
        /// The missing target id.
        id: String,
    },

    /// The history cursor points outside its entries
    #[error("Invariant violated: history cursor {index} out of range for {len} entries")]
    HistoryCursor {
        /// Cursor position.
        index: usize,
        /// Number of entries.
        len: usize,
    },
}

impl InvariantViolation {
    /// Log the violation loudly and hand it back for propagation.
    pub fn report(self) -> Self {
        tracing::error!(target: "museumkit::invariant", violation = %self, "internal invariant violated");
        self
    }
}

/// Main error type for MuseumKit
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Model lookup error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Internal invariant violation
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// Floor plan document could not be decoded or encoded
    #[error("Plan document error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an internal invariant violation
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::Invariant(_))
    }

    /// Check if this is a lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Model(ModelError::FloorNotFound { .. })
                | Error::Model(ModelError::ElementNotFound { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::ElementNotFound {
            element_type: ElementType::Room,
            id: "r1".to_string(),
        };
        assert_eq!(err.to_string(), "room not found: r1");
    }

    #[test]
    fn test_invariant_is_distinct() {
        let err: Error = InvariantViolation::NoFloors.report().into();
        assert!(err.is_invariant_violation());
        assert!(!err.is_not_found());

        let err: Error = ModelError::FloorNotFound {
            floor_id: "f1".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_history_cursor_display() {
        let err = InvariantViolation::HistoryCursor { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Invariant violated: history cursor 4 out of range for 2 entries"
        );
    }
}
