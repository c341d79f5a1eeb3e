//! Error types for the form appearance library.
//!
//! Rendering itself never reports degenerate input; these errors surface
//! document-store inconsistencies, configuration problems and I/O.

use crate::object::ObjectRef;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while editing or persisting a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Referenced object not found in the document's object store
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Text field handle does not belong to this document
    #[error("Text field not found: #{0}")]
    FieldNotFound(usize),

    /// Page index out of range
    #[error("Page not found: index {0}")]
    PageNotFound(usize),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an `ObjectNotFound` error for a reference.
    pub fn object_not_found(obj_ref: ObjectRef) -> Self {
        Error::ObjectNotFound(obj_ref.id, obj_ref.gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_not_found_error() {
        let err = Error::ObjectNotFound(10, 0);
        let msg = format!("{}", err);
        assert!(msg.contains("10 0 R"));
    }

    #[test]
    fn test_object_not_found_from_ref() {
        let err = Error::object_not_found(ObjectRef::new(7, 2));
        assert_eq!(format!("{}", err), "Object not found: 7 2 R");
    }

    #[test]
    fn test_invalid_object_type_error() {
        let err = Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: "Array".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Dictionary"));
        assert!(msg.contains("Array"));
    }

    #[test]
    fn test_invalid_config_error() {
        let err = Error::InvalidConfig("empty tag".to_string());
        assert!(format!("{}", err).contains("empty tag"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
