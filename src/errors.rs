use thiserror::Error;

/// Errors that can occur while processing test definitions.
#[derive(Error, Debug)]
pub enum SkelgenError {
    /// A definition file is empty or has no header line.
    #[error("malformed definition: {message}")]
    MalformedDefinition { message: String },

    /// Generated source failed the external syntax check.
    ///
    /// Nothing is written when this is raised; the existing file (if any)
    /// is left untouched.
    #[error("contents of {class_name} would not be sane: {diagnostic}")]
    Validation {
        class_name: String,
        diagnostic: String,
    },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, SkelgenError>`.
pub type Result<T> = std::result::Result<T, SkelgenError>;
