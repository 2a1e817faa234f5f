//! Error types for the apidoc_pdf crate.

use std::io;

use thiserror::Error;

/// Result type alias for apidoc_pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a document build.
///
/// Configuration errors are raised before any document construction starts.
/// Everything else is fatal to the running build and no output file is left
/// behind.
#[derive(Error, Debug)]
pub enum Error {
    /// An option name outside the supported set.
    #[error("Unsupported option: {0}")]
    UnsupportedOption(String),

    /// A supported option carrying a value it cannot take.
    #[error("Invalid value `{value}` for option `{name}`")]
    InvalidOptionValue {
        /// Option name without the leading dash.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// The documentation tree could not be decoded.
    #[error("Malformed documentation tree: {0}")]
    Tree(#[from] serde_json::Error),

    /// A class refers to a package the tree does not describe.
    #[error("Class `{class}` refers to unknown package `{package}`")]
    UnknownPackage {
        /// Qualified name of the offending class.
        class: String,
        /// The package name that failed to resolve.
        package: String,
    },

    /// A font family could not be located or loaded.
    #[error("Font family `{family}` unavailable: {message}")]
    Font {
        /// Requested family name.
        family: String,
        /// Description of the lookup or loading failure.
        message: String,
    },

    /// The PDF backend failed while laying out or encoding the document.
    #[error("PDF rendering error: {0}")]
    Render(#[from] genpdf::error::Error),

    /// I/O error when reading input or writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedOption("-color".to_string());
        assert_eq!(err.to_string(), "Unsupported option: -color");

        let err = Error::UnknownPackage {
            class: "a.B".to_string(),
            package: "a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Class `a.B` refers to unknown package `a`"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
