//! Error types for formula loading, validation, and artifact selection.
//!
//! Each variant names the offending value and the constraint it violated so
//! that the installer can surface it to the operator unchanged.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from the release descriptor.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// The host architecture is not one of the recognised variants.
    #[error("unsupported architecture \"{value}\"; expected one of: {expected}")]
    UnsupportedArchitecture {
        /// The rejected architecture string.
        value: String,
        /// Comma-separated list of accepted architectures.
        expected: String,
    },

    /// The formula declares no artifact for a recognised architecture.
    #[error("formula {formula} has no artifact for architecture {arch}")]
    MissingArtifact {
        /// Name of the formula.
        formula: String,
        /// The architecture without an artifact.
        arch: String,
    },

    /// A SHA-256 digest is not a valid 64-character lowercase hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A formula field failed validation.
    #[error("invalid formula field `{field}`: {reason}")]
    InvalidField {
        /// The field that failed validation.
        field: &'static str,
        /// Description of the validation failure.
        reason: String,
    },

    /// The formula TOML could not be deserialised.
    #[error("failed to parse formula: {0}")]
    Parse(#[from] toml::de::Error),

    /// The formula file could not be read.
    #[error("failed to read formula at {path}: {source}")]
    Read {
        /// Path of the formula file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`FormulaError`].
pub type Result<T> = std::result::Result<T, FormulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_architecture_lists_expected_values() {
        let err = FormulaError::UnsupportedArchitecture {
            value: "riscv64".to_owned(),
            expected: "arm64, x86_64".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("riscv64"));
        assert!(msg.contains("arm64, x86_64"));
    }

    #[test]
    fn read_error_preserves_source() {
        let err = FormulaError::Read {
            path: Utf8PathBuf::from("/nowhere/formula.toml"),
            source: std::io::Error::other("missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nowhere/formula.toml"));
        assert!(msg.ends_with(": missing"), "message: {msg}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
