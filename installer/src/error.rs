//! Error types for the git-profiles installer.
//!
//! Every step of an install run is fatal on failure. The variants here carry
//! enough detail for the operator to diagnose the failure without re-running:
//! the URL that failed, the expected and computed checksums, the path and
//! I/O reason of a filesystem failure, or the exit status of the smoke test.

use crate::artefact::download::DownloadError;
use crate::artefact::extraction::ExtractionError;
use crate::smoke::SmokeTestError;
use camino::Utf8PathBuf;
use git_profiles_formula::FormulaError;
use thiserror::Error;

/// Errors that can occur during an install run.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The host architecture has no artifact in the formula.
    #[error("unsupported architecture {arch}; supported: {expected}")]
    UnsupportedArchitecture {
        /// The rejected architecture.
        arch: String,
        /// Comma-separated list of supported architectures.
        expected: String,
    },

    /// The checksum supplied by the formula or the operator is unusable.
    #[error("invalid checksum: {reason}; pass --sha256 with the release digest")]
    InvalidChecksum {
        /// Description of the validation failure.
        reason: String,
    },

    /// The formula could not be loaded or failed validation.
    #[error("formula error: {0}")]
    Formula(#[source] FormulaError),

    /// The archive could not be downloaded.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The downloaded archive does not match the expected checksum.
    #[error("checksum mismatch for {url}: expected {expected}, computed {actual}")]
    ChecksumMismatch {
        /// The URL the archive was fetched from.
        url: String,
        /// The checksum declared for the artifact.
        expected: String,
        /// The checksum of the downloaded bytes.
        actual: String,
    },

    /// The binary could not be extracted from the verified archive.
    #[error("failed to extract {binary} from archive: {source}")]
    Extraction {
        /// Name of the binary being extracted.
        binary: String,
        /// The underlying extraction failure.
        #[source]
        source: ExtractionError,
    },

    /// The binary could not be written to the destination directory.
    #[error("failed to install {path}: {reason}")]
    Install {
        /// The destination path.
        path: Utf8PathBuf,
        /// Description of the filesystem failure.
        reason: String,
    },

    /// The installed binary failed its post-install check.
    #[error("smoke test failed: {0}")]
    SmokeTestFailure(#[from] SmokeTestError),

    /// No bin directory could be determined for the install.
    #[error("could not determine a bin directory; pass --bin-dir")]
    BinDirNotFound,

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

impl From<FormulaError> for InstallerError {
    fn from(err: FormulaError) -> Self {
        match err {
            FormulaError::UnsupportedArchitecture { value, expected } => {
                Self::UnsupportedArchitecture {
                    arch: value,
                    expected,
                }
            }
            FormulaError::MissingArtifact { arch, .. } => Self::UnsupportedArchitecture {
                arch,
                expected: git_profiles_formula::HostArch::supported().join(", "),
            },
            FormulaError::InvalidSha256Digest { reason } => Self::InvalidChecksum { reason },
            other => Self::Formula(other),
        }
    }
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
