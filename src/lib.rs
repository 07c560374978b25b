//! Release descriptor for the prebuilt `git-profiles-cli` binary.
//!
//! The crate models what a package-manager formula declares: informational
//! metadata, one HTTPS archive per supported architecture with its SHA-256
//! checksum, and the name of the binary inside the archive. The installer
//! crate consumes these types to fetch, verify, and place the binary.
//!
//! # Modules
//!
//! - [`arch`] - Supported host architectures
//! - [`artifact`] - The artifact selected for one install run
//! - [`error`] - Descriptor validation errors
//! - [`formula`] - Descriptor loading and validation
//! - [`sha256_digest`] - Validated SHA-256 digest newtype

pub mod arch;
pub mod artifact;
pub mod error;
pub mod formula;
pub mod sha256_digest;

pub use arch::HostArch;
pub use artifact::{ReleaseArtifact, select_artifact};
pub use error::FormulaError;
pub use formula::{ArtifactEntry, Formula};
pub use sha256_digest::Sha256Digest;
