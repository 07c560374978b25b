//! Release archive handling: download, checksum verification, and
//! extraction.
//!
//! # Sub-modules
//!
//! - [`download`] - Download trait and HTTP implementation.
//! - [`verification`] - SHA-256 verification producing [`verification::VerifiedArchive`].
//! - [`extraction`] - Binary extraction with path traversal protection.

pub mod download;
pub mod extraction;
pub mod verification;
