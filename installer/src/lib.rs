//! git-profiles installer library.
//!
//! This crate provides the install pipeline for the prebuilt
//! `git-profiles-cli` binary: select the release archive for the host
//! architecture, download it, verify its SHA-256 checksum, place the binary in
//! a bin directory, and smoke test it. It is used by the
//! `git-profiles-installer` CLI binary and can be consumed programmatically for
//! testing or custom installation workflows.
//!
//! # Modules
//!
//! - [`artefact`] - Archive download, verification, and extraction
//! - [`cli`] - Command-line argument definitions
//! - [`dirs`] - Directory resolution abstraction for platform-specific paths
//! - [`error`] - Semantic error types with recovery hints
//! - [`output`] - Output formatting for progress, dry runs, and metadata
//! - [`pipeline`] - Install pipeline orchestration
//! - [`resolution`] - Formula loading and artifact resolution
//! - [`smoke`] - Post-install `--help` smoke test
//! - [`stager`] - Atomic placement of the binary in the bin directory

pub mod artefact;
pub mod cli;
pub mod dirs;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod resolution;
pub mod smoke;
pub mod stager;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
