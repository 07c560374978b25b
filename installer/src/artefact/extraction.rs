//! Binary extraction from verified release archives.
//!
//! Release archives are gzip-compressed tarballs. The binary is located by
//! file name anywhere in the archive so that both flat archives and archives
//! with a top-level directory work. Entry paths are validated to guard
//! against path traversal before anything is read.

use crate::artefact::verification::VerifiedArchive;
use flate2::read::GzDecoder;
use log::trace;
use std::io::Read;
use std::path::{Component, Path};

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error while decoding the archive.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive holds no regular file with the requested name.
    #[error("archive does not contain a file named {binary}")]
    BinaryNotFound {
        /// The requested binary name.
        binary: String,
    },
}

/// Read the contents of the file named `binary` from a verified archive.
///
/// The first regular file whose final path component equals `binary` wins.
///
/// # Errors
///
/// Returns [`ExtractionError::PathTraversal`] if any entry up to the match
/// has an absolute path or `..` component, [`ExtractionError::BinaryNotFound`]
/// if no entry matches, and [`ExtractionError::Io`] on decoding failures.
pub fn extract_binary(archive: &VerifiedArchive, binary: &str) -> Result<Vec<u8>, ExtractionError> {
    let decoder = GzDecoder::new(archive.bytes());
    let mut tarball = tar::Archive::new(decoder);

    for entry_result in tarball.entries()? {
        let mut entry = entry_result?;
        let entry_path = entry.path()?.into_owned();
        validate_entry_path(&entry_path)?;
        trace!("archive entry {}", entry_path.display());

        if !entry.header().entry_type().is_file() {
            continue;
        }
        if entry_path.file_name().is_some_and(|name| name == binary) {
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            return Ok(contents);
        }
    }

    Err(ExtractionError::BinaryNotFound {
        binary: binary.to_owned(),
    })
}

/// Validate that a tar entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artefact::verification::{compute_sha256, verify_archive};
    use crate::test_utils::{TarEntry, gzip_tarball, gzip_tarball_with_raw_path};
    use git_profiles_formula::{HostArch, ReleaseArtifact};
    use rstest::rstest;
    use std::path::PathBuf;

    fn verified(bytes: Vec<u8>) -> VerifiedArchive {
        let artifact = ReleaseArtifact::new(
            HostArch::X86_64,
            "https://example.test/tool.tar.gz",
            compute_sha256(&bytes),
            "tool",
        );
        verify_archive(&artifact, bytes).expect("checksum matches")
    }

    #[test]
    fn extracts_binary_at_archive_root() {
        let archive = verified(gzip_tarball(&[TarEntry::file("tool", b"#!/bin/sh\n")]));
        let contents = extract_binary(&archive, "tool").expect("binary present");
        assert_eq!(contents, b"#!/bin/sh\n");
    }

    #[test]
    fn extracts_binary_from_nested_directory() {
        let archive = verified(gzip_tarball(&[
            TarEntry::file("tool-1.0.0/README.md", b"readme"),
            TarEntry::file("tool-1.0.0/tool", b"binary"),
        ]));
        let contents = extract_binary(&archive, "tool").expect("binary present");
        assert_eq!(contents, b"binary");
    }

    #[test]
    fn does_not_match_name_prefixes() {
        let archive = verified(gzip_tarball(&[TarEntry::file("tool-helper", b"other")]));
        let err = extract_binary(&archive, "tool").expect_err("no exact match");
        assert!(matches!(err, ExtractionError::BinaryNotFound { .. }));
    }

    #[test]
    fn empty_archive_reports_missing_binary() {
        let archive = verified(gzip_tarball(&[]));
        let err = extract_binary(&archive, "tool").expect_err("empty");
        assert!(matches!(err, ExtractionError::BinaryNotFound { ref binary } if binary == "tool"));
    }

    #[test]
    fn corrupt_archive_reports_io_error() {
        let archive = verified(b"not a gzip stream".to_vec());
        let err = extract_binary(&archive, "tool").expect_err("corrupt");
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[rstest]
    #[case::parent_dir("../escape")]
    #[case::nested_parent("foo/../../escape")]
    #[case::absolute("/usr/local/bin/tool")]
    fn rejects_path_traversal(#[case] bad_path: &str) {
        let path = PathBuf::from(bad_path);
        let result = validate_entry_path(&path);
        assert!(
            matches!(result, Err(ExtractionError::PathTraversal { .. })),
            "expected PathTraversal for {bad_path}"
        );
    }

    #[rstest]
    #[case::parent_dir("../tool")]
    #[case::nested_parent("tool-1.0.0/../../tool")]
    #[case::absolute("/usr/local/bin/tool")]
    fn archive_with_escaping_entry_is_rejected(#[case] entry_path: &str) {
        let archive = verified(gzip_tarball_with_raw_path(entry_path, b"#!/bin/sh\n"));

        let err = extract_binary(&archive, "tool").expect_err("escaping entry");

        match err {
            ExtractionError::PathTraversal { path } => assert_eq!(path, entry_path),
            other => panic!("expected PathTraversal, got {other:?}"),
        }
    }

    #[test]
    fn accepts_normal_paths() {
        assert!(validate_entry_path(&PathBuf::from("tool-1.0.0/tool")).is_ok());
    }
}
