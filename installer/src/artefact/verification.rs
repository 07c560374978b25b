//! Checksum verification for downloaded release archives.
//!
//! [`VerifiedArchive`] can only be obtained through [`verify_archive`] or
//! [`fetch_and_verify`], so every byte that reaches extraction has already
//! matched the artifact's SHA-256 checksum.

use crate::artefact::download::ArtefactDownloader;
use crate::error::{InstallerError, Result};
use git_profiles_formula::{ReleaseArtifact, Sha256Digest};
use log::debug;
use sha2::{Digest, Sha256};

/// Archive bytes whose SHA-256 matched the expected checksum.
#[derive(Debug)]
pub struct VerifiedArchive {
    bytes: Vec<u8>,
    sha256: Sha256Digest,
}

impl VerifiedArchive {
    /// The verified archive bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The checksum the bytes were verified against.
    #[must_use]
    pub const fn sha256(&self) -> &Sha256Digest {
        &self.sha256
    }
}

/// Compute the SHA-256 digest of `bytes`.
///
/// # Examples
///
/// ```
/// use git_profiles_installer::artefact::verification::compute_sha256;
///
/// let digest = compute_sha256(b"");
/// assert_eq!(
///     digest.as_str(),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn compute_sha256(bytes: &[u8]) -> Sha256Digest {
    let digest: [u8; 32] = Sha256::digest(bytes).into();
    Sha256Digest::from_bytes(digest)
}

/// Verify downloaded `bytes` against the artifact's expected checksum.
///
/// # Errors
///
/// Returns [`InstallerError::ChecksumMismatch`] naming the URL and both
/// digests when the computed checksum differs from the expected one.
pub fn verify_archive(artifact: &ReleaseArtifact, bytes: Vec<u8>) -> Result<VerifiedArchive> {
    let actual = compute_sha256(&bytes);
    if &actual != artifact.sha256() {
        return Err(InstallerError::ChecksumMismatch {
            url: artifact.url().to_owned(),
            expected: artifact.sha256().to_string(),
            actual: actual.into_inner(),
        });
    }
    debug!("checksum verified for {}", artifact.archive_name());
    Ok(VerifiedArchive {
        bytes,
        sha256: actual,
    })
}

/// Download the artifact and verify its checksum.
///
/// # Errors
///
/// Returns [`InstallerError::Download`] when the download fails and
/// [`InstallerError::ChecksumMismatch`] when the content does not match.
pub fn fetch_and_verify(
    artifact: &ReleaseArtifact,
    downloader: &dyn ArtefactDownloader,
) -> Result<VerifiedArchive> {
    let bytes = downloader.fetch(artifact.url())?;
    verify_archive(artifact, bytes)
}
