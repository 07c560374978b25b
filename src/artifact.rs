//! The release artifact selected for one install run.

use crate::arch::HostArch;
use crate::error::{FormulaError, Result};
use crate::formula::Formula;
use crate::sha256_digest::Sha256Digest;
use serde::Serialize;

/// The archive chosen for the host, with a validated checksum.
///
/// Built once per install from the formula and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseArtifact {
    arch: HostArch,
    url: String,
    sha256: Sha256Digest,
    binary: String,
}

impl ReleaseArtifact {
    /// Create an artifact record directly.
    #[must_use]
    pub fn new(
        arch: HostArch,
        url: impl Into<String>,
        sha256: Sha256Digest,
        binary: impl Into<String>,
    ) -> Self {
        Self {
            arch,
            url: url.into(),
            sha256,
            binary: binary.into(),
        }
    }

    /// Architecture the artifact was built for.
    #[must_use]
    pub const fn arch(&self) -> HostArch {
        self.arch
    }

    /// Download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Checksum the downloaded bytes must match.
    #[must_use]
    pub const fn sha256(&self) -> &Sha256Digest {
        &self.sha256
    }

    /// Name of the binary to extract.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Last path segment of the URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use git_profiles_formula::{HostArch, ReleaseArtifact, Sha256Digest};
    ///
    /// let digest = Sha256Digest::try_from("a".repeat(64)).expect("valid");
    /// let artifact = ReleaseArtifact::new(
    ///     HostArch::Arm64,
    ///     "https://example.test/v1/tool-aarch64-apple-darwin.tar.gz",
    ///     digest,
    ///     "tool",
    /// );
    /// assert_eq!(artifact.archive_name(), "tool-aarch64-apple-darwin.tar.gz");
    /// ```
    #[must_use]
    pub fn archive_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    /// Replace the expected checksum, e.g. with one supplied by the operator.
    #[must_use]
    pub fn with_sha256(self, sha256: Sha256Digest) -> Self {
        Self { sha256, ..self }
    }
}

/// Map the host architecture to the formula's artifact for it.
///
/// Selection is pure: it touches neither the network nor the filesystem.
///
/// # Errors
///
/// Returns [`FormulaError::MissingArtifact`] when the formula declares
/// nothing for `arch`, and [`FormulaError::InvalidSha256Digest`] when the
/// declared checksum is not a SHA-256 digest.
///
/// # Examples
///
/// ```
/// use git_profiles_formula::{Formula, HostArch, select_artifact};
///
/// let formula = Formula::from_toml_str(&format!(r#"
/// name = "tool"
/// desc = "A tool"
/// homepage = "https://example.test"
/// version = "1.0.0"
/// license = "MIT"
/// binary = "tool"
///
/// [artifacts.x86_64]
/// url = "https://example.test/tool-1.0.0-x86_64-apple-darwin.tar.gz"
/// sha256 = "{}"
/// "#, "b".repeat(64))).expect("valid formula");
///
/// let artifact = select_artifact(&formula, HostArch::X86_64).expect("declared");
/// assert!(artifact.url().contains("x86_64"));
/// ```
pub fn select_artifact(formula: &Formula, arch: HostArch) -> Result<ReleaseArtifact> {
    let entry = formula
        .artifact(arch)
        .ok_or_else(|| FormulaError::MissingArtifact {
            formula: formula.name().to_owned(),
            arch: arch.to_string(),
        })?;
    let sha256 = Sha256Digest::try_from(entry.sha256()).map_err(|err| match err {
        FormulaError::InvalidSha256Digest { reason } => FormulaError::InvalidSha256Digest {
            reason: format!("{arch} checksum in formula {}: {reason}", formula.name()),
        },
        other => other,
    })?;
    Ok(ReleaseArtifact::new(
        arch,
        entry.url(),
        sha256,
        formula.binary(),
    ))
}
