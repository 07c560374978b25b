//! Formula loading and artifact resolution.
//!
//! Resolution turns CLI input into the single [`ReleaseArtifact`] an install
//! run operates on. It never touches the network, so an unsupported
//! architecture or a bad checksum aborts before any download starts.

use crate::error::Result;
use camino::Utf8Path;
use git_profiles_formula::{
    Formula, FormulaError, HostArch, ReleaseArtifact, Sha256Digest, select_artifact,
};
use log::debug;

/// Load the formula from `path`, or the built-in one when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be read or fails validation.
pub fn load_formula(path: Option<&Utf8Path>) -> Result<Formula> {
    let formula = match path {
        Some(path) => Formula::load(path)?,
        None => Formula::builtin()?,
    };
    debug!("using formula {} {}", formula.name(), formula.version());
    Ok(formula)
}

/// Parse the requested architecture, or detect the host's.
///
/// # Errors
///
/// Returns [`crate::error::InstallerError::UnsupportedArchitecture`] for
/// anything other than the arm64 and `x86_64` variants.
///
/// # Examples
///
/// ```
/// use git_profiles_formula::HostArch;
/// use git_profiles_installer::resolution::resolve_host_arch;
///
/// assert_eq!(resolve_host_arch(Some("arm64")).expect("supported"), HostArch::Arm64);
/// assert!(resolve_host_arch(Some("sparc64")).is_err());
/// ```
pub fn resolve_host_arch(requested: Option<&str>) -> Result<HostArch> {
    let arch = match requested {
        Some(raw) => raw.parse::<HostArch>()?,
        None => HostArch::detect()?,
    };
    Ok(arch)
}

/// Select the artifact for `arch`, optionally replacing its checksum.
///
/// An operator-supplied checksum is accepted in either case and takes the
/// place of whatever the formula declares, so a formula with placeholder
/// checksums is still installable.
///
/// # Errors
///
/// Returns [`crate::error::InstallerError::UnsupportedArchitecture`] when
/// the formula has no artifact for `arch` and
/// [`crate::error::InstallerError::InvalidChecksum`] when the effective
/// checksum is not a SHA-256 digest.
pub fn resolve_artifact(
    formula: &Formula,
    arch: HostArch,
    sha256_override: Option<&str>,
) -> Result<ReleaseArtifact> {
    let Some(raw) = sha256_override else {
        return Ok(select_artifact(formula, arch)?);
    };
    let entry = formula
        .artifact(arch)
        .ok_or_else(|| FormulaError::MissingArtifact {
            formula: formula.name().to_owned(),
            arch: arch.to_string(),
        })?;
    let digest = Sha256Digest::try_from(raw.trim().to_ascii_lowercase())?;
    Ok(ReleaseArtifact::new(
        arch,
        entry.url(),
        digest,
        formula.binary(),
    ))
}
