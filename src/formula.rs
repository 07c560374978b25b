//! Release descriptor for the prebuilt binary.
//!
//! A [`Formula`] records the informational metadata of a release together
//! with one download URL and checksum per supported architecture. The
//! descriptor ships embedded in the crate and may be replaced at runtime by
//! a TOML file of the same shape.
//!
//! Structural validation happens on load: required fields must be present,
//! URLs must use HTTPS, and the binary name must be a bare file name.
//! Checksums are deliberately left as raw strings here and only validated
//! when an artifact is selected, so that a descriptor with placeholder
//! checksums can still be inspected.

use crate::arch::HostArch;
use crate::error::{FormulaError, Result};
use camino::Utf8Path;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The descriptor compiled into the crate.
const BUILTIN_FORMULA: &str = include_str!("../formula/git-profiles-cli.toml");

/// Download location and expected checksum for one architecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactEntry {
    url: String,
    sha256: String,
}

impl ArtifactEntry {
    /// Create an entry from a URL and a raw checksum string.
    #[must_use]
    pub fn new(url: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            sha256: sha256.into(),
        }
    }

    /// The HTTPS URL of the release archive.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The checksum as written in the descriptor.
    #[must_use]
    pub fn sha256(&self) -> &str {
        &self.sha256
    }
}

/// A validated release descriptor.
///
/// # Examples
///
/// ```
/// use git_profiles_formula::Formula;
///
/// let formula = Formula::builtin().expect("built-in formula is valid");
/// assert_eq!(formula.name(), "git-profiles-cli");
/// assert_eq!(formula.version(), "1.0.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formula {
    name: String,
    desc: String,
    homepage: String,
    version: String,
    license: String,
    binary: String,
    artifacts: BTreeMap<HostArch, ArtifactEntry>,
}

impl Formula {
    /// Load the descriptor compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded descriptor fails to parse or
    /// validate, which indicates a packaging defect.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_FORMULA)
    }

    /// Load and validate a descriptor from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Read`] if the file cannot be read, and any
    /// parse or validation error from [`Self::from_toml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self> {
        debug!("loading formula from {path}");
        let contents = std::fs::read_to_string(path).map_err(|source| FormulaError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a descriptor from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Parse`] for malformed TOML, unknown fields, or
    /// unknown architecture keys, and [`FormulaError::InvalidField`] when a
    /// field violates its constraint.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let formula: Self = toml::from_str(contents)?;
        formula.validate()?;
        Ok(formula)
    }

    /// Formula name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description.
    #[must_use]
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Project homepage.
    #[must_use]
    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    /// Release version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// License identifier.
    #[must_use]
    pub fn license(&self) -> &str {
        &self.license
    }

    /// File name of the binary inside the archive and in the bin directory.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// The artifact declared for `arch`, if any.
    #[must_use]
    pub fn artifact(&self, arch: HostArch) -> Option<&ArtifactEntry> {
        self.artifacts.get(&arch)
    }

    /// Iterate over declared artifacts in architecture order.
    pub fn artifacts(&self) -> impl Iterator<Item = (HostArch, &ArtifactEntry)> {
        self.artifacts.iter().map(|(arch, entry)| (*arch, entry))
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("version", &self.version)?;
        validate_binary_name(&self.binary)?;
        if self.artifacts.is_empty() {
            return Err(FormulaError::InvalidField {
                field: "artifacts",
                reason: "at least one architecture must be declared".to_owned(),
            });
        }
        for (arch, entry) in &self.artifacts {
            if !entry.url.starts_with("https://") {
                return Err(FormulaError::InvalidField {
                    field: "url",
                    reason: format!("{arch} artifact must use https, got \"{}\"", entry.url),
                });
            }
        }
        Ok(())
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FormulaError::InvalidField {
            field,
            reason: "must not be empty".to_owned(),
        });
    }
    Ok(())
}

/// The binary is written straight into the bin directory, so it must not
/// carry any path components.
fn validate_binary_name(binary: &str) -> Result<()> {
    require_non_empty("binary", binary)?;
    if binary.contains(['/', '\\']) || binary == "." || binary == ".." {
        return Err(FormulaError::InvalidField {
            field: "binary",
            reason: format!("\"{binary}\" must be a bare file name"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "formula_tests.rs"]
mod tests;
