//! Host CPU architecture recognised by the formula.
//!
//! Only the two macOS variants the release publishes are accepted: Apple
//! Silicon (`arm64`) and Intel (`x86_64`). Anything else is rejected when the
//! raw architecture string is parsed, before any artifact is selected.

use crate::error::{FormulaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The formula keys for every supported architecture.
const SUPPORTED_ARCHES: &[&str] = &["arm64", "x86_64"];

/// A supported host architecture.
///
/// # Examples
///
/// ```
/// use git_profiles_formula::HostArch;
///
/// let arch: HostArch = "aarch64".parse().expect("supported");
/// assert_eq!(arch, HostArch::Arm64);
/// assert_eq!(arch.url_token(), "aarch64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostArch {
    /// ARM64 (Apple Silicon).
    Arm64,
    /// `x86_64` (Intel).
    X86_64,
}

impl HostArch {
    /// Detect the architecture this binary was compiled for.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::UnsupportedArchitecture`] when the host is
    /// neither `aarch64` nor `x86_64`.
    pub fn detect() -> Result<Self> {
        std::env::consts::ARCH.parse()
    }

    /// Key used for this architecture in the formula's `artifacts` table.
    #[must_use]
    pub const fn formula_key(self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::X86_64 => "x86_64",
        }
    }

    /// Architecture token used in release archive names.
    #[must_use]
    pub const fn url_token(self) -> &'static str {
        match self {
            Self::Arm64 => "aarch64",
            Self::X86_64 => "x86_64",
        }
    }

    /// Return the formula keys of every supported architecture.
    #[must_use]
    pub fn supported() -> &'static [&'static str] {
        SUPPORTED_ARCHES
    }
}

impl FromStr for HostArch {
    type Err = FormulaError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "arm64" | "aarch64" => Ok(Self::Arm64),
            "x86_64" | "amd64" => Ok(Self::X86_64),
            _ => Err(FormulaError::UnsupportedArchitecture {
                value: value.to_owned(),
                expected: SUPPORTED_ARCHES.join(", "),
            }),
        }
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rust_arm("aarch64", HostArch::Arm64)]
    #[case::apple_arm("arm64", HostArch::Arm64)]
    #[case::mixed_case("AArch64", HostArch::Arm64)]
    #[case::intel("x86_64", HostArch::X86_64)]
    #[case::amd("amd64", HostArch::X86_64)]
    fn parses_supported_spellings(#[case] raw: &str, #[case] expected: HostArch) {
        assert_eq!(raw.parse::<HostArch>().expect("supported"), expected);
    }

    #[rstest]
    #[case("riscv64")]
    #[case("x86")]
    #[case("powerpc64")]
    #[case("")]
    fn rejects_unsupported_architectures(#[case] raw: &str) {
        let err = raw.parse::<HostArch>().expect_err("unsupported");
        assert!(
            matches!(err, FormulaError::UnsupportedArchitecture { ref value, .. } if value == raw),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn display_uses_formula_key() {
        assert_eq!(HostArch::Arm64.to_string(), "arm64");
        assert_eq!(HostArch::X86_64.to_string(), "x86_64");
    }

    #[test]
    fn supported_matches_formula_keys() {
        let keys: Vec<_> = [HostArch::Arm64, HostArch::X86_64]
            .into_iter()
            .map(HostArch::formula_key)
            .collect();
        assert_eq!(keys, HostArch::supported());
    }
}
