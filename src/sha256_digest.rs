//! Checksums for release archives.
//!
//! Both sides of a verification use [`Sha256Digest`]: the value declared in
//! the formula (or passed on the command line) and the value computed from
//! the downloaded bytes. Only canonical lowercase hex is accepted, so two
//! digests compare equal exactly when their string forms do.

use crate::error::{FormulaError, Result};
use serde::Serialize;
use std::fmt;

/// Raw SHA-256 output size in bytes.
const DIGEST_LEN: usize = 32;

/// A SHA-256 digest in canonical lowercase hex form.
///
/// # Examples
///
/// ```
/// use git_profiles_formula::Sha256Digest;
///
/// let declared = Sha256Digest::try_from("ab".repeat(32)).expect("canonical hex");
/// assert_eq!(declared, Sha256Digest::from_bytes([0xab; 32]));
/// assert!(Sha256Digest::try_from("REPLACE_WITH_ARM64_SHA256").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Encode raw digest output as lowercase hex.
    #[must_use]
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// The hex form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the digest, returning its hex form.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn parse(hex: String) -> Result<Self> {
        let invalid = |reason: String| FormulaError::InvalidSha256Digest { reason };
        if hex.len() != DIGEST_LEN * 2 {
            return Err(invalid(format!(
                "expected {} hex characters, got {} in \"{hex}\"",
                DIGEST_LEN * 2,
                hex.len()
            )));
        }
        match hex.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            Some(c) if c.is_ascii_hexdigit() => {
                Err(invalid("digest must be lowercase".to_owned()))
            }
            Some(c) => Err(invalid(format!("non-hex character '{c}'"))),
            None => Ok(Self(hex)),
        }
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = FormulaError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value.to_owned())
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = FormulaError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::too_short("abcdef", "got 6")]
    #[case::too_long(&"a".repeat(65), "got 65")]
    #[case::non_hex(&format!("{}g", "a".repeat(63)), "non-hex character 'g'")]
    #[case::uppercase(&"A".repeat(64), "lowercase")]
    #[case::placeholder("REPLACE_WITH_ARM64_SHA256", "expected 64 hex characters")]
    fn rejects_non_canonical_hex(#[case] value: &str, #[case] reason_part: &str) {
        match Sha256Digest::try_from(value) {
            Err(FormulaError::InvalidSha256Digest { reason }) => {
                assert!(reason.contains(reason_part), "reason: {reason}");
            }
            other => panic!("expected rejection of {value}, got {other:?}"),
        }
    }

    #[test]
    fn computed_and_declared_digests_compare_equal() {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes[0] = 0xde;
        bytes[31] = 0x0f;
        let computed = Sha256Digest::from_bytes(bytes);
        let declared = format!("de{}0f", "0".repeat(60));

        assert_eq!(computed.as_str(), declared);
        assert_eq!(Sha256Digest::try_from(declared).expect("canonical"), computed);
    }

    #[test]
    fn serialises_as_bare_hex_string() {
        let digest = Sha256Digest::from_bytes([0x11; DIGEST_LEN]);
        let rendered = toml::Value::try_from(&digest).expect("serialise");
        assert_eq!(rendered.as_str(), Some(digest.as_str()));
        assert_eq!(digest.to_string(), "11".repeat(32));
    }
}
