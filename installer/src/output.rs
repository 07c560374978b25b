//! Output formatting for the installer CLI.
//!
//! Progress and results are written to stderr. This module formats the
//! success line, the dry-run summary, and the formula metadata listing.

use camino::Utf8Path;
use git_profiles_formula::{Formula, HostArch, ReleaseArtifact};
use serde::Serialize;
use std::io::Write;

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format a success message after installation.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use git_profiles_installer::output::success_message;
///
/// let path = Utf8PathBuf::from("/opt/bin/git-profiles-cli");
/// let msg = success_message("git-profiles-cli", "1.0.1", &path);
/// assert_eq!(msg, "Installed git-profiles-cli 1.0.1 to /opt/bin/git-profiles-cli");
/// ```
#[must_use]
pub fn success_message(name: &str, version: &str, installed_path: &Utf8Path) -> String {
    format!("Installed {name} {version} to {installed_path}")
}

/// Configuration information for dry-run output.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use git_profiles_formula::{HostArch, ReleaseArtifact, Sha256Digest};
/// use git_profiles_installer::output::DryRunInfo;
///
/// let artifact = ReleaseArtifact::new(
///     HostArch::Arm64,
///     "https://example.test/tool-aarch64-apple-darwin.tar.gz",
///     Sha256Digest::try_from("a".repeat(64)).expect("valid"),
///     "tool",
/// );
/// let bin_dir = Utf8PathBuf::from("/opt/bin");
/// let info = DryRunInfo {
///     formula_name: "tool",
///     version: "1.0.0",
///     artifact: &artifact,
///     bin_dir: &bin_dir,
///     skip_test: false,
/// };
///
/// let output = info.display_text();
/// assert!(output.contains("Dry run"));
/// assert!(output.contains("/opt/bin/tool"));
/// ```
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Formula name.
    pub formula_name: &'a str,
    /// Formula version.
    pub version: &'a str,
    /// The artifact that would be installed.
    pub artifact: &'a ReleaseArtifact,
    /// Destination bin directory.
    pub bin_dir: &'a Utf8Path,
    /// Whether the smoke test would be skipped.
    pub skip_test: bool,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        [
            "Dry run - no files will be downloaded or modified".to_owned(),
            String::new(),
            format!("Formula: {} {}", self.formula_name, self.version),
            format!("Architecture: {}", self.artifact.arch()),
            format!("URL: {}", self.artifact.url()),
            format!("SHA-256: {}", self.artifact.sha256()),
            format!("Destination: {}", self.bin_dir.join(self.artifact.binary())),
            format!("Smoke test: {}", if self.skip_test { "skipped" } else { "--help" }),
        ]
        .join("\n")
    }
}

/// Serialisable view of one declared artifact.
#[derive(Debug, Serialize)]
struct ArtifactView<'a> {
    arch: HostArch,
    url: &'a str,
    sha256: &'a str,
}

/// Serialisable view of the formula metadata.
#[derive(Debug, Serialize)]
struct FormulaView<'a> {
    name: &'a str,
    desc: &'a str,
    homepage: &'a str,
    version: &'a str,
    license: &'a str,
    binary: &'a str,
    artifacts: Vec<ArtifactView<'a>>,
}

impl<'a> FormulaView<'a> {
    fn new(formula: &'a Formula) -> Self {
        Self {
            name: formula.name(),
            desc: formula.desc(),
            homepage: formula.homepage(),
            version: formula.version(),
            license: formula.license(),
            binary: formula.binary(),
            artifacts: formula
                .artifacts()
                .map(|(arch, entry)| ArtifactView {
                    arch,
                    url: entry.url(),
                    sha256: entry.sha256(),
                })
                .collect(),
        }
    }
}

/// Format the formula metadata as human-readable text.
#[must_use]
pub fn format_formula_human(formula: &Formula) -> String {
    let mut lines = vec![
        format!("{}: {}", formula.name(), formula.desc()),
        format!("Version: {}", formula.version()),
        format!("License: {}", formula.license()),
        format!("Homepage: {}", formula.homepage()),
        format!("Binary: {}", formula.binary()),
        "Artifacts:".to_owned(),
    ];
    for (arch, entry) in formula.artifacts() {
        lines.push(format!("  {arch}: {}", entry.url()));
        lines.push(format!("    sha256: {}", entry.sha256()));
    }
    lines.join("\n")
}

/// Format the formula metadata as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialisation fails.
pub fn format_formula_json(formula: &Formula) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&FormulaView::new(formula))
}
