//! Install pipeline orchestration.
//!
//! Runs the install sequence for one formula: select the artifact for the
//! host, fetch and verify it, stage the binary next to its destination,
//! smoke test the staged copy, then move it into place. Each step runs only
//! after the previous one succeeded, and the first failure aborts the run
//! with the destination unchanged.

use crate::artefact::download::ArtefactDownloader;
use crate::artefact::verification::fetch_and_verify;
use crate::error::Result;
use crate::output::write_stderr_line;
use crate::resolution::{resolve_artifact, resolve_host_arch};
use crate::smoke::smoke_test;
use crate::stager::stage_binary;
use camino::{Utf8Path, Utf8PathBuf};
use git_profiles_formula::{Formula, ReleaseArtifact};
use std::io::Write;

/// Inputs for one install run.
#[derive(Debug)]
pub struct InstallRequest<'a> {
    /// The formula to install.
    pub formula: &'a Formula,
    /// Architecture override; the host is detected when `None`.
    pub arch: Option<&'a str>,
    /// Checksum override for the selected artifact.
    pub sha256: Option<&'a str>,
    /// Directory the binary is installed into.
    pub bin_dir: &'a Utf8Path,
    /// Skip the post-install smoke test.
    pub skip_test: bool,
    /// Suppress progress output.
    pub quiet: bool,
}

/// The outcome of a successful install run.
#[derive(Debug)]
pub struct InstallReport {
    /// The artifact that was installed.
    pub artifact: ReleaseArtifact,
    /// Path of the installed binary.
    pub installed_path: Utf8PathBuf,
    /// Whether the smoke test ran (and therefore passed).
    pub smoke_tested: bool,
}

/// Run the install pipeline against the given downloader.
///
/// # Errors
///
/// Returns the error of the first step that fails. Selection errors occur
/// before any download, and checksum errors before anything is written. A
/// smoke test failure discards the staged binary and keeps any previous
/// install in place.
pub fn run_install(
    request: &InstallRequest<'_>,
    downloader: &dyn ArtefactDownloader,
    stderr: &mut dyn Write,
) -> Result<InstallReport> {
    let arch = resolve_host_arch(request.arch)?;
    let artifact = resolve_artifact(request.formula, arch, request.sha256)?;

    progress(
        request.quiet,
        stderr,
        format!("Downloading {} for {arch}...", artifact.archive_name()),
    );
    let archive = fetch_and_verify(&artifact, downloader)?;
    progress(
        request.quiet,
        stderr,
        format!("Verified SHA-256 {}", archive.sha256()),
    );

    progress(
        request.quiet,
        stderr,
        format!("Installing {} to {}...", artifact.binary(), request.bin_dir),
    );
    let staged = stage_binary(&archive, artifact.binary(), request.bin_dir)?;

    // A binary failing `--help` must never replace the destination.
    if !request.skip_test {
        progress(
            request.quiet,
            stderr,
            format!("Testing {} --help...", artifact.binary()),
        );
        smoke_test(staged.path())?;
    }
    let installed_path = staged.commit()?;

    Ok(InstallReport {
        artifact,
        installed_path,
        smoke_tested: !request.skip_test,
    })
}

fn progress(quiet: bool, stderr: &mut dyn Write, message: String) {
    if !quiet {
        write_stderr_line(stderr, message);
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
