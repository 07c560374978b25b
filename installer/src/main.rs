//! git-profiles installer CLI entrypoint.
//!
//! This binary downloads the prebuilt `git-profiles-cli` release archive for
//! the host architecture, verifies its checksum, installs the binary, and
//! smoke tests it. Subcommands show formula metadata, re-run the smoke test,
//! and remove the installed binary.

use camino::Utf8PathBuf;
use clap::Parser;
use git_profiles_formula::Formula;
use git_profiles_installer::artefact::download::HttpDownloader;
use git_profiles_installer::cli::{Cli, Command, InfoArgs, InstallArgs, LocationArgs};
use git_profiles_installer::dirs::{BaseDirs, SystemBaseDirs, default_bin_dir};
use git_profiles_installer::error::{InstallerError, Result};
use git_profiles_installer::output::{
    DryRunInfo, format_formula_human, format_formula_json, success_message, write_stderr_line,
};
use git_profiles_installer::pipeline::{InstallRequest, run_install};
use git_profiles_installer::resolution::{load_formula, resolve_artifact, resolve_host_arch};
use git_profiles_installer::smoke::smoke_test;
use git_profiles_installer::stager::remove_binary;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let mut stdout = std::io::stdout();
    let run_result = run(&cli, &SystemBaseDirs, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    cli: &Cli,
    dirs: &dyn BaseDirs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    match &cli.command {
        Some(Command::Info(args)) => run_info(args, stdout),
        Some(Command::Test(args)) => run_test(args, dirs, stderr),
        Some(Command::Uninstall(args)) => run_uninstall(args, dirs, stderr),
        Some(Command::Install(_)) | None => run_install_command(cli.install_args(), dirs, stderr),
    }
}

/// Installs the binary, or previews the install in dry-run mode.
fn run_install_command(
    args: &InstallArgs,
    dirs: &dyn BaseDirs,
    stderr: &mut dyn Write,
) -> Result<()> {
    let formula = load_formula(args.formula.as_deref())?;
    let bin_dir = resolve_bin_dir(args.bin_dir.as_ref(), dirs)?;

    if args.dry_run {
        let arch = resolve_host_arch(args.arch.as_deref())?;
        let artifact = resolve_artifact(&formula, arch, args.sha256.as_deref())?;
        let info = DryRunInfo {
            formula_name: formula.name(),
            version: formula.version(),
            artifact: &artifact,
            bin_dir: &bin_dir,
            skip_test: args.skip_test,
        };
        write_stderr_line(stderr, info.display_text());
        return Ok(());
    }

    let request = InstallRequest {
        formula: &formula,
        arch: args.arch.as_deref(),
        sha256: args.sha256.as_deref(),
        bin_dir: &bin_dir,
        skip_test: args.skip_test,
        quiet: args.quiet,
    };
    let report = run_install(&request, &HttpDownloader, stderr)?;

    if !args.quiet {
        write_stderr_line(stderr, "");
        write_stderr_line(
            stderr,
            success_message(formula.name(), formula.version(), &report.installed_path),
        );
    }
    Ok(())
}

/// Prints formula metadata to stdout.
fn run_info(args: &InfoArgs, stdout: &mut dyn Write) -> Result<()> {
    let formula = load_formula(args.formula.as_deref())?;
    let output = if args.json {
        format_formula_json(&formula).map_err(|e| InstallerError::WriteFailed {
            source: std::io::Error::other(e),
        })?
    } else {
        format_formula_human(&formula)
    };
    writeln!(stdout, "{output}").map_err(|e| InstallerError::WriteFailed { source: e })?;
    Ok(())
}

/// Re-runs the `--help` smoke test against an installed binary.
fn run_test(args: &LocationArgs, dirs: &dyn BaseDirs, stderr: &mut dyn Write) -> Result<()> {
    let (formula, bin_dir) = resolve_location(args, dirs)?;
    let installed_path = bin_dir.join(formula.binary());
    smoke_test(&installed_path)?;
    write_stderr_line(stderr, format!("{installed_path} --help succeeded"));
    Ok(())
}

/// Removes an installed binary.
fn run_uninstall(args: &LocationArgs, dirs: &dyn BaseDirs, stderr: &mut dyn Write) -> Result<()> {
    let (formula, bin_dir) = resolve_location(args, dirs)?;
    if remove_binary(&bin_dir, formula.binary())? {
        write_stderr_line(
            stderr,
            format!("Removed {}", bin_dir.join(formula.binary())),
        );
    } else {
        write_stderr_line(
            stderr,
            format!("{} is not installed in {bin_dir}", formula.binary()),
        );
    }
    Ok(())
}

fn resolve_location(args: &LocationArgs, dirs: &dyn BaseDirs) -> Result<(Formula, Utf8PathBuf)> {
    let formula = load_formula(args.formula.as_deref())?;
    let bin_dir = resolve_bin_dir(args.bin_dir.as_ref(), dirs)?;
    Ok((formula, bin_dir))
}

/// Uses the CLI bin directory or falls back to the platform default.
fn resolve_bin_dir(cli_bin_dir: Option<&Utf8PathBuf>, dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    cli_bin_dir
        .cloned()
        .or_else(|| default_bin_dir(dirs))
        .ok_or(InstallerError::BinDirNotFound)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
