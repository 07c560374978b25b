//! CLI argument definitions for the git-profiles installer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Install the prebuilt git-profiles-cli binary.
#[derive(Parser, Debug)]
#[command(name = "git-profiles-installer")]
#[command(version, about)]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = concat!(
    "Install the prebuilt git-profiles-cli binary.\n\n",
    "The installer picks the release archive for the host architecture ",
    "(arm64 or x86_64), downloads it, verifies its SHA-256 checksum, copies ",
    "the binary into a bin directory, and checks that `git-profiles-cli --help` ",
    "exits successfully.\n\n",
    "Nothing is written unless the checksum matches.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install for the host architecture:\n",
    "    $ git-profiles-installer --sha256 <HEX>\n\n",
    "  Install into a specific directory:\n",
    "    $ git-profiles-installer --bin-dir /usr/local/bin --sha256 <HEX>\n\n",
    "  Preview the selected artifact:\n",
    "    $ git-profiles-installer --dry-run --arch x86_64 --sha256 <HEX>\n\n",
    "  Show formula metadata:\n",
    "    $ git-profiles-installer info --json\n\n",
    "For more information, see: https://github.com/MikAoJk/git-profiles-cli",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Install arguments (used when no subcommand is given; they cannot be
    /// combined with a subcommand).
    #[command(flatten)]
    pub install: InstallArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Install the binary (default when no subcommand given).
    Install(InstallArgs),

    /// Show formula metadata.
    Info(InfoArgs),

    /// Run the smoke test against the installed binary.
    Test(LocationArgs),

    /// Remove the installed binary.
    Uninstall(LocationArgs),
}

/// Arguments for the install command.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Directory to install the binary into [default: platform-specific].
    #[arg(short, long, value_name = "DIR")]
    pub bin_dir: Option<Utf8PathBuf>,

    /// Load the formula from a TOML file instead of the built-in one.
    #[arg(short, long, value_name = "FILE")]
    pub formula: Option<Utf8PathBuf>,

    /// Override host architecture detection (arm64 or `x86_64`).
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Expected SHA-256 of the release archive, replacing the formula's.
    #[arg(long, value_name = "HEX")]
    pub sha256: Option<String>,

    /// Skip the post-install `--help` smoke test.
    #[arg(long)]
    pub skip_test: bool,

    /// Show the selected artifact and destination, then exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the info command.
#[derive(Parser, Debug, Clone, Default)]
pub struct InfoArgs {
    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,

    /// Load the formula from a TOML file instead of the built-in one.
    #[arg(short, long, value_name = "FILE")]
    pub formula: Option<Utf8PathBuf>,
}

/// Arguments for commands that act on an installed binary.
#[derive(Parser, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Directory the binary was installed into [default: platform-specific].
    #[arg(short, long, value_name = "DIR")]
    pub bin_dir: Option<Utf8PathBuf>,

    /// Load the formula from a TOML file instead of the built-in one.
    #[arg(short, long, value_name = "FILE")]
    pub formula: Option<Utf8PathBuf>,
}

impl Cli {
    /// Returns the effective install arguments.
    ///
    /// If an `Install` subcommand was provided, returns those arguments.
    /// Otherwise returns the flattened install arguments.
    ///
    /// # Note
    ///
    /// For the other subcommands this returns the default flattened install
    /// arguments. Callers should check `self.command` first.
    #[must_use]
    pub fn install_args(&self) -> &InstallArgs {
        match &self.command {
            Some(Command::Install(args)) => args,
            Some(Command::Info(_) | Command::Test(_) | Command::Uninstall(_)) | None => {
                &self.install
            }
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
