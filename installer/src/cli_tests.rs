//! Tests for installer CLI parsing and default behaviours.

use super::*;
use rstest::rstest;

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["git-profiles-installer"]);
    assert!(cli.command.is_none());
    assert!(cli.install.bin_dir.is_none());
    assert!(cli.install.formula.is_none());
    assert!(cli.install.arch.is_none());
    assert!(cli.install.sha256.is_none());
    assert!(!cli.install.skip_test);
    assert!(!cli.install.dry_run);
    assert!(!cli.install.quiet);
}

#[test]
fn cli_parses_install_flags() {
    let cli = Cli::parse_from([
        "git-profiles-installer",
        "-b",
        "/opt/bin",
        "--arch",
        "arm64",
        "--sha256",
        "abc",
        "--skip-test",
        "-q",
    ]);
    assert_eq!(cli.install.bin_dir, Some(Utf8PathBuf::from("/opt/bin")));
    assert_eq!(cli.install.arch.as_deref(), Some("arm64"));
    assert_eq!(cli.install.sha256.as_deref(), Some("abc"));
    assert!(cli.install.skip_test);
    assert!(cli.install.quiet);
}

#[test]
fn install_subcommand_arguments_take_precedence() {
    let cli = Cli::parse_from(["git-profiles-installer", "install", "--dry-run"]);
    assert!(matches!(cli.command, Some(Command::Install(_))));
    assert!(cli.install_args().dry_run);
}

#[rstest]
#[case::info(&["git-profiles-installer", "info"])]
#[case::test(&["git-profiles-installer", "test"])]
#[case::uninstall(&["git-profiles-installer", "uninstall"])]
fn other_subcommands_fall_back_to_default_install_args(#[case] argv: &[&str]) {
    let cli = Cli::parse_from(argv);
    assert!(cli.command.is_some());
    assert!(!cli.install_args().dry_run);
}

#[rstest]
#[case::uninstall(&["git-profiles-installer", "--bin-dir", "/x", "uninstall"])]
#[case::test(&["git-profiles-installer", "--quiet", "test"])]
#[case::info(&["git-profiles-installer", "--formula", "f.toml", "info"])]
fn top_level_install_flags_conflict_with_subcommands(#[case] argv: &[&str]) {
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn subcommand_flags_still_parse_after_the_subcommand() {
    let cli = Cli::try_parse_from(["git-profiles-installer", "uninstall", "--bin-dir", "/x"])
        .expect("flags after the subcommand belong to it");
    assert!(matches!(cli.command, Some(Command::Uninstall(_))));
}

#[test]
fn cli_parses_info_with_json() {
    let cli = Cli::parse_from(["git-profiles-installer", "info", "--json"]);
    match cli.command {
        Some(Command::Info(args)) => assert!(args.json),
        other => panic!("expected Info command, got {other:?}"),
    }
}

#[test]
fn cli_parses_uninstall_bin_dir() {
    let cli = Cli::parse_from(["git-profiles-installer", "uninstall", "--bin-dir", "/tmp/bin"]);
    match cli.command {
        Some(Command::Uninstall(args)) => {
            assert_eq!(args.bin_dir, Some(Utf8PathBuf::from("/tmp/bin")));
        }
        other => panic!("expected Uninstall command, got {other:?}"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
