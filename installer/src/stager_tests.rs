//! Unit tests for binary placement.

use super::*;
use crate::artefact::verification::{compute_sha256, verify_archive};
use crate::test_utils::{TarEntry, gzip_tarball};
use git_profiles_formula::{HostArch, ReleaseArtifact};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const BINARY: &str = "git-profiles-cli";

fn verified(entries: &[TarEntry]) -> VerifiedArchive {
    let bytes = gzip_tarball(entries);
    let artifact = ReleaseArtifact::new(
        HostArch::Arm64,
        "https://example.test/git-profiles-cli-1.0.1-aarch64-apple-darwin.tar.gz",
        compute_sha256(&bytes),
        BINARY,
    );
    verify_archive(&artifact, bytes).expect("checksum matches")
}

#[fixture]
fn bin_dir() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::try_from(temp.path().join("bin")).expect("UTF-8 path");
    (temp, path)
}

#[rstest]
fn installs_binary_into_fresh_directory(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    let archive = verified(&[TarEntry::file(BINARY, b"new binary")]);

    let path = install_binary(&archive, BINARY, &dir).expect("installed");

    assert_eq!(path, dir.join(BINARY));
    assert_eq!(fs::read(&path).expect("read installed"), b"new binary");
}

#[cfg(unix)]
#[rstest]
fn installed_binary_is_executable(bin_dir: (TempDir, Utf8PathBuf)) {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, dir) = bin_dir;
    let archive = verified(&[TarEntry::file(BINARY, b"binary")]);

    let path = install_binary(&archive, BINARY, &dir).expect("installed");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[rstest]
fn reinstall_overwrites_previous_binary(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    fs::create_dir_all(&dir).expect("create bin dir");
    fs::write(dir.join(BINARY), b"old binary").expect("write old");
    let archive = verified(&[TarEntry::file(BINARY, b"new binary")]);

    install_binary(&archive, BINARY, &dir).expect("installed");

    assert_eq!(fs::read(dir.join(BINARY)).expect("read"), b"new binary");
}

#[rstest]
fn leaves_no_temporary_files_behind(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    let archive = verified(&[TarEntry::file(BINARY, b"binary")]);

    install_binary(&archive, BINARY, &dir).expect("installed");

    let names: Vec<_> = fs::read_dir(&dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from(BINARY)]);
}

#[rstest]
fn missing_binary_leaves_destination_untouched(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    fs::create_dir_all(&dir).expect("create bin dir");
    fs::write(dir.join(BINARY), b"old binary").expect("write old");
    let archive = verified(&[TarEntry::file("README.md", b"docs")]);

    let err = install_binary(&archive, BINARY, &dir).expect_err("binary missing");

    assert!(matches!(err, InstallerError::Extraction { .. }));
    assert_eq!(fs::read(dir.join(BINARY)).expect("read"), b"old binary");
}

#[rstest]
fn directory_at_target_path_is_a_collision(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    fs::create_dir_all(dir.join(BINARY)).expect("create colliding dir");
    let archive = verified(&[TarEntry::file(BINARY, b"binary")]);

    let err = install_binary(&archive, BINARY, &dir).expect_err("collision");

    match err {
        InstallerError::Install { path, reason } => {
            assert_eq!(path, dir.join(BINARY));
            assert!(reason.contains("directory"), "reason: {reason}");
        }
        other => panic!("expected Install error, got {other:?}"),
    }
}

#[rstest]
fn destination_under_a_file_is_an_install_error(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    fs::write(&dir, b"not a directory").expect("write blocking file");
    let archive = verified(&[TarEntry::file(BINARY, b"binary")]);

    let err = install_binary(&archive, BINARY, &dir).expect_err("cannot create dir");

    assert!(matches!(err, InstallerError::Install { .. }));
}

#[rstest]
fn remove_binary_reports_whether_anything_was_removed(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    fs::create_dir_all(&dir).expect("create bin dir");
    fs::write(dir.join(BINARY), b"binary").expect("write binary");

    assert!(remove_binary(&dir, BINARY).expect("removed"));
    assert!(!dir.join(BINARY).exists());
    assert!(!remove_binary(&dir, BINARY).expect("nothing to remove"));
}

#[rstest]
fn uncommitted_stage_is_discarded_on_drop(bin_dir: (TempDir, Utf8PathBuf)) {
    let (_temp, dir) = bin_dir;
    fs::create_dir_all(&dir).expect("create bin dir");
    fs::write(dir.join(BINARY), b"old binary").expect("write old");
    let archive = verified(&[TarEntry::file(BINARY, b"new binary")]);

    let staged = stage_binary(&archive, BINARY, &dir).expect("staged");
    let staged_path = staged.path().to_owned();
    assert_eq!(staged.dest_path(), dir.join(BINARY).as_path());
    assert_eq!(fs::read(&staged_path).expect("read staged"), b"new binary");
    assert_eq!(fs::read(dir.join(BINARY)).expect("read"), b"old binary");

    drop(staged);

    assert!(!staged_path.exists());
    assert_eq!(fs::read(dir.join(BINARY)).expect("read"), b"old binary");
}

#[cfg(unix)]
#[rstest]
fn staged_binary_is_executable_before_commit(bin_dir: (TempDir, Utf8PathBuf)) {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, dir) = bin_dir;
    let archive = verified(&[TarEntry::script(BINARY, 0)]);

    let staged = stage_binary(&archive, BINARY, &dir).expect("staged");

    let mode = fs::metadata(staged.path()).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert!(crate::smoke::smoke_test(staged.path()).is_ok());
    let installed = staged.commit().expect("committed");
    assert_eq!(installed, dir.join(BINARY));
}
