//! Placement of the extracted binary into the bin directory.
//!
//! The binary is first written to a temporary file inside the destination
//! directory. A [`StagedBinary`] can be run from there (the pipeline smoke
//! tests it in place) and is then renamed over the final path with
//! [`StagedBinary::commit`]. The destination therefore holds either the
//! previous binary or the complete, tested new one. Dropping an uncommitted
//! stage removes the temporary file. Re-running an install overwrites the
//! previous binary.

use crate::artefact::extraction::extract_binary;
use crate::artefact::verification::VerifiedArchive;
use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io::Write;
use tempfile::TempPath;

/// Mode applied to installed binaries (rwxr-xr-x).
#[cfg(unix)]
const BINARY_MODE: u32 = 0o755;

/// An executable written next to its destination but not yet in place.
#[derive(Debug)]
pub struct StagedBinary {
    temp_path: TempPath,
    staged_path: Utf8PathBuf,
    dest_path: Utf8PathBuf,
}

impl StagedBinary {
    /// Path of the staged, executable copy.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.staged_path
    }

    /// Path the binary will occupy once committed.
    #[must_use]
    pub fn dest_path(&self) -> &Utf8Path {
        &self.dest_path
    }

    /// Rename the staged copy over the destination.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Install`] if the rename fails; the staged
    /// copy is removed and the destination is left as it was.
    pub fn commit(self) -> Result<Utf8PathBuf> {
        let Self {
            temp_path,
            dest_path,
            ..
        } = self;
        temp_path
            .persist(&dest_path)
            .map_err(|e| install_error(&dest_path, &e.error))?;
        debug!("installed {dest_path}");
        Ok(dest_path)
    }
}

/// Extract `binary` from the verified archive and install it into `dest_dir`.
///
/// Returns the path of the installed binary.
///
/// # Errors
///
/// See [`stage_binary`] and [`StagedBinary::commit`].
pub fn install_binary(
    archive: &VerifiedArchive,
    binary: &str,
    dest_dir: &Utf8Path,
) -> Result<Utf8PathBuf> {
    stage_binary(archive, binary, dest_dir)?.commit()
}

/// Extract `binary` from the verified archive into a temporary executable
/// inside `dest_dir`, leaving any existing binary untouched.
///
/// # Errors
///
/// Returns [`InstallerError::Extraction`] when the archive does not yield
/// the binary, and [`InstallerError::Install`] when the destination cannot
/// be created or written, or a directory already occupies the target path.
pub fn stage_binary(
    archive: &VerifiedArchive,
    binary: &str,
    dest_dir: &Utf8Path,
) -> Result<StagedBinary> {
    let contents = extract_binary(archive, binary).map_err(|source| InstallerError::Extraction {
        binary: binary.to_owned(),
        source,
    })?;

    fs::create_dir_all(dest_dir).map_err(|e| install_error(dest_dir, &e))?;

    let dest_path = dest_dir.join(binary);
    if dest_path.is_dir() {
        return Err(InstallerError::Install {
            path: dest_path,
            reason: "a directory already exists at this path".to_owned(),
        });
    }

    let temp_path = write_staged(&dest_path, dest_dir, binary, &contents)?;
    let staged_path =
        Utf8PathBuf::try_from(temp_path.to_path_buf()).map_err(|e| InstallerError::NonUtf8Path {
            path: e.into_path_buf().display().to_string(),
        })?;
    debug!("staged {} bytes at {staged_path}", contents.len());
    Ok(StagedBinary {
        temp_path,
        staged_path,
        dest_path,
    })
}

/// Remove an installed binary.
///
/// Returns `false` when nothing was installed at the path.
///
/// # Errors
///
/// Returns [`InstallerError::Install`] if the file exists but cannot be
/// removed.
pub fn remove_binary(dest_dir: &Utf8Path, binary: &str) -> Result<bool> {
    let dest_path = dest_dir.join(binary);
    match fs::remove_file(&dest_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(install_error(&dest_path, &e)),
    }
}

/// Write `contents` to an executable temporary file and close it, so the
/// staged copy can be executed without `ETXTBSY`.
fn write_staged(
    dest_path: &Utf8Path,
    dest_dir: &Utf8Path,
    binary: &str,
    contents: &[u8],
) -> Result<TempPath> {
    let mut staged = tempfile::Builder::new()
        .prefix(&format!(".{binary}."))
        .tempfile_in(dest_dir)
        .map_err(|e| install_error(dest_dir, &e))?;

    staged
        .write_all(contents)
        .and_then(|()| staged.flush())
        .map_err(|e| install_error(dest_path, &e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(BINARY_MODE))
            .map_err(|e| install_error(dest_path, &e))?;
    }

    Ok(staged.into_temp_path())
}

fn install_error(path: &Utf8Path, err: &std::io::Error) -> InstallerError {
    InstallerError::Install {
        path: path.to_owned(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
#[path = "stager_tests.rs"]
mod tests;
