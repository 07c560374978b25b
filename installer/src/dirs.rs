//! Directory resolution abstraction for platform-specific paths.
//!
//! The install destination defaults to the user's executable directory. The
//! lookup goes through [`BaseDirs`] so tests can inject fixed locations
//! instead of reading the real environment.

use camino::Utf8PathBuf;

/// Environment variable that overrides the default bin directory.
pub const BIN_DIR_ENV: &str = "GIT_PROFILES_BIN_DIR";

/// Source of base directories for the current user.
pub trait BaseDirs {
    /// The platform executable directory (e.g. `~/.local/bin`), if defined.
    fn executable_dir(&self) -> Option<Utf8PathBuf>;

    /// The user's home directory, if known.
    fn home_dir(&self) -> Option<Utf8PathBuf>;

    /// The bin directory override from the environment, if set.
    fn env_bin_dir(&self) -> Option<Utf8PathBuf>;
}

/// [`BaseDirs`] backed by `directories-next` and the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn executable_dir(&self) -> Option<Utf8PathBuf> {
        directories_next::BaseDirs::new()
            .and_then(|dirs| dirs.executable_dir().map(std::path::Path::to_path_buf))
            .and_then(|path| Utf8PathBuf::try_from(path).ok())
    }

    fn home_dir(&self) -> Option<Utf8PathBuf> {
        directories_next::BaseDirs::new()
            .and_then(|dirs| Utf8PathBuf::try_from(dirs.home_dir().to_path_buf()).ok())
    }

    fn env_bin_dir(&self) -> Option<Utf8PathBuf> {
        std::env::var(BIN_DIR_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(Utf8PathBuf::from)
    }
}

/// Resolve the default bin directory.
///
/// Order: the [`BIN_DIR_ENV`] override, the platform executable directory,
/// then `$HOME/.local/bin`. macOS defines no executable directory, so the
/// home fallback is the usual result there.
#[must_use]
pub fn default_bin_dir(dirs: &dyn BaseDirs) -> Option<Utf8PathBuf> {
    dirs.env_bin_dir()
        .or_else(|| dirs.executable_dir())
        .or_else(|| dirs.home_dir().map(|home| home.join(".local").join("bin")))
}
