//! Post-install smoke test.
//!
//! Runs the installed binary with `--help` and requires a zero exit status
//! within a bounded time.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default time allowed for the smoke test to finish.
pub const SMOKE_TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Flag passed to the installed binary.
pub const HELP_FLAG: &str = "--help";

/// `ETXTBSY` on Linux: a freshly written executable can briefly stay open
/// for writing in a process forked concurrently by another thread.
#[cfg(target_os = "linux")]
const TEXT_FILE_BUSY: i32 = 26;

const SPAWN_ATTEMPTS: u32 = 5;

/// Errors arising from the smoke test.
#[derive(Debug, thiserror::Error)]
pub enum SmokeTestError {
    /// The binary could not be started.
    #[error("could not run {binary}: {source}")]
    Spawn {
        /// The binary under test.
        binary: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The binary exited unsuccessfully.
    #[error("`{binary} --help` exited with {status}")]
    Failed {
        /// The binary under test.
        binary: Utf8PathBuf,
        /// Rendered exit status.
        status: String,
    },

    /// The binary did not exit in time and was killed.
    #[error("`{binary} --help` did not finish within {} seconds", .timeout.as_secs())]
    TimedOut {
        /// The binary under test.
        binary: Utf8PathBuf,
        /// The timeout that elapsed.
        timeout: Duration,
    },
}

/// Run `<binary> --help` and require exit status 0.
///
/// # Errors
///
/// Returns a [`SmokeTestError`] when the binary cannot be started, exits
/// with a non-zero status or signal, or exceeds [`SMOKE_TEST_TIMEOUT`].
pub fn smoke_test(binary: &Utf8Path) -> Result<(), SmokeTestError> {
    smoke_test_with_timeout(binary, SMOKE_TEST_TIMEOUT)
}

/// Run the smoke test with an explicit timeout.
///
/// # Errors
///
/// See [`smoke_test`].
pub fn smoke_test_with_timeout(binary: &Utf8Path, timeout: Duration) -> Result<(), SmokeTestError> {
    debug!("running {binary} {HELP_FLAG}");
    let mut child = spawn_help(binary)?;

    let Some(status) = child
        .wait_timeout(timeout)
        .map_err(|source| SmokeTestError::Spawn {
            binary: binary.to_owned(),
            source,
        })?
    else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(SmokeTestError::TimedOut {
            binary: binary.to_owned(),
            timeout,
        });
    };

    if status.success() {
        Ok(())
    } else {
        Err(SmokeTestError::Failed {
            binary: binary.to_owned(),
            status: status.to_string(),
        })
    }
}

fn spawn_help(binary: &Utf8Path) -> Result<Child, SmokeTestError> {
    let mut attempt = 1;
    loop {
        let spawned = Command::new(binary.as_std_path())
            .arg(HELP_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => return Ok(child),
            Err(err) if is_text_file_busy(&err) && attempt < SPAWN_ATTEMPTS => {
                attempt += 1;
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(source) => {
                return Err(SmokeTestError::Spawn {
                    binary: binary.to_owned(),
                    source,
                });
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn is_text_file_busy(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(TEXT_FILE_BUSY)
}

#[cfg(not(target_os = "linux"))]
fn is_text_file_busy(_err: &std::io::Error) -> bool {
    false
}
