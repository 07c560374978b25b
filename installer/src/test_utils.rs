//! Shared test utilities for the installer crate.

use crate::artefact::download::{ArtefactDownloader, DownloadError};
use crate::artefact::verification::compute_sha256;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::cell::RefCell;
use std::collections::HashMap;

/// One file to place in a test tarball.
#[derive(Debug, Clone)]
pub struct TarEntry {
    /// Path of the entry inside the archive.
    pub path: String,
    /// File contents.
    pub contents: Vec<u8>,
    /// Unix mode bits recorded in the header.
    pub mode: u32,
}

impl TarEntry {
    /// A regular, non-executable file.
    pub fn file(path: &str, contents: &[u8]) -> Self {
        Self {
            path: path.to_owned(),
            contents: contents.to_vec(),
            mode: 0o644,
        }
    }

    /// An executable shell script that exits with `exit_code` on any input.
    pub fn script(path: &str, exit_code: i32) -> Self {
        Self {
            path: path.to_owned(),
            contents: shell_script(exit_code).into_bytes(),
            mode: 0o755,
        }
    }
}

/// Returns a POSIX shell script body that exits with `exit_code`.
pub fn shell_script(exit_code: i32) -> String {
    format!("#!/bin/sh\necho \"usage: tool [--help]\"\nexit {exit_code}\n")
}

/// Build a gzip-compressed tarball holding `entries`.
pub fn gzip_tarball(entries: &[TarEntry]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for entry in entries {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(entry.contents.len() as u64);
        header.set_mode(entry.mode);
        header.set_cksum();
        builder
            .append_data(&mut header, &entry.path, entry.contents.as_slice())
            .expect("append tar entry");
    }
    let encoder = builder.into_inner().expect("tar finish");
    encoder.finish().expect("gzip finish")
}

/// Build a gzip tarball with a single entry whose header path is written
/// verbatim.
///
/// `tar::Builder::append_data` refuses `..` components and absolute paths,
/// so hostile archives are assembled from a raw header instead.
pub fn gzip_tarball_with_raw_path(path: &str, contents: &[u8]) -> Vec<u8> {
    let mut header = tar::Header::new_gnu();
    let name = path.as_bytes();
    header.as_old_mut().name[..name.len()].copy_from_slice(name);
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(contents.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();

    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    builder.append(&header, contents).expect("append raw tar entry");
    let encoder = builder.into_inner().expect("tar finish");
    encoder.finish().expect("gzip finish")
}

/// Returns the lowercase hex SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    compute_sha256(bytes).into_inner()
}

/// An [`ArtefactDownloader`] that serves canned bodies by URL.
///
/// URLs without a canned body return [`DownloadError::NotFound`]. Every
/// requested URL is recorded so tests can assert on network activity.
#[derive(Debug, Default)]
pub struct StubDownloader {
    bodies: HashMap<String, Vec<u8>>,
    failure: Option<String>,
    requests: RefCell<Vec<String>>,
}

impl StubDownloader {
    /// Creates a downloader that knows no URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with_body(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_owned(), body);
        self
    }

    /// Fail every request with an HTTP error carrying `reason`.
    #[must_use]
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_owned());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ArtefactDownloader for StubDownloader {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        self.requests.borrow_mut().push(url.to_owned());
        if let Some(reason) = &self.failure {
            return Err(DownloadError::HttpError {
                url: url.to_owned(),
                reason: reason.clone(),
            });
        }
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| DownloadError::NotFound {
                url: url.to_owned(),
            })
    }
}
