// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Zip snapshots of a directory tree.
//!
//! ```text
//! create_archive(source, target)
//!   File::create(target)            parent dirs created
//!   WalkBuilder(source)             no ignore filters, hidden included,
//!     sorted by file name           symlinks not followed
//!        |
//!        +-- dir      traversed, no entry
//!        +-- symlink  skipped
//!        +-- file     entry "a/b/c.txt" (relative, '/'-separated,
//!                     non-UTF-8 bytes written as %XX)
//!                     deflate, zip64 for >= 4 GiB
//!        |
//!        v
//!   ArchiveSummary { entries, bytes }
//!
//! Missing source  -> valid empty archive
//! Any error       -> ArchiveError, partial target left on disk
//! ```

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::{Component, Path};

use ignore::WalkBuilder;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ArchiveError, display_path};

/// Files at or above this size need zip64 extensions.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// What an archive run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Number of file entries.
    pub entries: usize,
    /// Uncompressed bytes copied.
    pub bytes: u64,
}

/// Write every regular file under `source` into a new zip at `target`.
///
/// # Errors
///
/// Returns an `ArchiveError` naming the failing path if the target cannot be
/// created, the walk fails, a source file cannot be opened, or its bytes
/// cannot be copied. Whatever was written so far stays on disk.
pub fn create_archive(source: &Path, target: &Path) -> Result<ArchiveSummary, ArchiveError> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| ArchiveError::CreateTarget {
            path: display_path(target),
            source,
        })?;
    }

    let file = File::create(target).map_err(|source| ArchiveError::CreateTarget {
        path: display_path(target),
        source,
    })?;
    let mut zip = ZipWriter::new(file);
    let mut summary = ArchiveSummary::default();

    if source.is_dir() {
        for entry in build_walker(source).build() {
            let entry = entry.map_err(|e| ArchiveError::Walk {
                path: display_path(walk_error_path(&e).unwrap_or(source)),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let bytes = add_file(&mut zip, source, entry.path())?;
            summary.entries += 1;
            summary.bytes += bytes;
        }
    } else {
        debug!(source = %source.display(), "source missing, writing empty archive");
    }

    zip.finish().map_err(|source| ArchiveError::Zip {
        path: display_path(target),
        source,
    })?;

    info!(
        archive = %target.display(),
        entries = summary.entries,
        bytes = summary.bytes,
        "archive created"
    );
    Ok(summary)
}

fn build_walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    builder
}

/// Innermost path an `ignore` error is attached to.
fn walk_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, err } => walk_error_path(err).or(Some(path.as_path())),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

fn add_file(zip: &mut ZipWriter<File>, root: &Path, path: &Path) -> Result<u64, ArchiveError> {
    let mut src = File::open(path).map_err(|source| ArchiveError::OpenSource {
        path: display_path(path),
        source,
    })?;
    let metadata = src.metadata().map_err(|source| ArchiveError::OpenSource {
        path: display_path(path),
        source,
    })?;

    let name = entry_name(root, path);
    let options = file_options(&metadata);
    zip.start_file(name, options)
        .map_err(|source| ArchiveError::Zip {
            path: display_path(path),
            source,
        })?;

    io::copy(&mut src, zip).map_err(|source| ArchiveError::Copy {
        path: display_path(path),
        source,
    })
}

fn file_options(metadata: &std::fs::Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(metadata.len() >= ZIP64_THRESHOLD);

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    };

    options
}

/// Zip entry name: path relative to `root`, components joined with `/`.
///
/// Zip names are strings, so a component that is not valid UTF-8 keeps its
/// valid runs, escapes `%` as `%25` and writes every other byte as `%XX`.
/// Distinct file names therefore never collapse into one entry.
pub(crate) fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(component_name(part)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn component_name(part: &OsStr) -> Cow<'_, str> {
    if let Some(name) = part.to_str() {
        return Cow::Borrowed(name);
    }
    Cow::Owned(escape_bytes(part))
}

#[cfg(unix)]
fn escape_bytes(part: &OsStr) -> String {
    use std::fmt::Write;
    use std::os::unix::ffi::OsStrExt;

    let mut out = String::new();
    for chunk in part.as_bytes().utf8_chunks() {
        out.push_str(&chunk.valid().replace('%', "%25"));
        for byte in chunk.invalid() {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(not(unix))]
fn escape_bytes(part: &OsStr) -> String {
    part.to_string_lossy().into_owned()
}
