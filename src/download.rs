// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::backend::Blob;
use crate::{Error, ExportFormat, PixelSize};

/// Returns a file name for an exported item.
///
/// Format: `<slug>-<width>x<height>.<ext>`.
pub fn export_filename(name: &str, size: PixelSize, format: ExportFormat) -> String {
    format!("{}-{}.{}", slugify(name), size, format.extension())
}

/// Lower-cases a name, collapses whitespace runs into `-`
/// and drops everything outside `[a-z0-9-]`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_space = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !prev_space {
                slug.push('-');
            }
            prev_space = true;
            continue;
        }

        prev_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    slug
}

/// A destination for exported images.
pub trait DownloadSink {
    /// Saves the bytes under the file name.
    ///
    /// Returns where the bytes were saved.
    fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, Error>;
}

/// Saves files into a directory.
///
/// Data is written into a uniquely named temporary file first,
/// which is renamed on success and removed otherwise.
/// Concurrent saves under the same name never share a file.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a new sink.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        DirectorySink { dir: dir.into() }
    }

    /// Returns the output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, Error> {
        let path = self.dir.join(filename);
        let mut part = tempfile::Builder::new()
            .prefix(".svgshelf-")
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        part.write_all(data)?;
        part.as_file().sync_all()?;
        part.persist(&path).map_err(|e| e.error)?;
        Ok(path)
    }
}

/// Writes files to the stdout.
#[derive(Clone, Copy, Default, Debug)]
pub struct StdoutSink;

impl DownloadSink for StdoutSink {
    fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, Error> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(data)?;
        handle.flush()?;
        Ok(PathBuf::from(filename))
    }
}

/// Saves a blob using a sink.
pub fn trigger_download<S: DownloadSink + ?Sized>(
    sink: &S,
    blob: &Blob,
    filename: &str,
) -> Result<PathBuf, Error> {
    let path = sink.save(filename, &blob.data)?;
    log::debug!(
        "Saved {} bytes of {} to '{}'.",
        blob.data.len(),
        blob.mime_type(),
        path.display()
    );
    Ok(path)
}
