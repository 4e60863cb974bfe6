//! Content upload and download.
//!
//! The chunked transfer itself is the store's business. Uploads hand a
//! resumable [`Media`] to [`DriveFs::create`]; downloads drive
//! [`MediaDownload::next_chunk`](crate::remote::MediaDownload::next_chunk)
//! until the store reports completion.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{map_remote_error, Result};
use crate::filesystem::DriveFs;
use crate::record::ObjectRecord;
use crate::remote::{Chunk, Media, MediaDownload, RemoteStore};

/// Extension to MIME type table for uploads without an explicit type.
const MIME_TYPES: &[(&str, &str)] = &[
    ("bmp", "image/bmp"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("gif", "image/gif"),
    ("gz", "application/gzip"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("svg", "image/svg+xml"),
    ("tar", "application/x-tar"),
    ("tsv", "text/tab-separated-values"),
    ("txt", "text/plain"),
    ("wav", "audio/wav"),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xml", "application/xml"),
    ("yaml", "application/yaml"),
    ("yml", "application/yaml"),
    ("zip", "application/zip"),
];

/// Guess a MIME type from the extension of `name`.
///
/// Matching is case-insensitive. Names without an extension, and dotfiles
/// such as `.bashrc`, yield `None`.
///
/// # Examples
///
/// ```
/// use drivepath::operations::guess_mime_type;
///
/// assert_eq!(guess_mime_type("/reports/q1.CSV"), Some("text/csv"));
/// assert_eq!(guess_mime_type("README"), None);
/// ```
#[must_use]
pub fn guess_mime_type(name: &str) -> Option<&'static str> {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let extension = extension.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

impl<S: RemoteStore> DriveFs<S> {
    /// Create a file at `path` with the content of `reader`.
    ///
    /// Without `mime_type` the type is guessed from `path`, falling back
    /// to the configured unknown type.
    ///
    /// # Errors
    ///
    /// Same as [`DriveFs::create`].
    pub fn upload<R>(&self, path: &str, reader: R, mime_type: Option<&str>) -> Result<ObjectRecord>
    where
        R: Read + Send + 'static,
    {
        let mime_type = self.upload_mime_type(path, mime_type);
        let media = Media::resumable(mime_type.clone(), reader, self.settings().upload_chunk_size);
        debug!("uploading '{}' as {}", path, mime_type);
        self.create(path, Some(&mime_type), Some(media))
    }

    /// Create a file at `path` with the content of the local file `local`.
    ///
    /// Without `mime_type` the type is guessed from the local file name.
    ///
    /// # Errors
    ///
    /// Returns `Io` if `local` cannot be opened, otherwise the same as
    /// [`DriveFs::create`].
    pub fn upload_from_file(
        &self,
        path: &str,
        local: &Path,
        mime_type: Option<&str>,
    ) -> Result<ObjectRecord> {
        let file = File::open(local)?;
        let local_name = local.to_string_lossy();
        let mime_type = self.upload_mime_type(&local_name, mime_type);
        self.upload(path, BufReader::new(file), Some(&mime_type))
    }

    /// The full content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve, or the mapped remote
    /// failure (folders cannot be downloaded).
    pub fn download(&self, path: &str) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        self.download_to(path, &mut content)?;
        Ok(content)
    }

    /// Stream the content of the file at `path` into `writer`, returning
    /// the number of bytes written.
    ///
    /// # Errors
    ///
    /// Same as [`DriveFs::download`], plus `Io` when writing fails.
    pub fn download_to<W>(&self, path: &str, writer: &mut W) -> Result<u64>
    where
        W: Write + ?Sized,
    {
        let target = self.stat(path, None)?;
        let (mut download, first) = self.start_download(&target.id, path)?;
        drain_download(path, download.as_mut(), first, writer)
    }

    /// Download the file at `path` into the local file `local`, replacing
    /// it if present.
    ///
    /// Content goes to a temporary file next to `local` that replaces it
    /// only once the whole download succeeded. A refused or failed download
    /// leaves an existing `local` untouched.
    ///
    /// # Errors
    ///
    /// Same as [`DriveFs::download_to`], plus `Io` if `local` cannot be
    /// written.
    pub fn download_to_file(&self, path: &str, local: &Path) -> Result<u64> {
        let target = self.stat(path, None)?;
        let (mut download, first) = self.start_download(&target.id, path)?;

        let dir = match local.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staging = NamedTempFile::new_in(dir)?;
        let written = drain_download(path, download.as_mut(), first, staging.as_file_mut())?;
        staging.persist(local).map_err(|e| e.error)?;
        debug!("downloaded '{}' to {}", path, local.display());
        Ok(written)
    }

    /// Open a download of object `id` and fetch its first chunk.
    fn start_download(&self, id: &str, path: &str) -> Result<(Box<dyn MediaDownload + '_>, Chunk)> {
        let mut download = self
            .store()
            .open_download(id, self.settings().download_chunk_size)
            .map_err(|e| map_remote_error(e, path))?;
        let first = download
            .next_chunk()
            .map_err(|e| map_remote_error(e, path))?;
        Ok((download, first))
    }

    fn upload_mime_type(&self, name: &str, explicit: Option<&str>) -> String {
        explicit
            .or_else(|| guess_mime_type(name))
            .unwrap_or(self.settings().unknown_mime_type.as_str())
            .to_string()
    }
}

/// Write `first` and every following chunk of `download` into `writer`.
fn drain_download<W>(
    path: &str,
    download: &mut (dyn MediaDownload + '_),
    first: Chunk,
    writer: &mut W,
) -> Result<u64>
where
    W: Write + ?Sized,
{
    let mut written = 0u64;
    let mut chunk = first;
    loop {
        writer.write_all(&chunk.data)?;
        written += chunk.data.len() as u64;
        match chunk.progress.total {
            Some(total) => debug!("'{}': {}/{} bytes", path, chunk.progress.received, total),
            None => debug!("'{}': {} bytes", path, chunk.progress.received),
        }
        if chunk.progress.done {
            break;
        }
        chunk = download
            .next_chunk()
            .map_err(|e| map_remote_error(e, path))?;
    }
    writer.flush()?;
    Ok(written)
}
