//! Multipart body for `/api/v0/add`
//!
//! A directory is sent as a flat list of parts whose file names are paths
//! relative to the directory's parent, so the gateway can rebuild the tree.
//! File names are query-escaped; the gateway unescapes them on receipt.

use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

use futures::{stream, TryStreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tokio_util::io::ReaderStream;
use walkdir::{DirEntry, WalkDir};

use crate::domain::errors::UploadError;

const FILE_MIME: &str = "application/octet-stream";
const DIRECTORY_MIME: &str = "application/x-directory";
const SYMLINK_MIME: &str = "application/symlink";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File { len: u64 },
    Directory,
    Symlink { target: PathBuf },
}

/// One part of the upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
    /// `/`-separated name sent as the part's file name
    pub name: String,
    pub source: PathBuf,
    pub kind: EntryKind,
}

impl FormEntry {
    fn into_part(self) -> Result<Part, UploadError> {
        let part = match self.kind {
            EntryKind::File { len } => {
                Part::stream_with_length(lazy_file_body(self.source), len).mime_str(FILE_MIME)?
            }
            EntryKind::Directory => Part::bytes(Vec::new()).mime_str(DIRECTORY_MIME)?,
            EntryKind::Symlink { target } => {
                Part::text(target.to_string_lossy().into_owned()).mime_str(SYMLINK_MIME)?
            }
        };
        Ok(part.file_name(query_escape(&self.name)))
    }
}

/// File contents, opened only when the part is first polled.
///
/// At most one file of the form is open at a time while the body streams.
fn lazy_file_body(source: PathBuf) -> Body {
    let open = async move {
        tokio::fs::File::open(&source)
            .await
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", source.display(), e)))
    };
    Body::wrap_stream(stream::once(open).map_ok(ReaderStream::new).try_flatten())
}

/// Build the multipart form for a file or directory
pub fn build_form(path: &Path, hidden: bool) -> Result<Form, UploadError> {
    let mut form = Form::new().percent_encode_noop();
    for entry in collect_entries(path, hidden)? {
        form = form.part("file", entry.into_part()?);
    }
    Ok(form)
}

/// Walk `root` and list the parts to send, parents before children.
///
/// Dot-files below the root are skipped unless `hidden` is set.
pub fn collect_entries(root: &Path, hidden: bool) -> Result<Vec<FormEntry>, UploadError> {
    let root_name = root_name(root)?;

    let mut entries = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| hidden || e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            UploadError::Filesystem {
                path,
                source: e.into(),
            }
        })?;

        let name = entry_name(&root_name, root, entry.path());
        let source = entry.path().to_path_buf();
        let file_type = entry.file_type();

        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_symlink() {
            let target = std::fs::read_link(&source).map_err(|e| UploadError::Filesystem {
                path: source.clone(),
                source: e,
            })?;
            EntryKind::Symlink { target }
        } else {
            let metadata = entry.metadata().map_err(|e| UploadError::Filesystem {
                path: source.clone(),
                source: e.into(),
            })?;
            EntryKind::File {
                len: metadata.len(),
            }
        };

        entries.push(FormEntry { name, source, kind });
    }

    Ok(entries)
}

/// Escape a name the way the gateway expects part file names
pub fn query_escape(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                escaped.push(byte as char)
            }
            b' ' => escaped.push('+'),
            _ => escaped.push_str(&format!("%{:02X}", byte)),
        }
    }
    escaped
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

fn root_name(root: &Path) -> Result<String, UploadError> {
    let name = match root.file_name() {
        Some(name) => name.to_os_string(),
        None => std::fs::canonicalize(root)
            .map_err(|source| UploadError::Filesystem {
                path: root.to_path_buf(),
                source,
            })?
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| {
                UploadError::InvalidRequest(format!("cannot upload {}", root.display()))
            })?,
    };
    Ok(name.to_string_lossy().into_owned())
}

fn entry_name(root_name: &str, root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut name = root_name.to_string();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            name.push('/');
            name.push_str(&part.to_string_lossy());
        }
    }
    name
}
