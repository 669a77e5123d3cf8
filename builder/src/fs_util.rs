//! Thin wrappers over `std::fs` used by the build.
//!
//! Every function hands the underlying [`std::io::Error`] back untouched, so
//! callers can match on [`std::io::ErrorKind::NotFound`] or
//! [`std::io::ErrorKind::PermissionDenied`] directly.

use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

/// Create `path` and all of its missing ancestors. Existing directories are fine.
pub fn create_directory(path: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Recursively delete `path`. Fails with `NotFound` if it doesn't exist.
pub fn delete_directory(path: impl AsRef<Path>) -> io::Result<()> {
    fs::remove_dir_all(path)
}

/// Recursively copy the contents of `source` into `destination`.
///
/// The destination may already exist: files present in both trees are
/// overwritten, files only in the destination are left alone.
pub fn copy_directory(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> io::Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    fs::create_dir_all(destination)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_directory(entry.path(), target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }

    Ok(())
}

/// Copy a single file, overwriting `destination` if present.
pub fn copy_file(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> io::Result<()> {
    fs::copy(source, destination)?;
    Ok(())
}

/// Names of all entries (files and directories) directly inside `folder`,
/// in whatever order the platform lists them.
pub fn all_folder_files(folder: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let mut ret = Vec::new();

    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        ret.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(ret)
}

/// Like [`all_folder_files`], keeping only entries whose extension (with the
/// leading dot, e.g. `.md`) is one of `suffixes`.
pub fn folder_files<S: AsRef<str>>(
    folder: impl AsRef<Path>,
    suffixes: &[S],
) -> io::Result<Vec<String>> {
    let files = all_folder_files(folder)?
        .into_iter()
        .filter(|name| {
            let Some(suffix) = suffix(name) else {
                return false;
            };
            suffixes.iter().any(|s| s.as_ref() == suffix)
        })
        .collect();

    Ok(files)
}

/// `notes.md` -> `.md`, `archive.tar.gz` -> `.gz`, `.bashrc` -> none
fn suffix(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

pub fn read_all_text(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

pub fn write_all_text(path: impl AsRef<Path>, text: &str) -> io::Result<()> {
    fs::write(path, text)
}

/// Append `text` to the end of `path`, creating the file if needed.
pub fn append_all_text(path: impl AsRef<Path>, text: &str) -> io::Result<()> {
    fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?
        .write_all(text.as_bytes())
}

pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a single file. Fails with `NotFound` if it doesn't exist.
pub fn delete_file(path: impl AsRef<Path>) -> io::Result<()> {
    fs::remove_file(path)
}

/// Lexical parent of `path`.
///
/// `docs/html/articlebody.html` -> `docs/html`, `file.txt` -> `.`, and a
/// root is its own parent.
pub fn parent_path(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        Some(_) => ".".to_string(),
        None if path.as_os_str().is_empty() => ".".to_string(),
        None => path.to_string_lossy().into_owned(),
    }
}
