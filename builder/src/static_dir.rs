use std::path::Path;

use include_dir::{Dir, include_dir};

use crate::fs_util;

static STATIC_DIR: Dir = include_dir!("$OUT_DIR/static");

/// Write the bundled assets (`codebox.css`, `js/include-html.js`) into `out_dir`.
pub fn copy_static_dir_to(out_dir: impl AsRef<Path>) -> std::io::Result<()> {
    let out_dir = out_dir.as_ref();
    fs_util::create_directory(out_dir)?;
    copy_dir(&STATIC_DIR, out_dir)
}

fn copy_dir(dir: &Dir, out_dir: &Path) -> std::io::Result<()> {
    for entry in dir.entries() {
        match entry {
            include_dir::DirEntry::Dir(subdir) => {
                copy_dir(subdir, out_dir)?;
            }
            include_dir::DirEntry::File(file) => {
                // entry paths are relative to the embedded root
                let path = out_dir.join(file.path());
                if let Some(parent) = path.parent() {
                    fs_util::create_directory(parent)?;
                }

                log::debug!("install asset: {}", path.display());
                std::fs::write(path, file.contents())?;
            }
        }
    }

    Ok(())
}
