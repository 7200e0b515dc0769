//! Numbered file names: `report.json`, `report(1).json`, `report(2).json`, ...

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

/// Path of slot `index`; slot 0 is the bare name
pub fn numbered_path(dir: &Path, base_name: &str, ext: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.{}", base_name, ext))
    } else {
        dir.join(format!("{}({}).{}", base_name, index, ext))
    }
}

/// First slot whose path does not exist yet
fn next_available_index(dir: &Path, base_name: &str, ext: &str) -> usize {
    let mut index = 0;
    while numbered_path(dir, base_name, ext, index).exists() {
        index += 1;
    }
    index
}

/// First unused path in the sequence `base.ext`, `base(1).ext`, `base(2).ext`, ...
pub fn next_available_path(dir: &Path, base_name: &str, ext: &str) -> PathBuf {
    numbered_path(dir, base_name, ext, next_available_index(dir, base_name, ext))
}

/// Create the first free numbered file and write `contents` into it.
///
/// The file is opened with `create_new`, so a slot taken by a concurrent
/// writer between the scan and the open is skipped instead of overwritten.
pub fn create_numbered_file(
    dir: &Path,
    base_name: &str,
    ext: &str,
    contents: &[u8],
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let mut index = next_available_index(dir, base_name, ext);
    loop {
        let path = numbered_path(dir, base_name, ext, index);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return keep_or_remove(path, write_all(file, contents)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => index += 1,
            Err(e) => return Err(e),
        }
    }
}

fn write_all(mut file: File, contents: &[u8]) -> io::Result<()> {
    file.write_all(contents)?;
    file.sync_all()
}

/// A slot whose write failed is released rather than left half-written
fn keep_or_remove(path: PathBuf, written: io::Result<()>) -> io::Result<PathBuf> {
    match written {
        Ok(()) => Ok(path),
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %remove_err, "could not remove partial file");
            }
            Err(e)
        }
    }
}
