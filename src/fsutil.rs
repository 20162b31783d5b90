use std::io::{self, Write};
use std::path::Path;

use crate::error::AppError;

/// Prefix of every temporary entry created in the bin root.
pub const TEMP_PREFIX: &str = ".linkwarp-tmp.";

/// Atomically point `link` at `target`: a symlink is made at a random
/// hidden name next to it, then renamed over it.
///
/// `tempfile` retries taken names a bounded number of times; running out is
/// reported as [`AppError::TempExhausted`].
pub fn replace_symlink(dir: &Path, target: &Path, link: &Path) -> Result<(), AppError> {
    let placed = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .make_in(dir, |tmp| symlink(target, tmp))
        .map_err(|err| temp_error(dir, err))?;

    // On failure the temporary link is removed when `err.file` drops.
    placed.persist(link).map_err(|err| AppError::Io(err.error))?;
    Ok(())
}

/// Atomically replace the file at `dest` with `contents`.
pub fn write_atomically(dir: &Path, dest: &Path, contents: &[u8]) -> Result<(), AppError> {
    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(dir)
        .map_err(|err| temp_error(dir, err))?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(dest).map_err(|err| AppError::Io(err.error))?;
    Ok(())
}

fn temp_error(dir: &Path, err: io::Error) -> AppError {
    if err.kind() == io::ErrorKind::AlreadyExists {
        AppError::TempExhausted { dir: dir.to_path_buf() }
    } else {
        AppError::Io(err)
    }
}

#[cfg(unix)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
