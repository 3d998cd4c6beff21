//! Low-level file and symlink copy primitives

use crate::types::{MirrorError, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

const PART_SUFFIX: &str = ".pkgmirror-part";

/// Copy a file over `dest` using the write-then-rename strategy
///
/// 1. Write to a temporary `<name>.pkgmirror-part` next to `dest`
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, mtime)
/// 4. Rename onto `dest`, replacing any existing file
///
/// Parent directories of `dest` are created as needed. If `dest` is an
/// existing directory the copy fails with `AlreadyExists`.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(MirrorError)` - IO error or other failure
///
/// # Example
/// ```no_run
/// use pkgmirror::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("dest.txt"))?;
/// # Ok::<(), pkgmirror::MirrorError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| MirrorError::at(parent, e))?;
    }

    if fs::symlink_metadata(dest).is_ok_and(|m| m.is_dir()) {
        return Err(MirrorError::at(
            dest,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination is a directory, refusing to replace it with a file",
            ),
        ));
    }

    let part_path = part_path_for(dest);
    let result = write_part_file(src, &part_path).and_then(|bytes| {
        fs::rename(&part_path, dest).map_err(|e| MirrorError::at(dest, e))?;
        Ok(bytes)
    });

    if result.is_err() {
        // Leave nothing half-written behind; the original error wins
        let _ = fs::remove_file(&part_path);
    }
    result
}

fn write_part_file(src: &Path, part_path: &Path) -> Result<u64> {
    let mut src_file = File::open(src).map_err(|e| MirrorError::at(src, e))?;
    let mut part_file = File::create(part_path).map_err(|e| MirrorError::at(part_path, e))?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file
            .read(&mut buffer)
            .map_err(|e| MirrorError::at(src, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        part_file
            .write_all(&buffer[0..bytes_read])
            .map_err(|e| MirrorError::at(part_path, e))?;
        total_bytes += bytes_read as u64;
    }

    part_file
        .sync_all()
        .map_err(|e| MirrorError::at(part_path, e))?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    let src_metadata = fs::metadata(src).map_err(|e| MirrorError::at(src, e))?;
    fs::set_permissions(part_path, src_metadata.permissions())
        .map_err(|e| MirrorError::at(part_path, e))?;

    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(part_path, mtime).map_err(|e| MirrorError::at(part_path, e))?;

    Ok(total_bytes)
}

/// Temporary sibling used while writing `dest`
///
/// The suffix is appended to the full file name so `a.txt` and `a.php`
/// never share a temporary.
pub(crate) fn part_path_for(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    dest.with_file_name(name)
}

/// Recreate the symlink at `src` as `dest` without dereferencing it
///
/// An existing file or symlink at `dest` is replaced. An existing
/// directory is not.
pub fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| MirrorError::at(parent, e))?;
    }

    let target = fs::read_link(src).map_err(|e| MirrorError::at(src, e))?;

    if let Ok(metadata) = fs::symlink_metadata(dest) {
        if metadata.is_dir() {
            return Err(MirrorError::at(
                dest,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "destination is a directory, refusing to replace it with a symlink",
                ),
            ));
        }
        fs::remove_file(dest).map_err(|e| MirrorError::at(dest, e))?;
    }

    create_symlink(&target, dest)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link_path: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link_path).map_err(|e| MirrorError::at(link_path, e))
}

#[cfg(windows)]
fn create_symlink(target: &Path, link_path: &Path) -> Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    match symlink_file(target, link_path) {
        Ok(()) => Ok(()),
        Err(file_err) => match symlink_dir(target, link_path) {
            Ok(()) => Ok(()),
            Err(_) => Err(MirrorError::at(link_path, file_err)),
        },
    }
}
