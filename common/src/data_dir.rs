use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Gets the default directory for storing checkpoint files, log files, etc.
///
/// The directory is created if it doesn't exist yet
pub fn get_default_data_dir() -> io::Result<PathBuf> {
    let path = ProjectDirs::from("cash", "Unprll Project", "Unprll")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Failed to get project user directory"))?
        .data_dir()
        .to_path_buf();

    ensure_dir_exists(&path)?;
    Ok(path)
}

/// Creates `path` (and its parents) unless it already exists
pub fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    match std::fs::create_dir_all(path) {
        Err(err) if err.kind() != io::ErrorKind::AlreadyExists => Err(err),
        _ => Ok(())
    }
}
