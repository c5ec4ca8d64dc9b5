//! Library files on disk.

use std::fs;
use std::path::Path;

use ::tracing::{debug, info, warn};
use hoard_core::library::{BookStore, Library};

use crate::error::Result;

/// Read a library file (`{"books": [...]}`).
pub fn load_library(path: impl AsRef<Path>) -> Result<Library> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let library = Library::from_json(&json)?;
    info!(path = %path.display(), books = library.count()?, "loaded library");
    Ok(library)
}

/// Write `library` to `path`, replacing it atomically.
///
/// The JSON goes to a sibling temp file first, then is renamed over the target.
pub fn save_library(path: impl AsRef<Path>, library: &Library) -> Result<()> {
    let path = path.as_ref();
    let json = library.to_json()?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, path) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            warn!(path = ?tmp, error = %cleanup, "failed to remove temp library file");
        }
        return Err(e.into());
    }

    debug!(path = %path.display(), books = library.books().len(), "saved library");
    Ok(())
}
