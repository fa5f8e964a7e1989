//! Directory fsync helper shared by the writer and the commit engine

#[cfg(unix)]
use std::fs::File;
use std::path::Path;

use crate::error::Result;

/// fsync a directory so a create, rename or unlink inside it is durable
///
/// An empty path means the current directory. On non-Unix platforms a
/// directory cannot be opened for sync and this is a no-op.
pub(crate) fn sync_dir(dir: &Path) -> Result<()> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    #[cfg(unix)]
    {
        File::open(dir)?.sync_all()?;
    }
    #[cfg(not(unix))]
    {
        let _ = dir;
    }

    Ok(())
}
