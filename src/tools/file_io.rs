//! Whole file input and output. Every stage works on complete in-memory buffers.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, error, warn};

use crate::error::Result;

/// Read the entire file at `path`.
pub fn read_whole_file(path: &Path) -> Result<Vec<u8>> {
    let mut fin = File::open(path).map_err(|e| {
        error!("Cannot open the input file '{}'", path.display());
        e
    })?;
    let size = fin.metadata().map(|m| m.len() as usize).unwrap_or(0);
    let mut buf = Vec::with_capacity(size);
    fin.read_to_end(&mut buf).map_err(|e| {
        error!("Cannot read the input file '{}'", path.display());
        e
    })?;
    debug!("Read {} bytes from '{}'", buf.len(), path.display());
    Ok(buf)
}

/// Write `data` to `path`, replacing any existing file. A partially written file is removed.
pub fn write_whole_file(path: &Path, data: &[u8]) -> Result<()> {
    let result = File::create(path).and_then(|mut f_out| {
        f_out.write_all(data)?;
        f_out.flush()
    });
    if let Err(e) = result {
        error!("Cannot write the output file '{}'", path.display());
        remove_partial(path);
        return Err(e.into());
    }
    debug!("Wrote {} bytes to '{}'", data.len(), path.display());
    Ok(())
}

/// Remove what a failed write left behind. Returns true if a file was removed.
fn remove_partial(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("Cannot remove the partial output file '{}': {}", path.display(), e);
            false
        }
    }
}
