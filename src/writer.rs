//! Result file writer
//!
//! Serializes a [`NumberSet`] one value per line, largest first. The data
//! goes to a temporary sibling file which is renamed over the destination
//! once flushed, so the destination never holds a partial result.

use crate::aggregate::NumberSet;
use crate::error::{NumsiftError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Platform line terminator
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Path of the temporary file used while writing `name` into `dir`
pub fn temp_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!(".{}.tmp", name))
}

/// Write `numbers` to `dir/name`, creating or replacing it
///
/// Returns the path of the written file.
pub fn write_result(dir: &Path, name: &str, numbers: &NumberSet) -> Result<PathBuf> {
    let dest = dir.join(name);
    let tmp = temp_path(dir, name);

    if let Err(e) = write_lines(&tmp, numbers) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp, &dest) {
        let _ = fs::remove_file(&tmp);
        return Err(NumsiftError::io(&dest, e));
    }

    debug!("Wrote {} values to {}", numbers.len(), dest.display());
    Ok(dest)
}

fn write_lines(path: &Path, numbers: &NumberSet) -> Result<()> {
    let io_err = |e| NumsiftError::io(path, e);

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    for value in numbers {
        write!(writer, "{}{}", value, LINE_ENDING).map_err(io_err)?;
    }

    let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
    file.sync_all().map_err(io_err)?;
    Ok(())
}
