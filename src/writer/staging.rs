use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::EncodeError;

/// Write `target` through a sibling temporary file.
///
/// The encoder writes into a buffered handle on a hidden `.partial` file in
/// the same directory. Only when it succeeds is the file flushed, synced and
/// renamed over `target`; on failure the temporary file is removed and any
/// existing `target` is left as it was. Returns the encoder's result and
/// the size of the finished file.
pub fn write_atomically<T, F>(target: &Path, encode: F) -> Result<(T, u64), EncodeError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T, EncodeError>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged: NamedTempFile = tempfile::Builder::new()
        .prefix(".")
        .suffix(".partial")
        .tempfile_in(dir)?;

    let output = {
        let mut writer = BufWriter::new(staged.as_file_mut());
        let output = encode(&mut writer)?;
        writer.flush()?;
        output
    };

    staged.as_file().sync_all()?;
    let size = staged.as_file().metadata()?.len();
    staged.persist(target).map_err(|e| e.error)?;

    Ok((output, size))
}
