// Binary persistence of fitted models and preprocessors

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use scorecast_models::{Result, ScorecastError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ScorecastError + '_ {
    move |source| ScorecastError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn serialization_error(path: &Path) -> impl FnOnce(bincode::Error) -> ScorecastError + '_ {
    move |source| ScorecastError::Serialization {
        path: path.to_path_buf(),
        source,
    }
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
}

/// Writes `obj` to `path` with bincode, creating missing parent directories.
///
/// The bytes go to a temporary file beside `path` that replaces it only once
/// complete, so a failed save leaves any previous file intact.
pub fn save_object<T: Serialize + ?Sized>(path: impl AsRef<Path>, obj: &T) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let mut writer = BufWriter::new(NamedTempFile::new_in(dir).map_err(io_error(dir))?);
    codec()
        .serialize_into(&mut writer, obj)
        .map_err(serialization_error(path))?;
    writer.flush().map_err(io_error(path))?;
    let staged = writer
        .into_inner()
        .map_err(|e| io_error(path)(e.into_error()))?;
    staged.persist(path).map_err(|e| io_error(path)(e.error))?;

    debug!("💾 Saved object to {}", path.display());
    Ok(())
}

/// Reads back an object written by [`save_object`].
pub fn load_object<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(io_error(path))?;
    // no length prefix may claim more bytes than the file holds
    let size = file.metadata().map_err(io_error(path))?.len();
    let obj = codec()
        .with_limit(size)
        .deserialize_from(BufReader::new(file))
        .map_err(serialization_error(path))?;

    debug!("📂 Loaded object from {}", path.display());
    Ok(obj)
}
