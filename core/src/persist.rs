use crate::record::MovieRecord;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SNAPSHOT_FILE: &str = "movies_metadata.json";

#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub file: PathBuf,
}

impl SnapshotPaths {
    pub fn new<P: AsRef<Path>>(file: P) -> Self {
        Self { file: file.as_ref().to_path_buf() }
    }

    /// Snapshot with the default file name inside `root`.
    pub fn in_dir<P: AsRef<Path>>(root: P) -> Self {
        Self::new(root.as_ref().join(DEFAULT_SNAPSHOT_FILE))
    }
}

impl Default for SnapshotPaths {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_FILE)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse snapshot {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse the whole snapshot. Nothing is cached; every call sees the
/// file as it is now.
pub fn load_all(paths: &SnapshotPaths) -> Result<Vec<MovieRecord>, LoadError> {
    let io_err = |source| LoadError::Io { path: paths.file.clone(), source };
    let mut f = File::open(&paths.file).map_err(io_err)?;
    let mut buf = String::new();
    f.read_to_string(&mut buf).map_err(io_err)?;
    serde_json::from_str(&buf).map_err(|source| LoadError::Parse { path: paths.file.clone(), source })
}

/// Like [`load_all`], but a missing or malformed snapshot degrades to an empty
/// catalog. The failure only shows up in the log.
pub fn load_all_or_empty(paths: &SnapshotPaths) -> Vec<MovieRecord> {
    match load_all(paths) {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(error = %err, "error reading movie snapshot");
            Vec::new()
        }
    }
}

/// First record whose id is loosely equal to `id`.
pub fn find_by_id<'a>(records: &'a [MovieRecord], id: &str) -> Option<&'a MovieRecord> {
    records.iter().find(|m| m.has_id(id))
}
