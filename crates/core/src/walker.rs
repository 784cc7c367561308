//! Filesystem enumeration for the submission tree.
//!
//! Absence of an optional file is data, not an error: a missing photo or
//! metadata document simply means nobody has added it yet. Every other I/O
//! failure is propagated so an unreadable tree never produces a silently
//! incomplete crawl.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs;

use crate::error::CrawlError;
use crate::registry::console::PhotoSpec;

/// Stat snapshot used downstream for change detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct FileStats {
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// File size in bytes.
    pub size: u64,
}

impl FileStats {
    fn read(path: &Path, meta: &std::fs::Metadata) -> Result<Self, CrawlError> {
        let modified = meta.modified().map_err(|err| CrawlError::fs(path, err))?;
        Ok(FileStats {
            modified: modified.into(),
            size: meta.len(),
        })
    }
}

/// One directory entry with its stat snapshot.
#[derive(Clone, Debug)]
pub struct FsEntry {
    /// Absolute path of the directory.
    pub path: PathBuf,
    /// Final path component.
    pub name: String,
    /// Stat snapshot.
    pub stats: FileStats,
}

/// Immediate subdirectories of `base`, sorted by name for deterministic
/// traversal order. Non-directory entries are ignored.
pub async fn directories(base: &Path) -> Result<Vec<FsEntry>, CrawlError> {
    let mut reader = fs::read_dir(base)
        .await
        .map_err(|err| CrawlError::fs(base, err))?;
    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|err| CrawlError::fs(base, err))?
    {
        let path = entry.path();
        let meta = entry
            .metadata()
            .await
            .map_err(|err| CrawlError::fs(&path, err))?;
        if !meta.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let stats = FileStats::read(&path, &meta)?;
        entries.push(FsEntry { path, name, stats });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Photo present on disk for one logical role.
#[derive(Clone, Debug, Serialize)]
pub struct Photo {
    /// Absolute path of the image file.
    pub path: PathBuf,
    /// File name inside the unit directory.
    pub name: String,
    /// Stat snapshot.
    pub stats: FileStats,
}

/// Photos of one unit, keyed by logical role.
pub type PhotoSet = BTreeMap<String, Photo>;

/// Stat a single expected photo. `Ok(None)` when the file does not exist.
pub async fn fetch_photo(unit_dir: &Path, file_name: &str) -> Result<Option<Photo>, CrawlError> {
    let path = unit_dir.join(file_name);
    match fs::metadata(&path).await {
        Ok(meta) => {
            let stats = FileStats::read(&path, &meta)?;
            Ok(Some(Photo {
                path,
                name: file_name.to_owned(),
                stats,
            }))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(CrawlError::fs(path, err)),
    }
}

/// Resolve all expected photos of a unit directory. Roles whose file is
/// absent are left out of the set.
pub async fn resolve_photos(
    unit_dir: &Path,
    specs: &[PhotoSpec],
) -> Result<PhotoSet, CrawlError> {
    let mut photos = PhotoSet::new();
    for spec in specs {
        if let Some(photo) = fetch_photo(unit_dir, spec.file_name).await? {
            photos.insert(spec.role.to_owned(), photo);
        }
    }
    Ok(photos)
}
