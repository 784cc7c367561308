//! Error taxonomy for the crawl pipeline.
//!
//! Per-unit data defects (bad metadata, missing files) are recoverable: the
//! unit is excluded and recorded as a [`SkippedUnit`]. Environment problems
//! and data-entry mistakes that must not go unnoticed (unreadable
//! directories, nonsensical unit names) are fatal [`CrawlError`]s.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal crawl failure. Aborts the build loudly instead of producing a
/// silently incomplete site.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// A unit directory name matches neither the serial nor the numeric
    /// naming convention. Raised rather than skipped so the data-entry
    /// mistake surfaces during the build instead of as missing content.
    #[error("unsupported unit directory name {0:?}")]
    MalformedUnitName(String),

    /// Filesystem error other than "not found" (permissions, I/O faults).
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        /// Path the failed operation was touching.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A spawned crawl task failed to complete.
    #[error("crawl task failed: {0}")]
    Task(String),
}

impl CrawlError {
    /// Wrap an I/O error with the path it occurred at.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// A metadata document violated its hardware-type schema.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `mainboard.cpu.year`.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Build an error for the given field path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Why a unit (or a whole type directory) was left out of the crawl output.
#[derive(Clone, Debug, Error)]
pub enum SkipReason {
    /// The unit directory has no metadata document yet. Expected for
    /// submissions still under construction by a contributor.
    #[error("no metadata document")]
    MissingMetadata,

    /// The hardware-type directory name is not in the known vocabulary.
    #[error("unknown hardware type {0:?}")]
    UnknownHardwareType(String),

    /// The metadata document could not be parsed as JSON.
    #[error("malformed metadata document: {0}")]
    Parse(String),

    /// The metadata document failed schema validation.
    #[error("{0}")]
    Validation(ValidationError),
}

/// Record of an excluded unit, collected into the crawl report so callers
/// can surface defects without aborting the build.
#[derive(Clone, Debug)]
pub struct SkippedUnit {
    /// Directory that was skipped.
    pub path: PathBuf,
    /// Why it was excluded.
    pub reason: SkipReason,
}
