//! Reading and validating `metadata.json` documents.
//!
//! A unit directory without a metadata document is a submission still under
//! construction and is skipped quietly. Malformed or schema-violating
//! documents are skipped with a warning so the defect is visible in the
//! crawl log and report without aborting the whole build.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{CrawlError, SkipReason};
use crate::metadata::{CartridgeMetadata, ConsoleMetadata};
use crate::registry::{cartridge, ConsoleDescriptor};

/// File name of the metadata document inside a unit directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Result of reading one unit's metadata: either a validated document or a
/// reason to exclude the unit.
#[derive(Clone, Debug)]
pub enum ReadOutcome<M> {
    /// The document parsed and passed schema validation.
    Valid(M),
    /// The unit is excluded for the given reason.
    Skipped(SkipReason),
}

async fn read_document<M: DeserializeOwned>(
    unit_dir: &Path,
) -> Result<ReadOutcome<M>, CrawlError> {
    let path = unit_dir.join(METADATA_FILE);
    let raw = match fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("no metadata document in {}", unit_dir.display());
            return Ok(ReadOutcome::Skipped(SkipReason::MissingMetadata));
        }
        Err(err) => return Err(CrawlError::fs(path, err)),
    };
    match serde_json::from_str(&raw) {
        Ok(document) => Ok(ReadOutcome::Valid(document)),
        Err(err) => {
            warn!("skipping {}: malformed metadata: {}", unit_dir.display(), err);
            Ok(ReadOutcome::Skipped(SkipReason::Parse(err.to_string())))
        }
    }
}

/// Read and validate a console unit's metadata document.
pub async fn read_console(
    unit_dir: &Path,
    descriptor: &ConsoleDescriptor,
) -> Result<ReadOutcome<ConsoleMetadata>, CrawlError> {
    let metadata = match read_document::<ConsoleMetadata>(unit_dir).await? {
        ReadOutcome::Valid(metadata) => metadata,
        ReadOutcome::Skipped(reason) => return Ok(ReadOutcome::Skipped(reason)),
    };
    match descriptor.validate(&metadata) {
        Ok(()) => Ok(ReadOutcome::Valid(metadata)),
        Err(err) => {
            warn!("skipping {}: {}", unit_dir.display(), err);
            Ok(ReadOutcome::Skipped(SkipReason::Validation(err)))
        }
    }
}

/// Read and validate a cartridge unit's metadata document against the
/// catalog entry for the given ROM id.
pub async fn read_cartridge(
    unit_dir: &Path,
    code: &str,
) -> Result<ReadOutcome<CartridgeMetadata>, CrawlError> {
    let metadata = match read_document::<CartridgeMetadata>(unit_dir).await? {
        ReadOutcome::Valid(metadata) => metadata,
        ReadOutcome::Skipped(reason) => return Ok(ReadOutcome::Skipped(reason)),
    };
    match cartridge::validate(&metadata, code) {
        Ok(()) => Ok(ReadOutcome::Valid(metadata)),
        Err(err) => {
            warn!("skipping {}: {}", unit_dir.display(), err);
            Ok(ReadOutcome::Skipped(SkipReason::Validation(err)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs as std_fs;

    use tempfile::tempdir;

    use super::*;
    use crate::registry::ConsoleKind;

    #[tokio::test]
    async fn valid_document_is_returned() {
        let dir = tempdir().unwrap();
        std_fs::write(
            dir.path().join(METADATA_FILE),
            r#"{"color": "Gray", "mainboard": {"type": "DMG-CPU-06"}}"#,
        )
        .unwrap();

        let outcome = read_console(dir.path(), ConsoleKind::Dmg.descriptor())
            .await
            .unwrap();
        match outcome {
            ReadOutcome::Valid(meta) => assert_eq!(meta.color.as_deref(), Some("Gray")),
            ReadOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
        }
    }

    #[tokio::test]
    async fn absent_document_skips_quietly() {
        let dir = tempdir().unwrap();
        let outcome = read_console(dir.path(), ConsoleKind::Dmg.descriptor())
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            ReadOutcome::Skipped(SkipReason::MissingMetadata)
        ));
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_skip() {
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join(METADATA_FILE), "{not json").unwrap();
        let outcome = read_console(dir.path(), ConsoleKind::Dmg.descriptor())
            .await
            .unwrap();
        assert!(matches!(outcome, ReadOutcome::Skipped(SkipReason::Parse(_))));
    }

    #[tokio::test]
    async fn schema_violation_is_a_validation_skip() {
        let dir = tempdir().unwrap();
        std_fs::write(
            dir.path().join(METADATA_FILE),
            r#"{"year": 2085, "mainboard": {"type": "DMG-CPU-06"}}"#,
        )
        .unwrap();
        let outcome = read_console(dir.path(), ConsoleKind::Dmg.descriptor())
            .await
            .unwrap();
        match outcome {
            ReadOutcome::Skipped(SkipReason::Validation(err)) => assert_eq!(err.path, "year"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn cartridge_documents_validate_too() {
        let dir = tempdir().unwrap();
        std_fs::write(
            dir.path().join(METADATA_FILE),
            r#"{"board": {"type": "DMG-KGMEF-10", "mapper": {"type": "MBC5"}}}"#,
        )
        .unwrap();
        let outcome = read_cartridge(dir.path(), "DMG-AAUJ-1").await.unwrap();
        assert!(matches!(outcome, ReadOutcome::Valid(_)));
    }
}
