//! The submission crawler.
//!
//! Walks the `<contributor>/<hardware type>/<unit>` tree, derives each
//! unit's identity from directory naming conventions, reads and validates
//! its metadata document, resolves its photos, and assembles everything
//! into a [`CrawlReport`]. Units are processed concurrently under a
//! semaphore bound.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::classify;
use crate::config::AppConfig;
use crate::error::{CrawlError, SkipReason, SkippedUnit};
use crate::metadata::{CartridgeMetadata, ConsoleMetadata};
use crate::reader::{self, ReadOutcome};
use crate::registry::{ConsoleKind, CARTRIDGE_PHOTOS};
use crate::walker::{self, FsEntry, PhotoSet};

/// Unit directories named after the printed serial: an uppercase letter run
/// followed by more serial characters ending in a digit, e.g. `G13235055`
/// or `DMG-ABCD-0`.
static SERIAL_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([A-Z]+)[A-Z0-9-]*[0-9]$").unwrap()
});

/// Unit directories numbered by the contributor, e.g. `7` or `12-2`.
static NUMERIC_NAME: Lazy<Regex> = Lazy::new(|| Regex::new("^[0-9]+(-[0-9])?$").unwrap());

/// Hardware-type directories holding cartridges are named by ROM id,
/// e.g. `DMG-AAUJ-1`.
static ROM_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[A-Z]{3}-[A-Z0-9]{2,5}(-[0-9])?$").unwrap()
});

/// Display and ordering identity of one unit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitIdentity {
    /// Display title.
    pub title: String,
    /// URL-safe unique identifier within the type partition.
    pub slug: String,
    /// Primary sort key; the letter run of serial-named units.
    pub sort_group: Option<String>,
}

/// Lowercase a string and join its alphanumeric runs with hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Derive a unit's identity from its directory name.
///
/// Serial-named units use the serial as both title and slug and sort by
/// their letter run. Numbered units get a `Unit #N` title and a slug scoped
/// by contributor so numbering can restart per contributor. Anything else
/// is a data-entry mistake and fails the crawl.
pub fn unit_identity(contributor: &str, unit_name: &str) -> Result<UnitIdentity, CrawlError> {
    if let Some(caps) = SERIAL_NAME.captures(unit_name) {
        Ok(UnitIdentity {
            title: unit_name.to_owned(),
            slug: unit_name.to_owned(),
            sort_group: Some(caps[1].to_owned()),
        })
    } else if NUMERIC_NAME.is_match(unit_name) {
        Ok(UnitIdentity {
            title: format!("Unit #{unit_name}"),
            slug: slugify(&format!("{contributor}-{unit_name}")),
            sort_group: None,
        })
    } else {
        Err(CrawlError::MalformedUnitName(unit_name.to_owned()))
    }
}

/// One crawled console unit.
#[derive(Clone, Debug, Serialize)]
pub struct ConsoleSubmission {
    /// Console type.
    #[serde(rename = "type")]
    pub kind: ConsoleKind,
    /// Display title.
    pub title: String,
    /// Unique identifier within the console type.
    pub slug: String,
    /// Primary sort key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_group: Option<String>,
    /// Contributor the unit belongs to.
    pub contributor: String,
    /// Validated metadata document.
    pub metadata: ConsoleMetadata,
    /// Photos present on disk.
    pub photos: PhotoSet,
}

/// One crawled cartridge unit.
#[derive(Clone, Debug, Serialize)]
pub struct CartridgeSubmission {
    /// ROM id of the game, e.g. `DMG-AAUJ-1`.
    #[serde(rename = "type")]
    pub code: String,
    /// Display title.
    pub title: String,
    /// Unique identifier within the game.
    pub slug: String,
    /// Primary sort key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_group: Option<String>,
    /// Contributor the unit belongs to.
    pub contributor: String,
    /// Validated metadata document.
    pub metadata: CartridgeMetadata,
    /// Photos present on disk.
    pub photos: PhotoSet,
}

/// Everything one crawl produced.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Console submissions in stable display order.
    pub consoles: Vec<ConsoleSubmission>,
    /// Cartridge submissions in stable display order.
    pub cartridges: Vec<CartridgeSubmission>,
    /// Units and type directories that were excluded.
    pub skipped: Vec<SkippedUnit>,
}

#[derive(Clone, Debug)]
enum CrawlTarget {
    Console(ConsoleKind),
    Cartridge { code: String },
}

/// Which part of the tree a crawl covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Partition {
    All,
    Consoles,
    Cartridges,
}

impl Partition {
    fn covers(self, target: &CrawlTarget) -> bool {
        match (self, target) {
            (Partition::All, _) => true,
            (Partition::Consoles, CrawlTarget::Console(_)) => true,
            (Partition::Cartridges, CrawlTarget::Cartridge { .. }) => true,
            _ => false,
        }
    }
}

#[derive(Debug)]
struct UnitJob {
    contributor: String,
    target: CrawlTarget,
    unit: FsEntry,
    identity: UnitIdentity,
}

#[derive(Debug)]
enum UnitOutcome {
    Console(ConsoleSubmission),
    Cartridge(CartridgeSubmission),
    Skipped(SkippedUnit),
}

/// Crawls a submission tree into a [`CrawlReport`].
#[derive(Debug)]
pub struct Crawler {
    config: AppConfig,
}

impl Crawler {
    /// New crawler over the configured data root.
    pub fn new(config: AppConfig) -> Self {
        Crawler { config }
    }

    /// Run the crawl over the whole tree. Per-unit data defects are
    /// collected in the report; environment failures and malformed unit
    /// names abort.
    pub async fn crawl(&self) -> Result<CrawlReport, CrawlError> {
        self.crawl_partition(Partition::All).await
    }

    /// Crawl console units only; cartridge type directories are ignored.
    pub async fn crawl_consoles(&self) -> Result<CrawlReport, CrawlError> {
        self.crawl_partition(Partition::Consoles).await
    }

    /// Crawl cartridge units only; console type directories are ignored.
    pub async fn crawl_cartridges(&self) -> Result<CrawlReport, CrawlError> {
        self.crawl_partition(Partition::Cartridges).await
    }

    async fn crawl_partition(&self, partition: Partition) -> Result<CrawlReport, CrawlError> {
        let mut report = CrawlReport::default();
        let jobs = self.enumerate(partition, &mut report).await?;
        info!("crawling {} units", jobs.len());

        let semaphore = Arc::new(Semaphore::new(self.config.crawl_concurrency));
        let mut tasks = JoinSet::new();
        for job in jobs {
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|err| CrawlError::Task(err.to_string()))?;
                crawl_unit(job).await
            });
        }
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|err| CrawlError::Task(err.to_string()))??;
            match outcome {
                UnitOutcome::Console(submission) => report.consoles.push(submission),
                UnitOutcome::Cartridge(submission) => report.cartridges.push(submission),
                UnitOutcome::Skipped(skipped) => report.skipped.push(skipped),
            }
        }

        report.consoles.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| classify::submission_order(a, b))
        });
        report.cartridges.sort_by(|a, b| {
            a.code
                .cmp(&b.code)
                .then_with(|| classify::submission_order(a, b))
        });
        report.skipped.sort_by(|a, b| a.path.cmp(&b.path));
        info!(
            "crawl finished: {} consoles, {} cartridges, {} skipped",
            report.consoles.len(),
            report.cartridges.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    async fn enumerate(
        &self,
        partition: Partition,
        report: &mut CrawlReport,
    ) -> Result<Vec<UnitJob>, CrawlError> {
        let mut jobs = Vec::new();
        for contributor in walker::directories(&self.config.data_root).await? {
            for type_dir in walker::directories(&contributor.path).await? {
                let target = if let Some(kind) = ConsoleKind::from_dir_name(&type_dir.name) {
                    CrawlTarget::Console(kind)
                } else if ROM_ID.is_match(&type_dir.name) {
                    CrawlTarget::Cartridge {
                        code: type_dir.name.clone(),
                    }
                } else {
                    warn!(
                        "skipping {}: unknown hardware type {:?}",
                        type_dir.path.display(),
                        type_dir.name
                    );
                    report.skipped.push(SkippedUnit {
                        path: type_dir.path.clone(),
                        reason: SkipReason::UnknownHardwareType(type_dir.name.clone()),
                    });
                    continue;
                };
                if !partition.covers(&target) {
                    continue;
                }
                for unit in walker::directories(&type_dir.path).await? {
                    let identity = unit_identity(&contributor.name, &unit.name)?;
                    jobs.push(UnitJob {
                        contributor: contributor.name.clone(),
                        target: target.clone(),
                        unit,
                        identity,
                    });
                }
            }
        }
        Ok(jobs)
    }
}

async fn crawl_unit(job: UnitJob) -> Result<UnitOutcome, CrawlError> {
    match job.target {
        CrawlTarget::Console(kind) => {
            let descriptor = kind.descriptor();
            match reader::read_console(&job.unit.path, descriptor).await? {
                ReadOutcome::Valid(metadata) => {
                    let photos = walker::resolve_photos(&job.unit.path, descriptor.photos).await?;
                    Ok(UnitOutcome::Console(ConsoleSubmission {
                        kind,
                        title: job.identity.title,
                        slug: job.identity.slug,
                        sort_group: job.identity.sort_group,
                        contributor: job.contributor,
                        metadata,
                        photos,
                    }))
                }
                ReadOutcome::Skipped(reason) => Ok(UnitOutcome::Skipped(SkippedUnit {
                    path: job.unit.path,
                    reason,
                })),
            }
        }
        CrawlTarget::Cartridge { code } => match reader::read_cartridge(&job.unit.path, &code).await? {
            ReadOutcome::Valid(metadata) => {
                let photos = walker::resolve_photos(&job.unit.path, CARTRIDGE_PHOTOS).await?;
                Ok(UnitOutcome::Cartridge(CartridgeSubmission {
                    code,
                    title: job.identity.title,
                    slug: job.identity.slug,
                    sort_group: job.identity.sort_group,
                    contributor: job.contributor,
                    metadata,
                    photos,
                }))
            }
            ReadOutcome::Skipped(reason) => Ok(UnitOutcome::Skipped(SkippedUnit {
                path: job.unit.path,
                reason,
            })),
        },
    }
}
