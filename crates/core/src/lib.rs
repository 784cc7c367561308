#![warn(clippy::all, missing_docs)]

//! Core crawl and validation pipeline for the hardware collectors' database.
//!
//! Contributors keep their submissions in a `<contributor>/<hardware
//! type>/<unit>` directory tree, each unit holding a `metadata.json`
//! document and a conventional set of photos. This crate walks that tree,
//! validates every document against its hardware-type schema, derives unit
//! identities from the directory names, and produces normalized submission
//! records plus grouping, formatting and CSV export helpers for the site
//! build.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod csv_export;
pub mod error;
pub mod field;
pub mod format;
pub mod metadata;
pub mod reader;
pub mod registry;
pub mod walker;

pub use config::AppConfig;
pub use crawler::{CartridgeSubmission, ConsoleSubmission, CrawlReport, Crawler};
pub use error::{CrawlError, SkipReason, SkippedUnit, ValidationError};
pub use field::Field;
pub use metadata::{Board, CartridgeMetadata, Chip, ConsoleMetadata};
pub use registry::{ConsoleKind, MapperId};
