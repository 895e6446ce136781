//! catprep-core: Core library for preparing wargame data files for publishing
//!
//! This library provides functionality to:
//! - Hold the static catalogue and game-system identifier table
//! - Scan a directory for catalogue (`.cat`) and game-system (`.gst`) sources
//! - Inject identifiers into the XML text by regex substitution
//! - Package each rewritten file as a single-entry zip archive
//! - Rewrite and package the data index (`.bsi`)

pub mod archive;
pub mod config;
pub mod error;
pub mod ids;
pub mod pipeline;
pub mod rewrite;
pub mod scanner;

pub use archive::{read_single_entry, zip_single_file};
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use ids::{sanitize_name, IdentifierTable};
pub use pipeline::{
    process_catalogues, process_game_systems, process_index, run, BuildReport, CatalogueResult,
    SkippedCatalogue,
};
pub use rewrite::Rewriter;
pub use scanner::{scan_sources, SourceKind};
