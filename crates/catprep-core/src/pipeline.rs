//! Transform-and-archive steps for catalogues, game systems and the index
//!
//! Each source is rewritten into its own scoped temporary directory, zipped
//! into the publish directory, and the temporary directory is removed whether
//! or not archiving succeeded.

use crate::archive::zip_single_file;
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::ids::sanitize_name;
use crate::rewrite::Rewriter;
use crate::scanner::{scan_sources, SourceKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix of per-file temporary directories
const TEMP_PREFIX: &str = "catprep-";

/// A catalogue that had no identifier and was not archived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCatalogue {
    /// Source file
    pub path: PathBuf,
    /// Sanitized name that failed the lookup
    pub name: String,
}

/// Outcome of the catalogue step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogueResult {
    /// Archives written, in processing order
    pub written: Vec<PathBuf>,
    /// Catalogues skipped for lack of an identifier
    pub skipped: Vec<SkippedCatalogue>,
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildReport {
    /// Catalogue archives written
    pub catalogues: Vec<PathBuf>,
    /// Catalogues skipped for lack of an identifier
    pub skipped: Vec<SkippedCatalogue>,
    /// Game-system archives written
    pub game_systems: Vec<PathBuf>,
    /// Index archive, if the index source was present
    pub index: Option<PathBuf>,
}

impl BuildReport {
    /// Total number of archives written
    pub fn archive_count(&self) -> usize {
        self.catalogues.len() + self.game_systems.len() + usize::from(self.index.is_some())
    }
}

/// Run every step in order: catalogues, game systems, index
pub fn run(config: &BuildConfig) -> Result<BuildReport> {
    fs::create_dir_all(&config.publish_dir).map_err(|e| Error::FileWrite {
        path: config.publish_dir.clone(),
        source: e,
    })?;

    let rewriter = Rewriter::new(&config.ids)?;

    let catalogues = process_catalogues(config, &rewriter)?;
    let game_systems = process_game_systems(config, &rewriter)?;
    let index = process_index(config, &rewriter)?;

    Ok(BuildReport {
        catalogues: catalogues.written,
        skipped: catalogues.skipped,
        game_systems,
        index,
    })
}

/// Rewrite and archive every `.cat` file in the source directory
///
/// Files whose sanitized name is not in the identifier table are skipped with
/// a warning; no temporary directory is created for them.
pub fn process_catalogues(config: &BuildConfig, rewriter: &Rewriter) -> Result<CatalogueResult> {
    let kind = SourceKind::Catalogue;
    let mut result = CatalogueResult::default();

    for path in scan_sources(&config.source_dir, kind)? {
        let base_name = base_name(&path)?;
        let safe_name = sanitize_name(base_name);

        let Some(catalogue_id) = config.ids.lookup(&safe_name) else {
            log::warn!("No catalogue ID for '{}', skipping", safe_name);
            result.skipped.push(SkippedCatalogue {
                path: path.clone(),
                name: safe_name,
            });
            continue;
        };

        let contents = read_source(&path)?;
        let rewritten = rewriter.rewrite_catalogue(&contents, catalogue_id);

        let dest = archive_path(config, &safe_name, kind);
        write_archive(config, &rewritten, &entry_name(base_name, kind), &dest)?;
        log::info!("Zipped {} -> {}", path.display(), dest.display());

        result.written.push(dest);
    }

    Ok(result)
}

/// Rewrite and archive every `.gst` file in the source directory
pub fn process_game_systems(config: &BuildConfig, rewriter: &Rewriter) -> Result<Vec<PathBuf>> {
    let kind = SourceKind::GameSystem;
    let mut written = Vec::new();

    for path in scan_sources(&config.source_dir, kind)? {
        let base_name = base_name(&path)?;
        let safe_name = sanitize_name(base_name);

        let contents = read_source(&path)?;
        let rewritten = rewriter.rewrite_game_system(&contents);

        let dest = archive_path(config, &safe_name, kind);
        write_archive(config, &rewritten, &entry_name(base_name, kind), &dest)?;
        log::info!("Zipped {} -> {}", path.display(), dest.display());

        written.push(dest);
    }

    Ok(written)
}

/// Rewrite and archive the index file
///
/// A missing index source is logged and yields `Ok(None)`; it does not stop
/// the run.
pub fn process_index(config: &BuildConfig, rewriter: &Rewriter) -> Result<Option<PathBuf>> {
    let input = config.index_input_path();
    if !input.is_file() {
        log::error!("Missing input XML file: {}", input.display());
        return Ok(None);
    }

    let file_name = input
        .file_name()
        .ok_or_else(|| Error::InvalidFileName(input.clone()))?;

    let tmp_dir = scoped_temp_dir(config)?;
    let working = tmp_dir.path().join(file_name);
    fs::copy(&input, &working).map_err(|e| Error::FileWrite {
        path: working.clone(),
        source: e,
    })?;

    let contents = read_source(&working)?;
    let rewritten = rewriter.rewrite_index(&contents);
    fs::write(&working, rewritten).map_err(|e| Error::FileWrite {
        path: working.clone(),
        source: e,
    })?;

    let dest = config.index_output_path();
    zip_single_file(&working, &dest)?;
    tmp_dir.close()?;

    log::info!("Created BSI: {}", dest.display());
    Ok(Some(dest))
}

/// Write `text` as `entry_name` in a fresh temp dir and zip it to `dest`
fn write_archive(config: &BuildConfig, text: &str, entry_name: &str, dest: &Path) -> Result<()> {
    let tmp_dir = scoped_temp_dir(config)?;
    let working = tmp_dir.path().join(entry_name);

    fs::write(&working, text).map_err(|e| Error::FileWrite {
        path: working.clone(),
        source: e,
    })?;
    zip_single_file(&working, dest)?;

    tmp_dir.close()?;
    Ok(())
}

/// Removed on drop, so every early return cleans up
fn scoped_temp_dir(config: &BuildConfig) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX);
    let dir = match &config.temp_root {
        Some(root) => builder.tempdir_in(root)?,
        None => builder.tempdir()?,
    };
    Ok(dir)
}

/// Read a source as text, replacing invalid UTF-8 sequences with U+FFFD
fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::warn!("{} is not valid UTF-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// File name without its extension
fn base_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidFileName(path.to_path_buf()))
}

/// Archive entry name: the original base name (spaces kept) plus source extension
fn entry_name(base_name: &str, kind: SourceKind) -> String {
    format!("{}.{}", base_name, kind.source_extension())
}

fn archive_path(config: &BuildConfig, safe_name: &str, kind: SourceKind) -> PathBuf {
    config
        .publish_dir
        .join(format!("{}.{}", safe_name, kind.archive_extension()))
}
