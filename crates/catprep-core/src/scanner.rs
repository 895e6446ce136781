//! Source directory scanner for catalogue and game-system files

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of per-file source that is archived one-to-one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Faction catalogue (`.cat` -> `.catz`)
    Catalogue,
    /// Game-system definition (`.gst` -> `.gstz`)
    GameSystem,
}

impl SourceKind {
    /// Extension of source files of this kind
    pub fn source_extension(self) -> &'static str {
        match self {
            SourceKind::Catalogue => "cat",
            SourceKind::GameSystem => "gst",
        }
    }

    /// Extension of the archive produced for this kind
    pub fn archive_extension(self) -> &'static str {
        match self {
            SourceKind::Catalogue => "catz",
            SourceKind::GameSystem => "gstz",
        }
    }
}

/// List files of the given kind directly inside `dir`, sorted by file name
///
/// Subdirectories are not descended into. Symlinks are resolved, so a linked
/// source is listed under its link name.
pub fn scan_sources<P: AsRef<Path>>(dir: P, kind: SourceKind) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir.as_ref())
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path
            .extension()
            .is_some_and(|ext| ext == kind.source_extension())
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extensions() {
        assert_eq!(SourceKind::Catalogue.source_extension(), "cat");
        assert_eq!(SourceKind::Catalogue.archive_extension(), "catz");
        assert_eq!(SourceKind::GameSystem.source_extension(), "gst");
        assert_eq!(SourceKind::GameSystem.archive_extension(), "gstz");
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Skaven.cat"), "").unwrap();
        fs::write(dir.path().join("Dark Elves.cat"), "").unwrap();
        fs::write(dir.path().join("Warhammer.gst"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("Old.catz"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("Empire.cat"), "").unwrap();

        let cats = scan_sources(dir.path(), SourceKind::Catalogue).unwrap();
        let names: Vec<_> = cats
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Dark Elves.cat", "Skaven.cat"]);

        let gsts = scan_sources(dir.path(), SourceKind::GameSystem).unwrap();
        assert_eq!(gsts.len(), 1);
    }

    #[test]
    fn test_scan_directory_named_like_source() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("folder.cat")).unwrap();

        let cats = scan_sources(dir.path(), SourceKind::Catalogue).unwrap();
        assert!(cats.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let target = TempDir::new().unwrap();
        fs::write(target.path().join("Skaven.cat"), "").unwrap();
        fs::write(target.path().join("Warhammer.gst"), "").unwrap();

        let dir = TempDir::new().unwrap();
        symlink(target.path().join("Skaven.cat"), dir.path().join("Skaven.cat")).unwrap();
        symlink(target.path().join("Warhammer.gst"), dir.path().join("WFB.gst")).unwrap();

        let cats = scan_sources(dir.path(), SourceKind::Catalogue).unwrap();
        assert_eq!(cats, vec![dir.path().join("Skaven.cat")]);

        let gsts = scan_sources(dir.path(), SourceKind::GameSystem).unwrap();
        assert_eq!(gsts, vec![dir.path().join("WFB.gst")]);
    }
}
