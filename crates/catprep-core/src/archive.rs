//! Single-entry zip archives for published data files

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Zip `src` into `dest` as a single deflated entry named after `src`'s file name
///
/// An existing archive at `dest` is overwritten. The write is not atomic: a
/// failure part-way may leave an incomplete file behind.
pub fn zip_single_file(src: &Path, dest: &Path) -> Result<()> {
    let entry_name = src
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidFileName(src.to_path_buf()))?;

    let contents = fs::read(src).map_err(|e| Error::FileRead {
        path: src.to_path_buf(),
        source: e,
    })?;

    let file = File::create(dest).map_err(|e| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let zip_err = |source| Error::Zip {
        path: dest.to_path_buf(),
        source,
    };

    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(entry_name, options).map_err(zip_err)?;
    zip.write_all(&contents).map_err(|e| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let mut writer = zip.finish().map_err(zip_err)?;
    writer.flush().map_err(|e| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Read the first entry of an archive, returning its name and contents
pub fn read_single_entry(archive: &Path) -> Result<(String, Vec<u8>)> {
    let file = File::open(archive).map_err(|e| Error::FileRead {
        path: archive.to_path_buf(),
        source: e,
    })?;

    let zip_err = |source| Error::Zip {
        path: archive.to_path_buf(),
        source,
    };

    let mut zip = ZipArchive::new(file).map_err(zip_err)?;
    if zip.len() == 0 {
        return Err(Error::EmptyArchive(archive.to_path_buf()));
    }

    let mut entry = zip.by_index(0).map_err(zip_err)?;
    let name = entry.name().to_string();
    let mut contents = Vec::new();
    entry.read_to_end(&mut contents).map_err(|e| Error::FileRead {
        path: archive.to_path_buf(),
        source: e,
    })?;

    Ok((name, contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_zip_round_trip() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("Dark Elves.cat");
        let xml = "<?xml version=\"1.0\"?>\n<catalogue id=\"x\">\u{e9}</catalogue>\n";
        fs::write(&src, xml).unwrap();

        let dest = dir.path().join("Dark.Elves.catz");
        zip_single_file(&src, &dest).unwrap();

        let (name, contents) = read_single_entry(&dest).unwrap();
        assert_eq!(name, "Dark Elves.cat");
        assert_eq!(contents, xml.as_bytes());
    }

    #[test]
    fn test_zip_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.gst");
        let dest = dir.path().join("a.gstz");
        fs::write(&dest, "stale, not a zip").unwrap();
        fs::write(&src, "<gameSystem/>").unwrap();

        zip_single_file(&src, &dest).unwrap();

        let (_, contents) = read_single_entry(&dest).unwrap();
        assert_eq!(contents, b"<gameSystem/>");
    }

    #[test]
    fn test_zip_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = zip_single_file(&dir.path().join("nope.cat"), &dir.path().join("nope.catz"))
            .unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_read_not_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.catz");
        fs::write(&path, "plain text").unwrap();
        assert!(matches!(read_single_entry(&path), Err(Error::Zip { .. })));
    }
}
