//! Recursive discovery and batch unpacking of packed textures.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::engine::{UnpackOptions, UnpackResult, Unpacker};
use crate::error::{Error, Result};

/// Extensions (lowercase, without the dot) accepted as packed textures.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tga", "tif", "tiff"];

/// Outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Number of textures unpacked.
    pub count: usize,
    /// Maps written for the first texture, usable as a preview.
    pub first: Option<UnpackResult>,
}

/// Check if a file has a supported texture extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Lazily walk `root` and yield every supported texture file below it.
///
/// Order follows directory traversal and is not sorted. Entries that cannot
/// be read are skipped.
pub fn discover(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_supported_image(entry.path()))
        .map(walkdir::DirEntry::into_path)
}

impl Unpacker {
    /// Unpack every supported texture under `root` into `output_dir`.
    ///
    /// All maps land flat in `output_dir`; textures with the same stem in
    /// different subdirectories overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] if `root` is not a directory. The
    /// first failing texture stops the batch and its error is returned.
    pub fn unpack_directory(&self, root: &Path, output_dir: &Path) -> Result<BatchSummary> {
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let mut summary = BatchSummary::default();
        for path in discover(root) {
            debug!(path = %path.display(), "unpacking");
            let result = self.unpack_file(&path, output_dir)?;
            summary.count += 1;
            if summary.first.is_none() {
                summary.first = Some(result);
            }
        }

        info!(
            root = %root.display(),
            count = summary.count,
            "batch finished"
        );
        Ok(summary)
    }
}

/// Unpack every supported texture under `root` with one configuration.
///
/// # Errors
///
/// Returns [`Error::UnknownPreset`] before any traversal if the preset is
/// unknown; otherwise see [`Unpacker::unpack_directory`].
pub fn unpack_batch(root: &Path, output_dir: &Path, options: &UnpackOptions) -> Result<BatchSummary> {
    Unpacker::new(options)?.unpack_directory(root, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_supported_image_accepts_texture_formats() {
        assert!(is_supported_image(Path::new("rock_orm.png")));
        assert!(is_supported_image(Path::new("rock_orm.JPG")));
        assert!(is_supported_image(Path::new("rock_orm.jpeg")));
        assert!(is_supported_image(Path::new("rock_orm.Tga")));
        assert!(is_supported_image(Path::new("rock_orm.tif")));
        assert!(is_supported_image(Path::new("rock_orm.TIFF")));
    }

    #[test]
    fn is_supported_image_rejects_other_files() {
        assert!(!is_supported_image(Path::new("rock_orm.webp")));
        assert!(!is_supported_image(Path::new("rock_orm.dds")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn discover_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("props/crates");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a.png"), b"").unwrap();
        std::fs::write(dir.path().join("readme.md"), b"").unwrap();
        std::fs::write(nested.join("b.TGA"), b"").unwrap();
        std::fs::create_dir_all(dir.path().join("folder.png")).unwrap();

        let mut found: Vec<_> = discover(dir.path())
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        found.sort();
        assert_eq!(found, vec!["a.png", "b.TGA"]);
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
        let summary =
            unpack_batch(dir.path(), &dir.path().join("out"), &UnpackOptions::default()).unwrap();
        assert_eq!(summary.count, 0);
        assert!(summary.first.is_none());
    }

    #[test]
    fn file_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.png");
        std::fs::write(&file, b"").unwrap();
        let err = unpack_batch(&file, dir.path(), &UnpackOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }
}
