//! Folder enumeration for the indexing and search-session flows.
//!
//! Both flows derive folder-relative paths through [`enumerate_folder`], so
//! a record's `path` and the session's handle keys match exactly when the
//! same folder produced both. Paths are taken verbatim: no case folding, no
//! separator rewriting, no trailing-slash cleanup.

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::VaultError;
use crate::models::CandidateFile;

/// Walks `root` and returns every regular file beneath it, name-sorted for a
/// stable enumeration order, with paths relative to `root`.
pub fn enumerate_folder(root: &Path) -> Result<Vec<CandidateFile>, VaultError> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| VaultError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let absolute_path = entry.path().to_path_buf();
        let relative_path = match absolute_path.strip_prefix(root) {
            Ok(rel) => rel.to_string_lossy().into_owned(),
            Err(_) => continue,
        };

        candidates.push(CandidateFile {
            relative_path,
            absolute_path,
        });
    }

    debug!(
        "Enumerated {} files under {}",
        candidates.len(),
        root.display()
    );

    Ok(candidates)
}

/// Whether a path looks like an image, judged by its guessed MIME type.
pub fn is_image_file(path: &str) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|m| m.type_() == mime_guess::mime::IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_enumerate_folder_relative_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.jpg"), b"x").unwrap();

        let candidates = enumerate_folder(dir.path()).unwrap();
        let paths: Vec<&str> = candidates.iter().map(|c| c.relative_path.as_str()).collect();

        assert_eq!(paths, vec!["a.png", "b.png", "sub/c.jpg"]);
        for candidate in &candidates {
            assert!(candidate.absolute_path.is_file());
        }
    }

    #[test]
    fn test_enumerate_missing_folder_errors() {
        let result = enumerate_folder(Path::new("non/existent/folder"));
        assert!(result.is_err());
    }

    #[test]
    fn test_image_detection() {
        assert!(is_image_file("meme.png"));
        assert!(is_image_file("folder/meme.jpg"));
        assert!(is_image_file("meme.jpeg"));
        assert!(is_image_file("meme.gif"));
        assert!(is_image_file("meme.webp"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("archive.zip"));
        assert!(!is_image_file("no_extension"));
    }
}
