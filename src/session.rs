//! # Session state
//!
//! The in-memory pairing of a loaded index with a loaded set of local file
//! handles, required before search is possible.
//!
//! The two halves arrive independently and in either order: the user loads
//! an exported index artifact and re-selects the folder it was built from.
//! Loading either half again replaces it wholesale; there is no incremental
//! merge. The state is created empty at session start and simply dropped
//! when the session ends, there is no persistence layer here.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::VaultError;
use crate::files::enumerate_folder;
use crate::models::{FileHandle, ImageIndex};

/// Holds the two independently-loaded halves of a search session.
#[derive(Debug, Default)]
pub struct SessionState {
    index: Option<ImageIndex>,
    file_handles: Option<HashMap<String, FileHandle>>,
}

impl SessionState {
    /// Creates an empty session; neither half is loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an exported index artifact into the session.
    ///
    /// The index slot is cleared first, so malformed input leaves it unset
    /// (a previously loaded index is discarded) and the failure is reported
    /// to the caller rather than tearing down the session. The folder half
    /// is untouched either way.
    ///
    /// # Returns
    /// The number of records loaded, or `VaultError::InvalidIndexFormat`.
    pub fn load_index(&mut self, artifact: &[u8]) -> Result<usize, VaultError> {
        self.index = None;

        let index: ImageIndex = serde_json::from_slice(artifact)
            .map_err(|e| VaultError::InvalidIndexFormat(e.to_string()))?;

        let count = index.len();
        debug!("Loaded index with {count} records");
        self.index = Some(index);

        Ok(count)
    }

    /// Enumerates `root` and replaces the handle mapping wholesale.
    ///
    /// Keys are folder-relative paths taken verbatim, so they match record
    /// paths exactly when the index was built from the same folder. On an
    /// enumeration error the previous mapping is left in place.
    ///
    /// # Returns
    /// The number of files mapped.
    pub fn load_folder(&mut self, root: &Path) -> Result<usize, VaultError> {
        let candidates = enumerate_folder(root)?;

        let handles: HashMap<String, FileHandle> = candidates
            .into_iter()
            .map(|c| (c.relative_path, FileHandle::new(c.absolute_path)))
            .collect();

        let count = handles.len();
        debug!("Selected folder {} with {count} files", root.display());
        self.file_handles = Some(handles);

        Ok(count)
    }

    /// True iff both an index and a folder are currently loaded.
    pub fn is_ready(&self) -> bool {
        self.index.is_some() && self.file_handles.is_some()
    }

    pub fn index(&self) -> Option<&ImageIndex> {
        self.index.as_ref()
    }

    /// Exact-string lookup of a record path in the current folder selection.
    pub fn resolve(&self, path: &str) -> Option<&FileHandle> {
        self.file_handles.as_ref()?.get(path)
    }
}
