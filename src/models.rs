//! # Data model
//!
//! Records shared by the indexing and search flows.
//!
//! [`IndexRecord`] and [`ImageIndex`] are the serialized surface: an index
//! round-trips through a JSON artifact between the session that built it and
//! the session that searches it. Everything else here is in-memory only.
//! [`FileHandle`] in particular is scoped to the session that selected the
//! folder and is never serialized or transmitted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One indexed image: folder-relative path, generated description, and the
/// description's embedding.
///
/// `path` is unique within a well-formed index. If an artifact carries
/// duplicates anyway, both records are scored during a search and both
/// resolve through the same handle map entry, so the lookup stays
/// deterministic. `vector` length is fixed per index by the embedding
/// service but never validated here; an incompatible vector simply scores
/// `0.0` at search time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IndexRecord {
    /// Folder-relative identifier, taken verbatim from enumeration.
    pub path: String,

    /// Caption generated by the remote description service.
    pub description: String,

    /// Embedding of the description.
    pub vector: Vec<f32>,
}

/// Ordered collection of [`IndexRecord`]s, insertion order = enumeration
/// order. Immutable once exported.
///
/// Serializes transparently as a bare JSON array of records, with no
/// envelope and no version field, so the artifact matches what
/// [`crate::session::SessionState::load_index`] expects byte for byte.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct ImageIndex {
    records: Vec<IndexRecord>,
}

impl ImageIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-ordered record list.
    pub fn from_records(records: Vec<IndexRecord>) -> Self {
        Self { records }
    }

    /// Appends a record, preserving insertion order.
    pub fn push(&mut self, record: IndexRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Opaque reference to a file under the currently selected folder.
///
/// Good only for the lifetime of the session that selected the folder.
/// There is deliberately no serde implementation for this type.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    absolute_path: PathBuf,
}

impl FileHandle {
    pub(crate) fn new(absolute_path: PathBuf) -> Self {
        Self { absolute_path }
    }

    /// The resolved local path, for rendering.
    pub fn path(&self) -> &Path {
        &self.absolute_path
    }
}

/// A file discovered under a selected folder, prior to any filtering.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Path relative to the selected root, taken verbatim.
    pub relative_path: String,

    /// Full path used to read the file locally.
    pub absolute_path: PathBuf,
}

/// Transient scoring row produced during a search and discarded after
/// rendering.
#[derive(Debug)]
pub struct ScoredRecord<'a> {
    pub record: &'a IndexRecord,
    pub similarity: f32,
}

/// One ranked search hit, resolved back to a local file.
#[derive(Debug, Clone)]
pub struct RenderableResult {
    pub path: String,
    pub description: String,
    pub similarity: f32,
    pub handle: FileHandle,
}
