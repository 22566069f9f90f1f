//! # Index builder
//!
//! Incremental describe-and-embed pipeline over a folder of images, plus the
//! artifact exporter.
//!
//! ## Responsibilities
//! - **Building**: For each enumerated file, in order: skip non-images, read
//!   the bytes, ask the remote service for a caption, embed the caption, and
//!   append the record to the accumulating index.
//! - **Partial-failure tolerance**: One file's failure never aborts the run.
//!   A flaky remote service halfway through a large folder must not force a
//!   full restart, so read, describe, and embed failures are recorded in the
//!   [`BuildReport`] and the loop moves on.
//! - **Progress**: The current position and total are observable for every
//!   file through a callback, so a UI can track a long build.
//! - **Export**: [`export_index`] serializes the finished index to the JSON
//!   artifact that a later session re-loads.
//!
//! Files are processed strictly sequentially, which bounds load on the
//! remote service and keeps progress reporting monotonic.
//!
//! ## Quick Example
//! ```no_run
//! use meme_vault::api::EmbeddingClient;
//! use meme_vault::config::MemeVaultConfig;
//! use meme_vault::files::enumerate_folder;
//! use meme_vault::indexer::{IndexBuilder, export_index};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MemeVaultConfig {
//!     api_base: "http://localhost:8000/memeselector".to_string(),
//!     api_key: String::new(),
//! };
//! let client = EmbeddingClient::new(&config)?;
//! let candidates = enumerate_folder(std::path::Path::new("./memes"))?;
//!
//! let mut builder = IndexBuilder::new(&client);
//! let (index, report) = builder.build(&candidates, |_phase| {}).await;
//! println!("{} indexed, {} failed", report.indexed, report.failures.len());
//!
//! std::fs::write("index.json", export_index(&index)?)?;
//! # Ok(()) }
//! ```

use std::fs;
use tracing::{debug, warn};

use crate::api::EmbeddingClient;
use crate::error::VaultError;
use crate::files::is_image_file;
use crate::models::{CandidateFile, ImageIndex, IndexRecord};

/// Observable phase of a build run.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildPhase {
    /// No build has started yet.
    Idle,

    /// A file is being examined; `current` counts from 1 to `total`.
    Processing { current: usize, total: usize },

    /// The run finished. `indexed` may be less than the number of image
    /// files examined.
    Complete { indexed: usize, failed: usize },
}

/// One file the build could not process; the run continued past it.
#[derive(Debug)]
pub struct BuildFailure {
    pub path: String,
    pub error: VaultError,
}

/// Summary of one build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Files examined, images or not.
    pub examined: usize,

    /// Non-image files passed over without error.
    pub skipped: usize,

    /// Records appended to the index.
    pub indexed: usize,

    /// Per-file failures, in enumeration order.
    pub failures: Vec<BuildFailure>,
}

/// Builds an [`ImageIndex`] from an ordered set of candidate files.
pub struct IndexBuilder<'a> {
    client: &'a EmbeddingClient,
    phase: BuildPhase,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(client: &'a EmbeddingClient) -> Self {
        Self {
            client,
            phase: BuildPhase::Idle,
        }
    }

    /// The phase the most recent (or current) run is in.
    pub fn phase(&self) -> &BuildPhase {
        &self.phase
    }

    /// Processes `candidates` in enumeration order and accumulates an index.
    ///
    /// The progress callback fires once per file, before it is processed,
    /// and once more when the run completes. Per-file failures are recorded
    /// in the report and logged; they never abort the run, so this function
    /// is infallible.
    ///
    /// # Parameters
    /// - `candidates`: Ordered files from [`crate::files::enumerate_folder`].
    /// - `on_progress`: Invoked with the builder's phase after each
    ///   transition.
    ///
    /// # Returns
    /// The accumulated index and the run's [`BuildReport`].
    pub async fn build<F>(
        &mut self,
        candidates: &[CandidateFile],
        mut on_progress: F,
    ) -> (ImageIndex, BuildReport)
    where
        F: FnMut(&BuildPhase),
    {
        let total = candidates.len();
        let mut index = ImageIndex::new();
        let mut report = BuildReport::default();

        for (i, file) in candidates.iter().enumerate() {
            self.phase = BuildPhase::Processing {
                current: i + 1,
                total,
            };
            on_progress(&self.phase);
            report.examined += 1;

            if !is_image_file(&file.relative_path) {
                debug!("Skipping non-image file: {}", file.relative_path);
                report.skipped += 1;
                continue;
            }

            match self.process_image(file).await {
                Ok(record) => {
                    index.push(record);
                    report.indexed += 1;
                }
                Err(error) => {
                    warn!("Failed to process {}: {error}", file.relative_path);
                    report.failures.push(BuildFailure {
                        path: file.relative_path.clone(),
                        error,
                    });
                }
            }
        }

        self.phase = BuildPhase::Complete {
            indexed: report.indexed,
            failed: report.failures.len(),
        };
        on_progress(&self.phase);

        (index, report)
    }

    async fn process_image(&self, file: &CandidateFile) -> Result<IndexRecord, VaultError> {
        let image = fs::read(&file.absolute_path)?;
        let description = self.client.describe(&file.relative_path, image).await?;
        let vector = self.client.embed(&description).await?;

        Ok(IndexRecord {
            path: file.relative_path.clone(),
            description,
            vector,
        })
    }
}

/// Serializes an index to its downloadable JSON artifact.
///
/// The artifact is a bare, pretty-printed array of records with no envelope
/// and no version field. It round-trips exactly through
/// [`crate::session::SessionState::load_index`].
pub fn export_index(index: &ImageIndex) -> Result<Vec<u8>, VaultError> {
    serde_json::to_vec_pretty(index).map_err(|e| VaultError::Io(e.into()))
}
