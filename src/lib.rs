//! # Meme Vault (library root)
//!
//! This crate provides the core plumbing for the **Meme Vault** CLI and library:
//! - Remote description/embedding service bindings (`api`).
//! - Incremental index building and artifact export (`indexer`).
//! - Search-session state and local retrieval (`session`, `search`, `similarity`).
//! - CLI parsing & commands (`commands`).
//! - Configuration (`config`), shared data model (`models`), folder
//!   enumeration (`files`), and the failure taxonomy (`error`).
//!
//! ## Two flows, one data model
//!
//! **Indexing** walks a user-selected folder, asks the remote service for a
//! caption and an embedding per image, and serializes the accumulated
//! records to a JSON artifact the user keeps. A flaky service halfway
//! through a big folder only costs the affected files, never the run.
//!
//! **Searching**, typically on another machine or in a later session, pairs
//! that artifact with a re-selected copy of the folder and ranks every
//! record against an embedded query. Only the query text travels; images are
//! resolved locally through session-scoped handles and never re-uploaded.
//!
//! The two flows share only the data model, the vector math, and the service
//! client; they never run concurrently against the same session state.
//!
//! ## Modules
//! - [`api`], [`commands`], [`config`], [`error`], [`files`], [`indexer`],
//!   [`models`], [`search`], [`session`], [`similarity`]

use directories::ProjectDirs;
use std::error::Error;

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod indexer;
pub mod models;
pub mod search;
pub mod session;
pub mod similarity;

/// Return the per-platform configuration directory used by Meme Vault.
///
/// This uses [`directories::ProjectDirs`] with the application triple
/// `("com", "awful-sec", "mvault")`, so you get the right place on each OS
/// (e.g., `~/Library/Application Support/com.awful-sec.mvault` on macOS).
///
/// The directory is **not** created by this function; callers that need it
/// should create it with `fs::create_dir_all`.
///
/// # Errors
/// Returns an error if the platform configuration directory cannot be
/// determined (which is rare but possible in heavily sandboxed environments).
///
/// # Examples
/// ```rust
/// let cfg = meme_vault::config_dir().expect("has a config dir");
/// println!("config at {}", cfg.display());
/// ```
pub fn config_dir() -> Result<std::path::PathBuf, Box<dyn Error>> {
    let proj_dirs = ProjectDirs::from("com", "awful-sec", "mvault")
        .ok_or("Unable to determine config directory")?;
    let config_dir = proj_dirs.config_dir().to_path_buf();

    Ok(config_dir)
}
