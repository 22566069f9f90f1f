//! This module defines the command-line interface for the application using `clap`.
//!
//! It provides a `Cli` struct that represents the parsed command-line arguments,
//! and a `Commands` enum that represents the available subcommands and their
//! options.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Represents the parsed command-line arguments.
///
/// This struct is constructed by parsing the command-line arguments using `clap`.
/// It contains a `command` field that holds the parsed subcommand and its options.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, propagate_version = true, color = clap::ColorChoice::Always)]
pub struct Cli {
    /// The parsed subcommand and its options.
    #[command(subcommand)]
    pub command: Commands,
}

/// Represents the available subcommands and their options.
///
/// Each variant of this enum corresponds to a subcommand that the user can invoke
/// from the command line, along with any options specific to that subcommand.
#[derive(Subcommand, Debug)]
#[command(about, long_about = None, color = clap::ColorChoice::Always)]
pub enum Commands {
    /// The 'index' subcommand: describe and embed every image under a folder,
    /// then export the resulting index artifact.
    ///
    /// Non-image files are passed over, and a file the remote service cannot
    /// process is reported without stopping the run.
    #[clap(name = "index", alias = "x")]
    Index {
        /// Folder of images to index.
        folder: PathBuf,

        /// Where to write the exported index artifact.
        #[arg(name = "output", short = 'o', default_value = "index.json")]
        output: PathBuf,
    },

    /// The 'search' subcommand: pair an exported index with a local folder
    /// and rank its images against a free-text query.
    #[clap(name = "search", alias = "s")]
    Search {
        /// Free-text description of the image you are looking for.
        query: String,

        /// Index artifact exported by a previous 'index' run.
        #[arg(name = "index", short = 'i')]
        index: PathBuf,

        /// The folder the index was built from.
        #[arg(name = "folder", short = 'f')]
        folder: PathBuf,
    },

    /// The 'init' subcommand, which takes no arguments and is used for initialization.
    ///
    /// When invoked, this subcommand creates the configuration directory and
    /// writes a default config file.
    Init,
}
