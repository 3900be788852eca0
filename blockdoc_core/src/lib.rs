//! `blockdoc_core` is the core library behind the `blockdoc` maintenance
//! tool. It keeps a folder of versioned markdown "BLOCK" documents
//! (`BLOCK<major>.<minor>_<title>.md`) tidy: it appends a review footer,
//! rewrites cross-references after a renaming scheme change and rebuilds the
//! `MASTERPLAN.md` index.
//!
//! ## Operations
//!
//! ```text
//! root directory
//!   → footer      (BLOCK*.md, recursive)   append the review footer once
//!   → references  (*.md, recursive)        apply the ordered substitution table
//!   → masterplan  (BLOCK*.md, root only)    parse version keys, sort, group, regenerate
//! ```
//!
//! Every batch is best effort: a file that cannot be read or written is
//! logged and recorded in the returned report, and the remaining files are
//! still processed.
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `blockdoc.toml` with built-in
//!   defaults for the footer, the substitution table and the walk exclusions.
//! - [`project`]: Directory discovery.
//! - [`settings`]: Environment-derived application settings.
//! - [`secrets`]: Example secrets file generation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockdoc_core::BlockdocConfig;
//! use blockdoc_core::rebuild_masterplan;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = BlockdocConfig::load_or_default(root).unwrap();
//! let report = rebuild_masterplan(root, &config, false).unwrap();
//! println!("{} document(s) indexed", report.entries.len());
//! ```

pub use config::*;
pub use error::*;
pub use footer::*;
pub use masterplan::*;
pub use references::*;
pub use report::*;
pub use version::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod footer;
mod masterplan;
pub mod project;
mod references;
mod report;
pub mod secrets;
pub mod settings;
mod version;

#[cfg(test)]
mod __fixtures;
