use std::path::PathBuf;

use serde::Serialize;

use crate::VersionKey;

/// A file that could not be processed. Failures are recorded and the batch
/// moves on to the next file.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
	pub path: PathBuf,
	/// The underlying cause, rendered for display.
	pub message: String,
}

/// What the footer appender did to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FooterOutcome {
	Appended,
	AlreadyPresent,
}

/// Result of `blockdoc footer`.
#[derive(Debug, Default, Serialize)]
pub struct FooterReport {
	/// Files that received the footer (or would have, in a dry run).
	pub appended: Vec<PathBuf>,
	/// Files that already carried every footer marker.
	pub already_present: Vec<PathBuf>,
	pub failures: Vec<FileFailure>,
	pub dry_run: bool,
}

/// What the reference rewriter did to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
	/// At least one substitution matched. Holds the original and rewritten
	/// content.
	Rewritten { before: String, after: String },
	Unchanged,
}

/// A file whose references changed.
#[derive(Debug, Clone, Serialize)]
pub struct RewrittenFile {
	pub path: PathBuf,
	#[serde(skip)]
	pub before: String,
	#[serde(skip)]
	pub after: String,
}

/// Result of `blockdoc refs`.
#[derive(Debug, Default, Serialize)]
pub struct RewriteReport {
	/// Files whose content changed (written unless this was a dry run).
	pub rewritten: Vec<RewrittenFile>,
	/// Number of files scanned without any substitution matching.
	pub unchanged: usize,
	pub failures: Vec<FileFailure>,
	pub dry_run: bool,
}

/// A BLOCK document listed in the masterplan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockEntry {
	pub key: VersionKey,
	pub file_name: String,
}

/// Result of `blockdoc masterplan`.
#[derive(Debug, Serialize)]
pub struct MasterplanReport {
	/// Path of the generated index.
	pub output: PathBuf,
	/// Entries in the order they appear in the index.
	pub entries: Vec<BlockEntry>,
	/// BLOCK documents left out because their name has no version key.
	pub skipped: Vec<String>,
	/// The full generated document.
	#[serde(skip)]
	pub content: String,
	pub dry_run: bool,
}

impl FooterReport {
	pub fn processed(&self) -> usize {
		self.appended.len() + self.already_present.len() + self.failures.len()
	}
}

impl RewriteReport {
	pub fn processed(&self) -> usize {
		self.rewritten.len() + self.unchanged + self.failures.len()
	}
}

impl MasterplanReport {
	/// Number of distinct major versions, one section each.
	pub fn family_count(&self) -> usize {
		let mut majors: Vec<u32> = self.entries.iter().map(|entry| entry.key.major).collect();
		majors.dedup();
		majors.len()
	}
}
