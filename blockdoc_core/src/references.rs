use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::BlockdocError;
use crate::BlockdocResult;
use crate::config::BlockdocConfig;
use crate::config::DEFAULT_SUBSTITUTIONS;
use crate::project::WalkOptions;
use crate::project::collect_markdown_files;
use crate::report::FileFailure;
use crate::report::RewriteOutcome;
use crate::report::RewriteReport;
use crate::report::RewrittenFile;

/// A literal find-and-replace rule. `old` is matched as plain text, never as
/// a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Substitution {
	pub old: String,
	pub new: String,
}

impl Substitution {
	pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
		Self {
			old: old.into(),
			new: new.into(),
		}
	}
}

/// An ordered list of [`Substitution`]s.
///
/// Rules run in declaration order over the whole buffer, each one seeing the
/// output of the rules before it. With `A -> B` followed by `B -> C`, an `A`
/// in the input ends up as `C`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
	entries: Vec<Substitution>,
}

impl SubstitutionTable {
	pub fn new(entries: Vec<Substitution>) -> Self {
		Self { entries }
	}

	/// The built-in renaming table.
	pub fn builtin() -> Self {
		Self::new(
			DEFAULT_SUBSTITUTIONS
				.iter()
				.map(|(old, new)| Substitution::new(*old, *new))
				.collect(),
		)
	}

	pub fn entries(&self) -> &[Substitution] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Run every rule over `content` in order and return the final buffer.
	pub fn apply(&self, content: &str) -> String {
		let mut buffer = content.to_string();
		for entry in &self.entries {
			// Empty patterns would match between every character.
			if entry.old.is_empty() || !buffer.contains(entry.old.as_str()) {
				continue;
			}
			buffer = buffer.replace(entry.old.as_str(), &entry.new);
		}

		buffer
	}
}

/// Apply the table to a single file. The file is written only when the
/// content actually changed and `dry_run` is false, so untouched files keep
/// their modification time.
pub fn rewrite_file(
	path: &Path,
	table: &SubstitutionTable,
	dry_run: bool,
) -> BlockdocResult<RewriteOutcome> {
	let before = std::fs::read_to_string(path).map_err(|source| BlockdocError::ReadFile {
		path: path.display().to_string(),
		source,
	})?;
	let after = table.apply(&before);

	if after == before {
		return Ok(RewriteOutcome::Unchanged);
	}

	if !dry_run {
		std::fs::write(path, &after).map_err(|source| BlockdocError::WriteFile {
			path: path.display().to_string(),
			source,
		})?;
	}

	Ok(RewriteOutcome::Rewritten { before, after })
}

/// Rewrite references in every markdown file under `root`, skipping the
/// configured excluded directories.
///
/// Per-file failures are logged and collected in
/// [`RewriteReport::failures`]; they never stop the batch.
pub fn rewrite_references(
	root: &Path,
	config: &BlockdocConfig,
	dry_run: bool,
) -> BlockdocResult<RewriteReport> {
	let options = WalkOptions::from_config(&config.walk);
	let table = config.substitution_table();
	let files = collect_markdown_files(root, &options)?;
	let mut report = RewriteReport {
		dry_run,
		..RewriteReport::default()
	};

	for path in files {
		match rewrite_file(&path, &table, dry_run) {
			Ok(RewriteOutcome::Rewritten { before, after }) => {
				tracing::info!(path = %path.display(), dry_run, "updated references");
				report.rewritten.push(RewrittenFile {
					path,
					before,
					after,
				});
			}
			Ok(RewriteOutcome::Unchanged) => {
				tracing::info!(path = %path.display(), "no references to update");
				report.unchanged += 1;
			}
			Err(e) => {
				tracing::error!(path = %path.display(), error = %e, "failed to update references");
				report.failures.push(FileFailure {
					path,
					message: e.to_string(),
				});
			}
		}
	}

	Ok(report)
}
