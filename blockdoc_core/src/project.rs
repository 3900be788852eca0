use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::BlockdocError;
use crate::BlockdocResult;
use crate::config::WalkConfig;
use crate::version::is_block_document;

/// Options for controlling how a directory tree is walked.
///
/// Use [`WalkOptions::default()`] for the built-in exclusions or
/// [`WalkOptions::from_config`] to construct from a [`WalkConfig`].
#[derive(Debug, Clone)]
pub struct WalkOptions {
	/// Directory names that are never entered.
	pub exclude_dirs: Vec<String>,
	/// Gitignore-style patterns to exclude from the walk.
	pub exclude_patterns: Vec<String>,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self::from_config(&WalkConfig::default())
	}
}

impl WalkOptions {
	pub fn from_config(config: &WalkConfig) -> Self {
		Self {
			exclude_dirs: config.exclude_dirs.clone(),
			exclude_patterns: config.patterns.clone(),
		}
	}
}

/// The final component of `path` as UTF-8, if any.
pub fn file_name(path: &Path) -> Option<&str> {
	path.file_name().and_then(|name| name.to_str())
}

/// Collect every markdown (`*.md`) file under `root`, recursively.
pub fn collect_markdown_files(root: &Path, options: &WalkOptions) -> BlockdocResult<Vec<PathBuf>> {
	collect_files(root, options, |name| name.ends_with(".md"))
}

/// Collect every `BLOCK*.md` file under `root`, recursively.
pub fn collect_block_documents(root: &Path, options: &WalkOptions) -> BlockdocResult<Vec<PathBuf>> {
	collect_files(root, options, is_block_document)
}

/// List the names of `BLOCK*.md` regular files directly inside `root`
/// (non-recursive), sorted.
pub fn list_root_block_documents(root: &Path) -> BlockdocResult<Vec<String>> {
	let entries = std::fs::read_dir(root).map_err(|source| {
		BlockdocError::UnreadableRoot {
			path: root.display().to_string(),
			source,
		}
	})?;

	let mut names = Vec::new();
	for entry in entries {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				tracing::warn!(root = %root.display(), error = %e, "skipping unreadable directory entry");
				continue;
			}
		};

		let path = entry.path();
		if !path.is_file() {
			continue;
		}

		let Some(name) = file_name(&path) else {
			continue;
		};

		if is_block_document(name) {
			names.push(name.to_string());
		}
	}

	names.sort();
	Ok(names)
}

/// Build a `Gitignore` matcher from the `[walk] patterns` config entries.
pub(crate) fn build_exclude_matcher(root: &Path, patterns: &[String]) -> BlockdocResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			BlockdocError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| BlockdocError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Collect the files under `root` whose name satisfies `accept`.
///
/// The root itself must be readable; unreadable subdirectories are logged and
/// skipped so one bad directory does not abort a batch.
fn collect_files(
	root: &Path,
	options: &WalkOptions,
	accept: impl Fn(&str) -> bool,
) -> BlockdocResult<Vec<PathBuf>> {
	if !root.is_dir() {
		return Err(BlockdocError::UnreadableRoot {
			path: root.display().to_string(),
			source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
		});
	}

	let exclude = build_exclude_matcher(root, &options.exclude_patterns)?;
	let mut walker = Walker {
		options,
		exclude: &exclude,
		accept: &accept,
		visited_dirs: HashSet::new(),
		files: Vec::new(),
	};

	let entries = std::fs::read_dir(root).map_err(|source| {
		BlockdocError::UnreadableRoot {
			path: root.display().to_string(),
			source,
		}
	})?;
	walker.mark_visited(root);
	walker.visit_entries(root, entries);

	let mut files = walker.files;
	// Sort for deterministic ordering.
	files.sort();
	Ok(files)
}

struct Walker<'a, F: Fn(&str) -> bool> {
	options: &'a WalkOptions,
	exclude: &'a Gitignore,
	accept: &'a F,
	visited_dirs: HashSet<PathBuf>,
	files: Vec<PathBuf>,
}

impl<F: Fn(&str) -> bool> Walker<'_, F> {
	/// Returns `false` when the directory was already visited, which happens
	/// with symlinked directories.
	fn mark_visited(&mut self, dir: &Path) -> bool {
		let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
		self.visited_dirs.insert(canonical)
	}

	fn walk_dir(&mut self, dir: &Path) {
		if !self.mark_visited(dir) {
			tracing::warn!(path = %dir.display(), "skipping directory that was already visited (symlink)");
			return;
		}

		match std::fs::read_dir(dir) {
			Ok(entries) => self.visit_entries(dir, entries),
			Err(e) => {
				tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
			}
		}
	}

	fn visit_entries(&mut self, dir: &Path, entries: std::fs::ReadDir) {
		for entry in entries {
			let entry = match entry {
				Ok(entry) => entry,
				Err(e) => {
					tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable directory entry");
					continue;
				}
			};
			let path = entry.path();
			let Some(name) = file_name(&path) else {
				tracing::debug!(path = %path.display(), "skipping non UTF-8 file name");
				continue;
			};

			let is_dir = path.is_dir();
			if is_dir && self.options.exclude_dirs.iter().any(|excluded| excluded == name) {
				continue;
			}

			if self.exclude.matched(&path, is_dir).is_ignore() {
				continue;
			}

			if is_dir {
				self.walk_dir(&path);
			} else if path.is_file() && (self.accept)(name) {
				self.files.push(path);
			}
		}
	}
}
