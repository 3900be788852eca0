use std::path::Path;

use crate::BlockdocError;
use crate::BlockdocResult;
use crate::config::BlockdocConfig;
use crate::config::FooterConfig;
use crate::project::WalkOptions;
use crate::project::collect_block_documents;
use crate::report::FileFailure;
use crate::report::FooterOutcome;
use crate::report::FooterReport;

/// Returns true when every footer marker occurs in `content`. A partial
/// match (for example a hand-edited footer) does not count.
pub fn has_footer(content: &str, footer: &FooterConfig) -> bool {
	footer
		.markers
		.iter()
		.all(|marker| content.contains(marker.as_str()))
}

/// Append the footer to `content`.
///
/// Returns `None` when the footer is already present. Otherwise trailing line
/// breaks are collapsed to exactly one, then the footer text and a final line
/// break are appended. Documents whose first line ends in `\r\n` keep CRLF
/// endings throughout, footer included. Applying the result again returns
/// `None`, so the operation is idempotent.
pub fn append_footer(content: &str, footer: &FooterConfig) -> Option<String> {
	if has_footer(content, footer) {
		return None;
	}

	let newline = line_ending(content);
	let mut body = content;
	while let Some(rest) = body.strip_suffix("\r\n").or_else(|| body.strip_suffix('\n')) {
		body = rest;
	}

	let text = footer.text.replace("\r\n", "\n");
	let mut updated = String::with_capacity(body.len() + text.len() * 2 + 4);
	updated.push_str(body);
	updated.push_str(newline);
	updated.push_str(&text.replace('\n', newline));
	updated.push_str(newline);

	Some(updated)
}

/// The terminator used by the first line of `content`, `\n` when there is
/// none.
fn line_ending(content: &str) -> &'static str {
	match content.find('\n') {
		Some(index) if content[..index].ends_with('\r') => "\r\n",
		_ => "\n",
	}
}

/// Apply the footer to a single file. The file is only written when the
/// footer is missing and `dry_run` is false.
pub fn apply_footer_to_file(
	path: &Path,
	footer: &FooterConfig,
	dry_run: bool,
) -> BlockdocResult<FooterOutcome> {
	let content = std::fs::read_to_string(path).map_err(|source| BlockdocError::ReadFile {
		path: path.display().to_string(),
		source,
	})?;

	let Some(updated) = append_footer(&content, footer) else {
		return Ok(FooterOutcome::AlreadyPresent);
	};

	if !dry_run {
		std::fs::write(path, updated).map_err(|source| BlockdocError::WriteFile {
			path: path.display().to_string(),
			source,
		})?;
	}

	Ok(FooterOutcome::Appended)
}

/// Append the footer to every `BLOCK*.md` document under `root`.
///
/// This is a best-effort batch: a file that cannot be read or written is
/// logged and recorded in [`FooterReport::failures`] and the remaining files
/// are still processed. Only a failure to walk the root itself is returned as
/// an error.
pub fn append_footers(
	root: &Path,
	config: &BlockdocConfig,
	dry_run: bool,
) -> BlockdocResult<FooterReport> {
	let options = WalkOptions::from_config(&config.walk);
	let files = collect_block_documents(root, &options)?;
	let mut report = FooterReport {
		dry_run,
		..FooterReport::default()
	};

	for path in files {
		match apply_footer_to_file(&path, &config.footer, dry_run) {
			Ok(FooterOutcome::Appended) => {
				tracing::info!(path = %path.display(), dry_run, "appended footer");
				report.appended.push(path);
			}
			Ok(FooterOutcome::AlreadyPresent) => {
				tracing::info!(path = %path.display(), "footer already present");
				report.already_present.push(path);
			}
			Err(e) => {
				tracing::error!(path = %path.display(), error = %e, "failed to append footer");
				report.failures.push(FileFailure {
					path,
					message: e.to_string(),
				});
			}
		}
	}

	Ok(report)
}
