use std::path::Path;

use crate::BlockdocError;
use crate::BlockdocResult;
use crate::VersionKey;
use crate::config::BlockdocConfig;
use crate::project::list_root_block_documents;
use crate::report::BlockEntry;
use crate::report::MasterplanReport;

const PREAMBLE: [&str; 12] = [
	"# 📖 MASTERPLAN.md",
	"**Project:** QuantumPoly website",
	"**Owner:** Aykut Aydin (A.I.K)",
	"**Advisor:** Prof. Dr. Esta Willy Armstrong (EWA)",
	"**Last Synced:** 2025-11-26",
	"---",
	"## 🌌 Vision",
	"The QuantumPoly website is more than just a landing page: it is a **showcase for \
	 technological excellence** and a **testing ground for AI-supported development**.",
	"Our mission: **Clean code, clear architecture, i18n-ready, accessible, SEO-optimized, \
	 secure and transparent.**",
	"---",
	"## 🛠 Project Blocks & Documentation Index",
	"",
];

const CLOSING: [&str; 10] = [
	"---",
	"## 📌 Definition of Done",
	"* Clean structure, consistent configurations, no duplicates.",
	"* Modular, tested, i18n-capable components.",
	"* Newsletter flow (frontend + backend) working.",
	"* Compliance pages available, accessible.",
	"* SEO/A11y/Perf ≥ 90 in Lighthouse.",
	"* CI/CD running (preview + staging + prod).",
	"* Documentation: hygiene, i18n, policies, SEO/Perf, CI/CD.",
	"---",
];

/// BLOCK documents found in the root, split by whether their name carries a
/// version key.
#[derive(Debug, Default)]
pub struct BlockScan {
	/// Sorted by key, then by file name.
	pub entries: Vec<BlockEntry>,
	/// Names matching `BLOCK*.md` without a parseable key.
	pub skipped: Vec<String>,
}

/// Sort entries by version key. Entries with equal keys (`BLOCK04.2_a.md`
/// and `BLOCK4.2_b.md`) fall back to file name order so the output never
/// depends on directory listing order.
pub fn sort_entries(entries: &mut [BlockEntry]) {
	entries.sort_by(|a, b| {
		a.key
			.cmp(&b.key)
			.then_with(|| a.file_name.cmp(&b.file_name))
	});
}

/// Build sorted entries from a list of candidate names. Names without a
/// version key are returned separately and never appear in the entries.
pub fn entries_from_names<I, S>(names: I) -> BlockScan
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut scan = BlockScan::default();
	for name in names {
		let file_name = name.into();
		match VersionKey::parse(&file_name) {
			Some(key) => scan.entries.push(BlockEntry { key, file_name }),
			None => scan.skipped.push(file_name),
		}
	}

	sort_entries(&mut scan.entries);
	scan.skipped.sort();
	scan
}

/// Discover the BLOCK documents directly inside `root` (non-recursive).
pub fn collect_block_entries(root: &Path) -> BlockdocResult<BlockScan> {
	let names = list_root_block_documents(root)?;
	let scan = entries_from_names(names);

	for name in &scan.skipped {
		tracing::warn!(
			file = %name,
			"excluding BLOCK document from the masterplan: its name has no `BLOCK<major>.<minor>` version key"
		);
	}

	Ok(scan)
}

/// Render the masterplan document for already sorted `entries`.
///
/// A `### **Block Family NN**` section, preceded by a `---` rule, opens every
/// time the major version changes. Each entry links to itself. Lines are
/// joined with `\n` and the document has no trailing newline. The same entries
/// always render to the same bytes.
pub fn render_masterplan(entries: &[BlockEntry]) -> String {
	let mut lines: Vec<String> = PREAMBLE.iter().map(ToString::to_string).collect();
	let mut current_major = None;

	for entry in entries {
		if current_major != Some(entry.key.major) {
			lines.push("---".to_string());
			lines.push(format!("### **Block Family {:02}**", entry.key.major));
			current_major = Some(entry.key.major);
		}

		lines.push(format!("- [{0}](./{0})", entry.file_name));
	}

	lines.extend(CLOSING.iter().map(ToString::to_string));
	lines.join("\n")
}

/// Regenerate the masterplan from the BLOCK documents in `root`.
///
/// The output file is overwritten unconditionally; it is never patched. With
/// `dry_run` the document is rendered into the report without touching disk.
pub fn rebuild_masterplan(
	root: &Path,
	config: &BlockdocConfig,
	dry_run: bool,
) -> BlockdocResult<MasterplanReport> {
	let scan = collect_block_entries(root)?;
	let content = render_masterplan(&scan.entries);
	let output = root.join(&config.masterplan.output);

	if dry_run {
		tracing::info!(path = %output.display(), entries = scan.entries.len(), "rendered masterplan (dry run)");
	} else {
		std::fs::write(&output, &content).map_err(|source| BlockdocError::WriteFile {
			path: output.display().to_string(),
			source,
		})?;
		tracing::info!(path = %output.display(), entries = scan.entries.len(), "rebuilt masterplan");
	}

	Ok(MasterplanReport {
		output,
		entries: scan.entries,
		skipped: scan.skipped,
		content,
		dry_run,
	})
}
