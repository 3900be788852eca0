use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::BlockdocError;
use crate::BlockdocResult;
use crate::project::build_exclude_matcher;
use crate::references::Substitution;
use crate::references::SubstitutionTable;
use crate::version::is_block_document;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"blockdoc.toml",
	".blockdoc.toml",
	".config/blockdoc.toml",
];

/// Directory names skipped by every recursive walk unless overridden.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 2] = [".git", "node_modules"];

/// Name of the generated index document.
pub const DEFAULT_MASTERPLAN_OUTPUT: &str = "MASTERPLAN.md";

/// Footer appended to reviewed BLOCK documents. The leading line break leaves
/// a blank line between the document body and the horizontal rule.
pub const DEFAULT_FOOTER_TEXT: &str =
	"\n---\n\n**Version:** 1.0\n**Last Reviewed:** 2025-11-25\n**Reviewed By:** EWA";

/// Substrings of [`DEFAULT_FOOTER_TEXT`] that must all be present for the
/// footer to count as applied.
pub const DEFAULT_FOOTER_MARKERS: [&str; 2] =
	["**Reviewed By:** EWA", "**Last Reviewed:** 2025-11-25"];

/// The renaming table applied by `blockdoc refs`, in authored order. Later
/// rules see the output of earlier ones.
pub const DEFAULT_SUBSTITUTIONS: [(&str, &str); 31] = [
	("BLOCK4.2_", "BLOCK04.2_"),
	("BLOCK4.3_", "BLOCK04.3_"),
	("BLOCK4.4_", "BLOCK04.4_"),
	("BLOCK5.8_", "BLOCK05.8_"),
	("BLOCK6.1_", "BLOCK06.1_"),
	("BLOCK6.2_", "BLOCK06.2_"),
	("BLOCK6.3_", "BLOCK06.3_"),
	("BLOCK7_", "BLOCK07.0_"),
	("BLOCK8_READINESS", "BLOCK08.0_READINESS"),
	("BLOCK8_TRANSITION", "BLOCK08.0_TRANSITION"),
	("BLOCK8.7_", "BLOCK08.7_"),
	("BLOCK8.8_", "BLOCK08.8_"),
	("BLOCK9.0_", "BLOCK09.0_"),
	("BLOCK9.1_", "BLOCK09.1_"),
	("BLOCK9.2_", "BLOCK09.2_"),
	("BLOCK9.3_", "BLOCK09.3_"),
	("BLOCK9.4_", "BLOCK09.4_"),
	("BLOCK9.5_", "BLOCK09.5_"),
	("BLOCK9.6_", "BLOCK09.6_"),
	("BLOCK9.7_", "BLOCK09.7_"),
	("BLOCK9.8_", "BLOCK09.8_"),
	("BLOCK9.9_", "BLOCK09.9_"),
	("BLOCK_C_", "BLOCK10.10_"),
	(
		"BLOCK5_FINAL_DELIVERY_REPORT",
		"BLOCK05.8_FINAL_DELIVERY_REPORT",
	),
	("B120_ROADMAP_STAGE_VIII", "BLOCK12.0_ROADMAP_STAGE_VIII"),
	(
		"B131_ANNUAL_REPORT_TEMPLATE",
		"BLOCK13.1_ANNUAL_REPORT_TEMPLATE",
	),
	("B132_SYMPOSIUM_BLUEPRINT", "BLOCK13.2_SYMPOSIUM_BLUEPRINT"),
	("BLOCK10.1.1", "BLOCK10.11"),
	("BLOCK10.6.1", "BLOCK10.12"),
	("BLOCK12.2.1", "BLOCK12.3"),
	(
		"docs/governance/BLOCK_C_AUTONOMOUS_OPS.md",
		"docs/governance/BLOCK10.10_AUTONOMOUS_OPS.md",
	),
];

/// Configuration loaded from a `blockdoc.toml` file.
///
/// Every section is optional. Missing sections fall back to the built-in
/// defaults.
///
/// ```toml
/// [walk]
/// exclude_dirs = [".git", "node_modules", "target"]
/// patterns = ["drafts/", "*.generated.md"]
///
/// [footer]
/// text = "\n---\n\n**Version:** 2.0\n**Reviewed By:** QA"
/// markers = ["**Version:** 2.0", "**Reviewed By:** QA"]
///
/// [masterplan]
/// output = "INDEX.md"
///
/// [[substitutions]]
/// old = "BLOCK4.2_"
/// new = "BLOCK04.2_"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockdocConfig {
	/// Directory traversal settings shared by `footer` and `refs`.
	#[serde(default)]
	pub walk: WalkConfig,
	/// The footer block and the markers used to detect it.
	#[serde(default)]
	pub footer: FooterConfig,
	/// Masterplan output settings.
	#[serde(default)]
	pub masterplan: MasterplanConfig,
	/// Ordered literal substitutions. When present this replaces the built-in
	/// table entirely; entries are never merged.
	#[serde(default)]
	pub substitutions: Option<Vec<Substitution>>,
}

/// Controls which directories a recursive walk descends into.
#[derive(Debug, Clone, Deserialize)]
pub struct WalkConfig {
	/// Directory names that are never entered, wherever they appear.
	#[serde(default = "default_excluded_dirs")]
	pub exclude_dirs: Vec<String>,
	/// Gitignore-style patterns, relative to the root, applied on top of
	/// `exclude_dirs`. Supports negation (`!pattern`) and directory markers
	/// (trailing `/`).
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl Default for WalkConfig {
	fn default() -> Self {
		Self {
			exclude_dirs: default_excluded_dirs(),
			patterns: Vec::new(),
		}
	}
}

fn default_excluded_dirs() -> Vec<String> {
	DEFAULT_EXCLUDED_DIRS.iter().map(ToString::to_string).collect()
}

/// The footer appended by `blockdoc footer`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FooterConfig {
	/// Appended verbatim after the document body.
	#[serde(default = "default_footer_text")]
	pub text: String,
	/// Every marker must occur in a document for the footer to count as
	/// already applied.
	#[serde(default = "default_footer_markers")]
	pub markers: Vec<String>,
}

impl Default for FooterConfig {
	fn default() -> Self {
		Self {
			text: default_footer_text(),
			markers: default_footer_markers(),
		}
	}
}

fn default_footer_text() -> String {
	DEFAULT_FOOTER_TEXT.to_string()
}

fn default_footer_markers() -> Vec<String> {
	DEFAULT_FOOTER_MARKERS.iter().map(ToString::to_string).collect()
}

/// Settings for `blockdoc masterplan`.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterplanConfig {
	/// File name of the generated index, written to the root directory.
	#[serde(default = "default_masterplan_output")]
	pub output: String,
}

impl Default for MasterplanConfig {
	fn default() -> Self {
		Self {
			output: default_masterplan_output(),
		}
	}
}

fn default_masterplan_output() -> String {
	DEFAULT_MASTERPLAN_OUTPUT.to_string()
}

impl BlockdocConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load and validate the config from the first discovered config file at
	/// `root`. Returns `None` if no config file exists.
	pub fn load(root: &Path) -> BlockdocResult<Option<BlockdocConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		Ok(Some(config))
	}

	/// Like [`BlockdocConfig::load`], falling back to the built-in defaults
	/// when no config file exists.
	pub fn load_or_default(root: &Path) -> BlockdocResult<BlockdocConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Parse and validate config file contents.
	pub fn from_toml(content: &str) -> BlockdocResult<BlockdocConfig> {
		let config: BlockdocConfig =
			toml::from_str(content).map_err(|e| BlockdocError::ConfigParse(e.to_string()))?;
		config.validate()?;

		Ok(config)
	}

	/// The substitution table in effect: the configured one, or the built-in
	/// renaming table.
	pub fn substitution_table(&self) -> SubstitutionTable {
		match &self.substitutions {
			Some(entries) => SubstitutionTable::new(entries.clone()),
			None => SubstitutionTable::builtin(),
		}
	}

	/// Reject configurations that would make a batch misbehave instead of
	/// failing midway.
	pub fn validate(&self) -> BlockdocResult<()> {
		if let Some(entries) = &self.substitutions {
			if let Some(index) = entries.iter().position(|entry| entry.old.is_empty()) {
				return Err(BlockdocError::InvalidConfig(format!(
					"substitution #{} has an empty `old` string",
					index + 1
				)));
			}
		}

		if self.footer.text.trim().is_empty() {
			return Err(BlockdocError::InvalidConfig(
				"footer text must not be empty".to_string(),
			));
		}

		if self.footer.markers.is_empty() {
			return Err(BlockdocError::InvalidConfig(
				"at least one footer marker is required".to_string(),
			));
		}

		// A marker absent from the text would let the footer be appended on
		// every run.
		for marker in &self.footer.markers {
			if marker.is_empty() || !self.footer.text.contains(marker.as_str()) {
				return Err(BlockdocError::InvalidConfig(format!(
					"footer marker `{marker}` does not occur in the footer text"
				)));
			}

			// The footer is re-emitted with the document's line endings.
			if marker.contains(['\n', '\r']) {
				return Err(BlockdocError::InvalidConfig(format!(
					"footer marker `{}` must fit on a single line",
					marker.escape_debug()
				)));
			}
		}

		build_exclude_matcher(Path::new(""), &self.walk.patterns)?;

		let output = self.masterplan.output.as_str();
		if output.is_empty() || output.contains(['/', '\\']) || output == "." || output == ".." {
			return Err(BlockdocError::InvalidConfig(format!(
				"masterplan output `{output}` must be a plain file name"
			)));
		}

		// The rebuild would overwrite an input document and index itself.
		if is_block_document(output) {
			return Err(BlockdocError::InvalidConfig(format!(
				"masterplan output `{output}` must not be a BLOCK document name"
			)));
		}

		Ok(())
	}
}
