use std::path::Path;

use tempfile::TempDir;

use crate::AnyResult;

/// Create a temporary project with the given `(relative path, content)`
/// files. Parent directories are created as needed.
pub(crate) fn project_with_files(files: &[(&str, &str)]) -> AnyResult<TempDir> {
	let tmp = tempfile::tempdir()?;
	for (relative, content) in files {
		write_file(tmp.path(), relative, content)?;
	}

	Ok(tmp)
}

pub(crate) fn write_file(root: &Path, relative: &str, content: &str) -> AnyResult<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;

	Ok(())
}

pub(crate) fn read_file(root: &Path, relative: &str) -> AnyResult<String> {
	Ok(std::fs::read_to_string(root.join(relative))?)
}

/// The text a document ends with after the default footer is appended.
pub(crate) fn default_footer_suffix() -> String {
	format!("\n{}\n", crate::DEFAULT_FOOTER_TEXT)
}

pub(crate) fn sample_block_names() -> Vec<&'static str> {
	vec![
		"BLOCK2.1_intro.md",
		"BLOCK10.1_final.md",
		"BLOCK2.10_appendix.md",
	]
}
