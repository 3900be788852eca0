use std::path::Path;

use assert_cmd::Command;
use blockdoc_core::AnyEmptyResult;
use insta_cmd::get_cargo_bin;

pub fn blockdoc_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("blockdoc"));
	cmd.env("NO_COLOR", "1")
		.env_remove("BLOCKDOC_LOG")
		.env_remove("DB_URL")
		.env_remove("API_KEY")
		.env_remove("DEBUG_MODE");
	cmd
}

#[allow(dead_code)]
pub fn write(root: &Path, relative: &str, content: &str) -> AnyEmptyResult {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;

	Ok(())
}
