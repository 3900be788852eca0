use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum BlockdocError {
	#[error(transparent)]
	#[diagnostic(code(blockdoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{path}`: {source}")]
	#[diagnostic(code(blockdoc::read_file))]
	ReadFile {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write `{path}`: {source}")]
	#[diagnostic(code(blockdoc::write_file))]
	WriteFile {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot read the root directory `{path}`: {source}")]
	#[diagnostic(
		code(blockdoc::unreadable_root),
		help("pass an existing directory with `--path`")
	)]
	UnreadableRoot {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(blockdoc::config_parse),
		help("check that blockdoc.toml is valid TOML with [walk], [footer], [masterplan] and/or [[substitutions]] entries")
	)]
	ConfigParse(String),

	#[error("invalid configuration: {0}")]
	#[diagnostic(code(blockdoc::invalid_config))]
	InvalidConfig(String),

	#[error("missing required setting `{0}`")]
	#[diagnostic(
		code(blockdoc::missing_setting),
		help("export `{0}` or add it to the `.env` file in the project root; run `blockdoc env example` for a template")
	)]
	MissingSetting(String),

	#[error("invalid value for setting `{name}`: {reason}")]
	#[diagnostic(code(blockdoc::invalid_setting))]
	InvalidSetting { name: String, reason: String },

	#[error("malformed `.env` line {line}: `{content}`")]
	#[diagnostic(
		code(blockdoc::dotenv_syntax),
		help("each line must be `KEY=VALUE`, a `# comment` or blank")
	)]
	DotenvSyntax { line: usize, content: String },
}

pub type BlockdocResult<T> = Result<T, BlockdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
