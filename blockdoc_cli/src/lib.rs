use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Maintain versioned BLOCK documents: review footers, references and the masterplan \
	         index.",
	long_about = "blockdoc keeps a folder of versioned markdown documents named \
	              `BLOCK<major>.<minor>_<title>.md` consistent.\n\nEvery command is a \
	              best-effort batch: files that cannot be read or written are reported and \
	              skipped, and the command still exits successfully.\n\nQuick start:\n  \
	              blockdoc refs        Rewrite references after a renaming\n  blockdoc footer      \
	              Append the review footer\n  blockdoc masterplan  Rebuild MASTERPLAN.md"
)]
pub struct BlockdocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Output format for command results. Log lines always go to stderr.
	#[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Append the review footer to every BLOCK document.
	///
	/// Walks the project recursively for `BLOCK*.md` files, skipping `.git`
	/// and `node_modules`. Documents that already contain the footer markers
	/// are left untouched, so running the command twice is safe.
	Footer {
		/// Report which files would receive the footer without writing.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Rewrite references to renamed BLOCK documents.
	///
	/// Applies the ordered substitution table to every markdown file in the
	/// project. Each rule sees the output of the rules before it. Files are
	/// only written when their content changes.
	Refs {
		/// Report which files would change without writing.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a line diff for every changed file.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Regenerate the masterplan index from the BLOCK documents in the root.
	///
	/// Documents are sorted by version and grouped into one section per major
	/// version. The output file is rewritten from scratch on every run.
	Masterplan {
		/// Print the generated document instead of writing it.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Inspect the environment-derived application settings.
	Env {
		#[command(subcommand)]
		command: EnvCommands,
	},
}

#[derive(Subcommand)]
pub enum EnvCommands {
	/// Validate `DB_URL`, `API_KEY` and `DEBUG_MODE` from the environment and
	/// the project's `.env` file. Exits with a non-zero status when invalid.
	Check,
	/// Write an example secrets file listing every setting.
	Example {
		/// File to write, relative to the project root.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
