use std::path::Path;
use std::path::PathBuf;
use std::process;

use blockdoc_cli::BlockdocCli;
use blockdoc_cli::Commands;
use blockdoc_cli::EnvCommands;
use blockdoc_cli::OutputFormat;
use blockdoc_core::BlockdocConfig;
use blockdoc_core::FileFailure;
use blockdoc_core::append_footers;
use blockdoc_core::rebuild_masterplan;
use blockdoc_core::rewrite_references;
use blockdoc_core::secrets::DEFAULT_SECRETS_EXAMPLE_FILE;
use blockdoc_core::secrets::write_secrets_example;
use blockdoc_core::settings::Settings;
use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "BLOCKDOC_LOG";

fn main() {
	let args = BlockdocCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Footer { dry_run }) => run_footer(&args, *dry_run),
		Some(Commands::Refs { dry_run, diff }) => run_refs(&args, *dry_run, *diff),
		Some(Commands::Masterplan { dry_run }) => run_masterplan(&args, *dry_run),
		Some(Commands::Env {
			command: EnvCommands::Check,
		}) => run_env_check(&args),
		Some(Commands::Env {
			command: EnvCommands::Example { output },
		}) => run_env_example(&args, output.as_deref()),
		None => {
			eprintln!("No subcommand specified. Run `blockdoc --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<blockdoc_core::BlockdocError>() {
			Ok(err) => {
				let report: miette::Report = (*err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log lines go to stderr so stdout only carries command results.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(format!("blockdoc_core={default_level}")));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &BlockdocCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &BlockdocCli) -> Result<BlockdocConfig, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = BlockdocConfig::load_or_default(&root)?;

	if args.verbose {
		match BlockdocConfig::resolve_path(&root) {
			Some(path) => eprintln!("Using config: {}", path.display()),
			None => eprintln!("Using built-in defaults (no blockdoc.toml found)"),
		}
	}

	Ok(config)
}

fn run_footer(args: &BlockdocCli, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(args)?;
	let report = append_footers(&root, &config, dry_run)?;

	if args.format == OutputFormat::Json {
		println!("{}", serde_json::to_string(&report)?);
		return Ok(());
	}

	print_failures(&report.failures, &root);

	if report.processed() == 0 {
		println!("No BLOCK documents found.");
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would append the footer to {} file(s):",
			report.appended.len()
		);
		print_paths(&report.appended, &root);
	} else if args.verbose {
		print_paths(&report.appended, &root);
	}

	println!(
		"{} {} appended, {} already present, {} failed.",
		colored!("Footer:", bold),
		report.appended.len(),
		report.already_present.len(),
		report.failures.len()
	);

	Ok(())
}

fn run_refs(
	args: &BlockdocCli,
	dry_run: bool,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(args)?;
	let report = rewrite_references(&root, &config, dry_run)?;

	if args.format == OutputFormat::Json {
		println!("{}", serde_json::to_string(&report)?);
		return Ok(());
	}

	print_failures(&report.failures, &root);

	if report.rewritten.is_empty() {
		println!("All references are already up to date.");
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would update references in {} file(s):",
			report.rewritten.len()
		);
	} else {
		println!(
			"Updated references in {} file(s).",
			report.rewritten.len()
		);
	}

	if dry_run || args.verbose || show_diff {
		for file in &report.rewritten {
			println!("  {}", make_relative(&file.path, &root));
			if show_diff {
				print_diff(&file.before, &file.after);
			}
		}
	}

	Ok(())
}

fn run_masterplan(args: &BlockdocCli, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(args)?;
	let report = rebuild_masterplan(&root, &config, dry_run)?;

	if args.format == OutputFormat::Json {
		println!("{}", serde_json::to_string(&report)?);
		return Ok(());
	}

	for name in &report.skipped {
		eprintln!(
			"{} `{name}` has no `BLOCK<major>.<minor>` version key and was left out of the index",
			colored!("warning:", yellow)
		);
	}

	if dry_run {
		println!("{}", report.content);
		return Ok(());
	}

	println!(
		"{} {} rebuilt: {} document(s) in {} block famil{}.",
		colored!("Masterplan:", bold),
		make_relative(&report.output, &root),
		report.entries.len(),
		report.family_count(),
		if report.family_count() == 1 { "y" } else { "ies" }
	);

	if args.verbose {
		for entry in &report.entries {
			println!("  {} {}", entry.key, entry.file_name);
		}
	}

	Ok(())
}

fn run_env_check(args: &BlockdocCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let settings = Settings::load(&root)?;

	if args.format == OutputFormat::Json {
		let output = serde_json::json!({
			"ok": true,
			"db_url": settings.db_url,
			"api_key": settings.masked_api_key(),
			"debug_mode": settings.debug_mode,
		});
		println!("{output}");
		return Ok(());
	}

	println!("{}", colored!("Settings are valid.", green));
	print_field("DB_URL", &settings.db_url);
	print_field("API_KEY", settings.masked_api_key());
	print_field("DEBUG_MODE", settings.debug_mode);

	Ok(())
}

fn run_env_example(
	args: &BlockdocCli,
	output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let path = root.join(output.unwrap_or_else(|| Path::new(DEFAULT_SECRETS_EXAMPLE_FILE)));
	write_secrets_example(&path)?;

	if args.format == OutputFormat::Json {
		let output = serde_json::json!({ "path": path.display().to_string() });
		println!("{output}");
	} else {
		println!("Wrote example secrets file: {}", path.display());
	}

	Ok(())
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("  {label:<12} {value}");
}

fn print_paths(paths: &[PathBuf], root: &Path) {
	for path in paths {
		println!("  {}", make_relative(path, root));
	}
}

/// Failed files are reported but never change the exit status.
fn print_failures(failures: &[FileFailure], root: &Path) {
	for failure in failures {
		eprintln!(
			"{} skipped {}: {}",
			colored!("error:", red),
			make_relative(&failure.path, root),
			failure.message
		);
	}
}

/// Print a unified diff between two strings, colorized.
fn print_diff(before: &str, after: &str) {
	let diff = TextDiff::from_lines(before, after);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("    {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("    {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
