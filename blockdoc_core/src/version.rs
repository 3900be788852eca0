use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Prefix shared by every versioned document name.
pub const BLOCK_PREFIX: &str = "BLOCK";

/// Extension of BLOCK documents.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// The `(major, minor)` ordering key encoded in a BLOCK document name.
///
/// Keys are derived from names on demand and never stored. The derived `Ord`
/// compares `major` first and `minor` second, numerically.
///
/// ```
/// use blockdoc_core::VersionKey;
///
/// let key = VersionKey::parse("BLOCK07.0_READINESS.md");
/// assert_eq!(key, Some(VersionKey::new(7, 0)));
/// assert_eq!(VersionKey::parse("BLOCK04.2_x.md"), VersionKey::parse("BLOCK4.2_y.md"));
/// assert_eq!(VersionKey::parse("BLOCKX.Y_notes.md"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VersionKey {
	pub major: u32,
	pub minor: u32,
}

fn version_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"^BLOCK([0-9]+)\.([0-9]+)").expect("version key pattern is a valid regex")
	})
}

impl VersionKey {
	pub const fn new(major: u32, minor: u32) -> Self {
		Self { major, minor }
	}

	/// Parse the key from the start of a document name.
	///
	/// Returns `None` when the name does not start with
	/// `BLOCK<digits>.<digits>` or when either number does not fit in a `u32`.
	/// Callers must exclude such names from ordered output instead of
	/// substituting a default key.
	pub fn parse(name: &str) -> Option<Self> {
		let captures = version_pattern().captures(name)?;
		let major = captures.get(1)?.as_str().parse().ok()?;
		let minor = captures.get(2)?.as_str().parse().ok()?;

		Some(Self { major, minor })
	}
}

impl fmt::Display for VersionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}.{}", self.major, self.minor)
	}
}

/// Whether a file name follows the `BLOCK*.md` convention. This does not
/// require a parseable [`VersionKey`].
pub fn is_block_document(name: &str) -> bool {
	name.starts_with(BLOCK_PREFIX) && name.ends_with(MARKDOWN_EXTENSION)
}
