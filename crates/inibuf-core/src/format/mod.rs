//! The INI text format: line tokenizer and file header.
//!
//! Written files look like this:
//!
//! ```text
//! # Configuration File
//! # 2026/10/17 09:41:07
//!
//! [net]
//! host = localhost
//! port = 8080
//!
//! ```
//!
//! Sections appear in name order and properties in key order, so writing the
//! same store twice produces the same body.

pub mod line;

use std::io::{self, Write};

use chrono::Local;

pub use line::{classify, strip_comment, Line};

/// First line of every written file.
pub const BANNER: &str = "# Configuration File";

/// `strftime` pattern of the timestamp on the second header line.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Current local time as `YYYY/MM/DD hh:mm:ss`.
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Writes the two comment lines and the blank line that open a file.
pub fn write_header<W: Write>(sink: &mut W, timestamp: &str) -> io::Result<()> {
    writeln!(sink, "{BANNER}")?;
    writeln!(sink, "# {timestamp}")?;
    writeln!(sink)
}
