//! The top-level configuration store.
//!
//! [`ConfigStore`] owns every section of a document, drives the line-by-line
//! parse on load, routes typed reads and writes to the right section, and
//! serializes the whole structure back to text.
//!
//! # Parsing
//!
//! Loading is a single sequential pass with no lookahead.  Each line is
//! classified by [`crate::format::line::classify`] and then applied to the
//! store immediately, so a failure on line *n* leaves every section and
//! property from lines `1..n` in place.  Loading into a store that already
//! holds data merges: nothing is cleared first.
//!
//! Re-opening a section that already exists (`[net]` twice, or
//! [`ConfigStore::add_empty_section`] on an existing name) merges into it
//! rather than replacing it.
//!
//! An empty header (`[]` or `[ ]`) creates the section named `""`, but no
//! parsed property can land in it: a `key = value` line that follows fails
//! with [`IniError::PropertyOutsideSection`].  Lines are decoded as UTF-8,
//! with invalid bytes replaced by U+FFFD.
//!
//! # Round-trip limits
//!
//! The text format has no quoting or escaping.  A store only reloads to
//! itself if every key and value survives [`crate::format::line::classify`]:
//!
//! - values containing `;`, `#` or a line break, or with leading/trailing
//!   white space, come back truncated or trimmed (or fail to parse);
//! - keys containing a space fail with [`IniError::InvalidKey`], and keys
//!   containing `=` are split at the first `=`;
//! - properties added to the section `""` fail with
//!   [`IniError::PropertyOutsideSection`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::section::Section;
use crate::domain::sniff::SniffMode;
use crate::domain::value::{FromValue, StringifiedValue, Value};
use crate::error::{IniError, Result};
use crate::format::line::{classify, key_has_space, Line};
use crate::format::{timestamp_now, write_header};
use crate::logging::{LogLevel, Logger, TracingLogger};

/// Fractional digits used for floats unless configured otherwise.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Tunables for a [`ConfigStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// How numeric text is validated during type inference.
    pub sniff_mode: SniffMode,
    /// Fractional digits written for float values added via `add_value`.
    pub float_precision: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            sniff_mode: SniffMode::Compatible,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

/// In-memory INI document: section name → [`Section`].
///
/// # Examples
///
/// ```rust
/// use inibuf_core::ConfigStore;
///
/// let mut store = ConfigStore::new();
/// store.load_str("[net]\nhost = localhost\nport = 8080\n").unwrap();
///
/// assert_eq!(store.get_value::<String>("net", "host").unwrap(), "localhost");
/// assert_eq!(store.get_value::<i32>("net", "port").unwrap(), 8080);
/// ```
pub struct ConfigStore {
    sections: BTreeMap<String, Section>,
    options: StoreOptions,
    logger: Box<dyn Logger>,
}

impl ConfigStore {
    /// Creates an empty store that logs through `tracing`.
    pub fn new() -> Self {
        Self {
            sections: BTreeMap::new(),
            options: StoreOptions::default(),
            logger: Box::new(TracingLogger),
        }
    }

    /// Replaces the logging collaborator.
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// Replaces the store options.
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Parses the file at `path` into the store.
    ///
    /// # Errors
    ///
    /// [`IniError::Io`] if the file cannot be opened or read, or any of the
    /// parse-time errors ([`IniError::MalformedSection`],
    /// [`IniError::PropertyOutsideSection`], [`IniError::InvalidKey`],
    /// [`IniError::MalformedLine`]) for the first offending line.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                let err = IniError::io(origin.as_str(), e);
                self.logger
                    .log(LogLevel::Warn, &format!("failed to load {origin}: {err}"));
                return Err(err);
            }
        };
        self.load_reader(BufReader::new(file), &origin)
    }

    /// Parses `text` into the store.
    ///
    /// # Errors
    ///
    /// Same parse-time errors as [`ConfigStore::load_file`].
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        self.load_reader(text.as_bytes(), "<string>")
    }

    /// Parses every line of `reader` into the store.
    ///
    /// `origin` names the source in log records and I/O errors.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::load_file`].
    pub fn load_reader<R: BufRead>(&mut self, reader: R, origin: &str) -> Result<()> {
        let result = self.parse_lines(reader, origin);
        match &result {
            Ok(()) => self.logger.log(
                LogLevel::Info,
                &format!("loaded {origin}: {} sections", self.sections.len()),
            ),
            Err(err) => self
                .logger
                .log(LogLevel::Warn, &format!("failed to load {origin}: {err}")),
        }
        result
    }

    fn parse_lines<R: BufRead>(&mut self, mut reader: R, origin: &str) -> Result<()> {
        let mut active: Option<String> = None;
        let mut buf = Vec::new();
        let mut line = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| IniError::io(origin, e))?;
            if read == 0 {
                return Ok(());
            }
            line += 1;
            let raw = decode_line(&buf);
            self.apply_line(&raw, line, &mut active)?;
        }
    }

    fn apply_line(&mut self, raw: &str, line: usize, active: &mut Option<String>) -> Result<()> {
        match classify(raw) {
            Line::Blank | Line::Comment => Ok(()),
            Line::SectionHeader(name) => {
                self.add_empty_section(name);
                self.logger
                    .log(LogLevel::Debug, &format!("line {line}: section [{name}]"));
                // `[]` exists as a section but cannot hold parsed properties.
                *active = (!name.is_empty()).then(|| name.to_string());
                Ok(())
            }
            Line::UnterminatedSection => Err(IniError::MalformedSection {
                line,
                reason: "missing closing ']'".to_string(),
            }),
            Line::Property { key, value } => {
                let section = active
                    .as_deref()
                    .ok_or(IniError::PropertyOutsideSection { line })?;
                if key_has_space(key) {
                    return Err(IniError::InvalidKey {
                        line,
                        key: key.to_string(),
                    });
                }
                self.insert_raw(section, key, value);
                Ok(())
            }
            Line::Invalid(content) => Err(IniError::MalformedLine {
                line,
                content: content.to_string(),
            }),
        }
    }

    // ── Writing ───────────────────────────────────────────────────────────────

    /// Writes the store to `path`, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// [`IniError::Io`] if the file cannot be created or written.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let target = path.display().to_string();
        let result = File::create(path)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                self.write_document(&mut writer, &timestamp_now())?;
                writer.flush()
            })
            .map_err(|e| IniError::io(target.as_str(), e));

        match &result {
            Ok(()) => self.logger.log(
                LogLevel::Info,
                &format!("wrote {target}: {} sections", self.sections.len()),
            ),
            Err(err) => self
                .logger
                .log(LogLevel::Warn, &format!("failed to write {target}: {err}")),
        }
        result
    }

    /// Writes the store, header included, to any sink.
    ///
    /// # Errors
    ///
    /// [`IniError::Io`] if the sink fails.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        self.write_document(sink, &timestamp_now())
            .map_err(|e| IniError::io("output sink", e))
    }

    /// Renders the store, header included, as a string.
    ///
    /// # Errors
    ///
    /// [`IniError::Io`] only if the rendered bytes are not UTF-8, which
    /// cannot happen for text that entered through this API.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| {
            IniError::io(
                "rendered document",
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })
    }

    fn write_document<W: Write>(&self, sink: &mut W, timestamp: &str) -> io::Result<()> {
        write_header(sink, timestamp)?;
        for section in self.sections.values() {
            section.write(sink)?;
        }
        Ok(())
    }

    // ── Typed access ──────────────────────────────────────────────────────────

    /// Reads `[section] key` as `T`.
    ///
    /// # Errors
    ///
    /// [`IniError::SectionNotFound`], [`IniError::KeyNotFound`],
    /// [`IniError::TypeMismatch`] or [`IniError::ParseFailure`].
    pub fn get_value<T: FromValue>(&self, section: &str, key: &str) -> Result<T> {
        self.require_section(section)?.get::<T>(key)
    }

    /// Raw text of `[section] key`, without any type check.
    ///
    /// # Errors
    ///
    /// [`IniError::SectionNotFound`] or [`IniError::KeyNotFound`].
    pub fn get_text(&self, section: &str, key: &str) -> Result<&str> {
        self.require_section(section)?.get_text(key)
    }

    /// The stored value of `[section] key`.
    ///
    /// # Errors
    ///
    /// [`IniError::SectionNotFound`] or [`IniError::KeyNotFound`].
    pub fn get_stored(&self, section: &str, key: &str) -> Result<&StringifiedValue> {
        self.require_section(section)?.value(key)
    }

    /// Stores `value` under `[section] key` in its canonical text form,
    /// creating the section if needed and overwriting an existing key.
    ///
    /// # Errors
    ///
    /// [`IniError::UnsupportedType`] if the value has no canonical text
    /// (non-finite floats).  The store is unchanged in that case.
    ///
    /// Keys and values are stored exactly as given and are not checked
    /// against the text format.  Anything listed under the module's
    /// round-trip limits is accepted here but does not read back unchanged
    /// after [`ConfigStore::write_file`] and [`ConfigStore::load_file`].
    pub fn add_value(&mut self, section: &str, key: &str, value: impl Into<Value>) -> Result<()> {
        let raw = value.into().stringify(self.options.float_precision)?;
        self.insert_raw(section, key, &raw);
        Ok(())
    }

    fn insert_raw(&mut self, section: &str, key: &str, raw: &str) {
        let value = StringifiedValue::with_mode(raw, self.options.sniff_mode);
        self.sections
            .entry(section.to_string())
            .or_insert_with(|| Section::new(section))
            .insert(key, value);
    }

    // ── Structure ─────────────────────────────────────────────────────────────

    /// Creates `name` if absent.  An existing section keeps its properties.
    pub fn add_empty_section(&mut self, name: &str) {
        self.sections
            .entry(name.to_string())
            .or_insert_with(|| Section::new(name));
    }

    /// Removes a whole section.  Absent sections are ignored.
    pub fn erase_section(&mut self, name: &str) {
        self.sections.remove(name);
    }

    /// Removes one property.  Absent sections or keys are ignored.
    pub fn erase_property(&mut self, section: &str, key: &str) {
        if let Some(section) = self.sections.get_mut(section) {
            section.erase_property(key);
        }
    }

    /// Removes every section.
    pub fn clear(&mut self) {
        let count = self.sections.len();
        self.sections.clear();
        self.logger
            .log(LogLevel::Debug, &format!("cleared {count} sections"));
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Sections in name order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn require_section(&self, name: &str) -> Result<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| IniError::SectionNotFound(name.to_string()))
    }
}

/// Strips the line terminator (`\n` or `\r\n`) and decodes the bytes.
///
/// Bytes that are not valid UTF-8 (Latin-1 or Windows-1252 text) become
/// U+FFFD instead of failing the load.
fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("sections", &self.sections)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
