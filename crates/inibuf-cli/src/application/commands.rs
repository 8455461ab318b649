//! `check`, `get`, `set`, `erase` and `dump`.
//!
//! Write-back commands (`set`, `erase`) serialize the whole store, so the
//! output file gets a fresh header and loses the input's comments and
//! layout.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use inibuf_core::{ConfigStore, DataType, IniError, StoreOptions, Value};
use tracing::{debug, info};

use crate::domain::DocumentSnapshot;

/// Loads `path` into a fresh store configured with `options`.
pub fn open_store(path: &Path, options: StoreOptions) -> Result<ConfigStore> {
    let mut store = ConfigStore::new().with_options(options);
    store
        .load_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(store)
}

/// Prints a one-line summary followed by one line per section.
pub fn check<W: Write>(path: &Path, options: StoreOptions, out: &mut W) -> Result<()> {
    let store = open_store(path, options)?;
    let properties: usize = store.sections().map(|s| s.len()).sum();

    writeln!(
        out,
        "{}: {} section(s), {} propert{}",
        path.display(),
        store.len(),
        properties,
        if properties == 1 { "y" } else { "ies" }
    )?;
    for section in store.sections() {
        writeln!(out, "  [{}] {}", section.name(), section.len())?;
    }
    Ok(())
}

/// Prints `[section] key`, converted to `as_type` when given.
///
/// Without `as_type` the stored text is printed unchanged, which never
/// fails for an existing key.
pub fn get<W: Write>(
    path: &Path,
    section: &str,
    key: &str,
    as_type: Option<DataType>,
    options: StoreOptions,
    out: &mut W,
) -> Result<()> {
    let store = open_store(path, options)?;

    let text = match as_type {
        None => store.get_text(section, key)?.to_string(),
        Some(DataType::String) => store.get_value::<String>(section, key)?,
        Some(DataType::Int) => store.get_value::<i64>(section, key)?.to_string(),
        Some(DataType::Float) => store.get_value::<f64>(section, key)?.to_string(),
        Some(DataType::Bool) => store.get_value::<bool>(section, key)?.to_string(),
        Some(DataType::Empty) => {
            return Err(IniError::UnsupportedType(
                "an empty value cannot be requested explicitly".to_string(),
            )
            .into());
        }
    };

    writeln!(out, "{text}")?;
    Ok(())
}

/// Sets `[section] key` and writes the store to `output` (default: `path`).
///
/// A missing input file starts an empty store, so `set` can create files.
/// `value` is stored as given unless `as_type` asks for a conversion, in
/// which case the canonical form of that type is written.
pub fn set(
    path: &Path,
    section: &str,
    key: &str,
    value: &str,
    as_type: Option<DataType>,
    output: Option<&Path>,
    options: StoreOptions,
) -> Result<()> {
    let mut store = if path.exists() {
        open_store(path, options)?
    } else {
        debug!(path = %path.display(), "input does not exist, starting empty");
        ConfigStore::new().with_options(options)
    };

    let value = match as_type {
        Some(data_type) => Value::parse_as(value, data_type)
            .with_context(|| format!("cannot store {value:?} as {data_type}"))?,
        None => Value::from(value),
    };
    store.add_value(section, key, value)?;

    let target = output.unwrap_or(path);
    store
        .write_file(target)
        .with_context(|| format!("failed to write {}", target.display()))?;
    info!(section, key, target = %target.display(), "value stored");
    Ok(())
}

/// Erases `[section] key`, or the whole section when `key` is `None`, and
/// writes the store to `output` (default: `path`).
///
/// Erasing something that does not exist is not an error.
pub fn erase(
    path: &Path,
    section: &str,
    key: Option<&str>,
    output: Option<&Path>,
    options: StoreOptions,
) -> Result<()> {
    let mut store = open_store(path, options)?;

    match key {
        Some(key) => store.erase_property(section, key),
        None => store.erase_section(section),
    }

    let target = output.unwrap_or(path);
    store
        .write_file(target)
        .with_context(|| format!("failed to write {}", target.display()))?;
    info!(section, key = ?key, target = %target.display(), "erased");
    Ok(())
}

/// Prints the typed structure of `path` as pretty JSON.
pub fn dump<W: Write>(path: &Path, options: StoreOptions, out: &mut W) -> Result<()> {
    let store = open_store(path, options)?;
    let snapshot = DocumentSnapshot::capture(&store);
    serde_json::to_writer_pretty(&mut *out, &snapshot).context("failed to encode JSON")?;
    writeln!(out)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use inibuf_core::SniffMode;
    use std::fs;
    use std::path::PathBuf;

    /// Temporary directory removed on drop.
    struct Scratch {
        dir: PathBuf,
    }

    impl Scratch {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("inibuf_cli_{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        fn file(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.join(name);
            fs::write(&path, content).unwrap();
            path
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.join(name)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    const DOC: &str = "[net]\nhost = localhost\nport = 8080\nratio = 0.5\n\n\
                       [flags]\nverbose = True\n";

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ── check ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_check_prints_section_summary() {
        // Arrange
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        // Act
        let text = capture(|out| check(&path, StoreOptions::default(), out));

        // Assert
        assert!(text.contains("2 section(s), 4 properties"));
        assert!(text.contains("  [flags] 1\n"));
        assert!(text.contains("  [net] 3\n"));
    }

    #[test]
    fn test_check_reports_malformed_input() {
        let scratch = Scratch::new();
        let path = scratch.file("bad.ini", "[a]\njust text\n");

        let err = check(&path, StoreOptions::default(), &mut Vec::new()).unwrap_err();

        let root = err.downcast_ref::<IniError>().expect("root cause is an IniError");
        assert_eq!(root.line(), Some(2));
    }

    #[test]
    fn test_check_missing_file_is_an_error() {
        let scratch = Scratch::new();
        let err = check(
            &scratch.path("nope.ini"),
            StoreOptions::default(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("failed to load"));
    }

    // ── get ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_without_type_prints_raw_text() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        let text = capture(|out| get(&path, "net", "ratio", None, StoreOptions::default(), out));

        assert_eq!(text, "0.5\n");
    }

    #[test]
    fn test_get_typed_int() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        let text = capture(|out| {
            get(
                &path,
                "net",
                "port",
                Some(DataType::Int),
                StoreOptions::default(),
                out,
            )
        });

        assert_eq!(text, "8080\n");
    }

    #[test]
    fn test_get_type_mismatch_is_an_error() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        let err = get(
            &path,
            "net",
            "host",
            Some(DataType::Int),
            StoreOptions::default(),
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<IniError>(),
            Some(IniError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_get_missing_key_is_an_error() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        let err = get(
            &path,
            "net",
            "user",
            None,
            StoreOptions::default(),
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<IniError>(),
            Some(IniError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_get_empty_type_is_unsupported() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        let err = get(
            &path,
            "net",
            "host",
            Some(DataType::Empty),
            StoreOptions::default(),
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<IniError>(),
            Some(IniError::UnsupportedType(_))
        ));
    }

    // ── set ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_creates_missing_file() {
        // Arrange
        let scratch = Scratch::new();
        let path = scratch.path("new.ini");

        // Act
        set(
            &path,
            "app",
            "name",
            "demo",
            None,
            None,
            StoreOptions::default(),
        )
        .unwrap();

        // Assert
        let store = open_store(&path, StoreOptions::default()).unwrap();
        assert_eq!(store.get_value::<String>("app", "name").unwrap(), "demo");
    }

    #[test]
    fn test_set_typed_float_uses_configured_precision() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);
        let options = StoreOptions {
            float_precision: 2,
            ..StoreOptions::default()
        };

        set(
            &path,
            "net",
            "ratio",
            "0.127",
            Some(DataType::Float),
            None,
            options,
        )
        .unwrap();

        let store = open_store(&path, options).unwrap();
        assert_eq!(store.get_text("net", "ratio").unwrap(), "0.13");
    }

    #[test]
    fn test_set_to_output_leaves_input_untouched() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);
        let output = scratch.path("b.ini");

        set(
            &path,
            "net",
            "port",
            "9090",
            None,
            Some(&output),
            StoreOptions::default(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DOC);
        let store = open_store(&output, StoreOptions::default()).unwrap();
        assert_eq!(store.get_value::<i64>("net", "port").unwrap(), 9090);
        assert_eq!(store.get_text("net", "host").unwrap(), "localhost");
    }

    #[test]
    fn test_set_rejects_unconvertible_typed_value() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        let err = set(
            &path,
            "net",
            "port",
            "eighty",
            Some(DataType::Int),
            None,
            StoreOptions::default(),
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("cannot store"));
        assert_eq!(fs::read_to_string(&path).unwrap(), DOC);
    }

    // ── erase ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_erase_property_and_section() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        erase(&path, "net", Some("port"), None, StoreOptions::default()).unwrap();
        erase(&path, "flags", None, None, StoreOptions::default()).unwrap();

        let store = open_store(&path, StoreOptions::default()).unwrap();
        assert!(!store.contains_section("flags"));
        assert!(store.get_text("net", "port").is_err());
        assert_eq!(store.get_text("net", "host").unwrap(), "localhost");
    }

    #[test]
    fn test_erase_absent_target_still_writes() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);
        let output = scratch.path("out.ini");

        erase(&path, "ghost", None, Some(&output), StoreOptions::default()).unwrap();

        let store = open_store(&output, StoreOptions::default()).unwrap();
        assert_eq!(store.len(), 2);
    }

    // ── dump ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_dump_emits_json() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", DOC);

        let text = capture(|out| dump(&path, StoreOptions::default(), out));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["net"]["port"]["value"], 8080);
        assert_eq!(json["net"]["ratio"]["type"], "float");
        assert_eq!(json["flags"]["verbose"]["value"], true);
    }

    #[test]
    fn test_dump_strict_mode_changes_inferred_type() {
        let scratch = Scratch::new();
        let path = scratch.file("a.ini", "[v]\nversion = 1.2.3\n");
        let strict = StoreOptions {
            sniff_mode: SniffMode::Strict,
            ..StoreOptions::default()
        };

        let text = capture(|out| dump(&path, strict, out));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["v"]["version"]["type"], "string");
        assert_eq!(json["v"]["version"]["value"], "1.2.3");
    }
}
