//! Integration tests for loading and writing INI files through the public API.
//!
//! Each test works in its own directory under the system temp dir so tests
//! can run in parallel.

use std::fs;
use std::path::PathBuf;

use inibuf_core::{ConfigStore, DataType, IniError, NullLogger, Value};
use uuid::Uuid;

/// A scratch directory removed when dropped.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("inibuf_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("create scratch dir");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("write fixture");
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.dir).ok();
    }
}

fn store() -> ConfigStore {
    ConfigStore::new().with_logger(NullLogger)
}

#[test]
fn test_scenario_typed_reads_from_file() {
    // Arrange
    let scratch = Scratch::new();
    let path = scratch.write("net.ini", "[net]\nhost = localhost\nport = 8080\n");
    let mut ini = store();

    // Act
    ini.load_file(&path).expect("load");

    // Assert
    assert_eq!(ini.get_value::<String>("net", "host").unwrap(), "localhost");
    assert_eq!(ini.get_value::<i32>("net", "port").unwrap(), 8080);
}

#[test]
fn test_scenario_unterminated_section_fails_at_line_one() {
    let scratch = Scratch::new();
    let path = scratch.write("bad.ini", "[net\nhost=1\n");
    let mut ini = store();

    let err = ini.load_file(&path).unwrap_err();

    assert!(matches!(err, IniError::MalformedSection { line: 1, .. }));
    assert!(ini.is_empty());
}

#[test]
fn test_scenario_bool_survives_write_and_reload() {
    // Arrange
    let scratch = Scratch::new();
    let path = scratch.path("flags.ini");
    let mut ini = store();
    ini.add_value("s", "k", true).unwrap();

    // Act
    ini.write_file(&path).expect("write");
    let mut reloaded = store();
    reloaded.load_file(&path).expect("reload");

    // Assert
    assert!(reloaded.get_value::<bool>("s", "k").unwrap());
    assert_eq!(reloaded.get_text("s", "k").unwrap(), "true");
}

#[test]
fn test_scenario_property_outside_section() {
    let scratch = Scratch::new();
    let path = scratch.write("orphan.ini", "key = value\n[s]\n");

    let err = store().load_file(&path).unwrap_err();

    assert!(matches!(err, IniError::PropertyOutsideSection { line: 1 }));
}

#[test]
fn test_scenario_key_with_space() {
    let scratch = Scratch::new();
    let path = scratch.write("key.ini", "[s]\nmy key = 1\n");

    let err = store().load_file(&path).unwrap_err();

    assert!(matches!(err, IniError::InvalidKey { line: 2, .. }));
}

#[test]
fn test_write_then_load_preserves_structure() {
    // Arrange
    let scratch = Scratch::new();
    let path = scratch.path("full.ini");
    let mut original = store();
    original.add_value("03_strings", "key01", "some text").unwrap();
    original.add_value("04_integers", "key01", -12).unwrap();
    original.add_value("04_integers", "key02", 0).unwrap();
    original.add_value("05_floats", "key01", 3.5f64).unwrap();
    original.add_value("06_booleans", "key01", false).unwrap();
    original.add_value("07_empty", "key01", "").unwrap();
    original.add_empty_section("08_no_properties");

    // Act
    original.write_file(&path).expect("write");
    let mut reloaded = store();
    reloaded.load_file(&path).expect("reload");

    // Assert
    assert!(original.sections().eq(reloaded.sections()));
    assert_eq!(reloaded.get_value::<i64>("04_integers", "key01").unwrap(), -12);
    assert_eq!(reloaded.get_value::<f64>("05_floats", "key01").unwrap(), 3.5);
    assert_eq!(
        reloaded.get_stored("07_empty", "key01").unwrap().data_type(),
        DataType::Empty
    );
}

#[test]
fn test_written_file_layout() {
    // Arrange
    let scratch = Scratch::new();
    let path = scratch.path("layout.ini");
    let mut ini = store();
    ini.add_value("b", "y", 2).unwrap();
    ini.add_value("a", "x", 1).unwrap();

    // Act
    ini.write_file(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    // Assert
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Configuration File");
    assert!(lines[1].starts_with("# "));
    assert_eq!(lines[1].len(), 2 + "YYYY/MM/DD hh:mm:ss".len());
    assert_eq!(&lines[2..], &["", "[a]", "x = 1", "", "[b]", "y = 2", ""]);
}

#[test]
fn test_write_file_overwrites_previous_content() {
    let scratch = Scratch::new();
    let path = scratch.write("old.ini", "[stale]\nold = 1\n".repeat(50).as_str());
    let mut ini = store();
    ini.add_value("fresh", "new", 1).unwrap();

    ini.write_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale"));
}

#[test]
fn test_write_into_missing_directory_is_io_error() {
    let scratch = Scratch::new();
    let path = scratch.path("missing-dir").join("out.ini");

    let err = store().write_file(&path).unwrap_err();

    assert!(matches!(err, IniError::Io { .. }));
}

#[test]
fn test_typed_view_of_loaded_file() {
    let scratch = Scratch::new();
    let path = scratch.write(
        "types.ini",
        "[t]\ns = text\ni = 42\nf = 0.5\nb = False\ne =\nq = 3.14.15\n",
    );
    let mut ini = store();
    ini.load_file(&path).unwrap();

    let section = ini.section("t").unwrap();
    let typed: Vec<(&str, Option<Value>)> = section
        .iter()
        .map(|(key, value)| (key, value.typed().ok()))
        .collect();

    assert_eq!(
        typed,
        vec![
            ("b", Some(Value::Bool(false))),
            ("e", Some(Value::Empty)),
            ("f", Some(Value::Float(0.5))),
            ("i", Some(Value::Int(42))),
            ("q", None),
            ("s", Some(Value::String("text".to_string()))),
        ]
    );
}

#[test]
fn test_erase_then_write_drops_content() {
    let scratch = Scratch::new();
    let path = scratch.write("erase.ini", "[keep]\na = 1\nb = 2\n[drop]\nc = 3\n");
    let mut ini = store();
    ini.load_file(&path).unwrap();

    ini.erase_section("drop");
    ini.erase_property("keep", "a");
    ini.erase_property("keep", "not-there");
    ini.write_file(&path).unwrap();

    let mut reloaded = store();
    reloaded.load_file(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get_value::<i32>("keep", "b").unwrap(), 2);
    assert!(matches!(
        reloaded.get_value::<i32>("keep", "a"),
        Err(IniError::KeyNotFound { .. })
    ));
}
