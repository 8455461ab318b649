//! # inibuf-core
//!
//! In-memory configuration store backed by the INI text format.
//!
//! A file is parsed into sections of key/value properties.  Every value is
//! kept as the text it was read from, together with a type inferred from that
//! text (string, int, float, bool or empty), so callers can ask for typed
//! values without declaring a schema.  The store serializes back to text in a
//! deterministic order.
//!
//! - **`domain`** – The document model: type inference ([`domain::sniff`]),
//!   stored values with typed access ([`domain::value`]) and sections
//!   ([`domain::section`]).  No I/O.
//!
//! - **`format`** – The text format: the single-line tokenizer and the header
//!   written at the top of every file.
//!
//! - **`store`** – [`ConfigStore`], which ties the two together and owns
//!   file loading and writing.
//!
//! - **`logging`** – The [`Logger`] collaborator the store reports through.
//!
//! ```rust
//! use inibuf_core::{ConfigStore, IniError};
//!
//! let mut store = ConfigStore::new();
//! store.load_str("[net]\nport = 8080\n").unwrap();
//! store.add_value("net", "secure", true).unwrap();
//!
//! assert!(store.get_value::<bool>("net", "secure").unwrap());
//! assert!(matches!(
//!     store.get_value::<String>("net", "port"),
//!     Err(IniError::TypeMismatch { .. })
//! ));
//! ```

pub mod domain;
pub mod error;
pub mod format;
pub mod logging;
pub mod store;

pub use domain::section::Section;
pub use domain::sniff::{infer, infer_with, DataType, SniffMode};
pub use domain::value::{FromValue, StringifiedValue, Value};
pub use error::{IniError, NumberParseError, Result};
pub use logging::{LogLevel, Logger, NullLogger, TracingLogger};
pub use store::{ConfigStore, StoreOptions, DEFAULT_FLOAT_PRECISION};
