//! A named group of properties.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::domain::value::{FromValue, StringifiedValue};
use crate::error::{IniError, Result};

/// A `[name]` block: properties keyed by name, kept in key order so that
/// serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    properties: BTreeMap<String, StringifiedValue>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the property `key` as `T`.
    ///
    /// # Errors
    ///
    /// [`IniError::KeyNotFound`] if the key is absent; otherwise whatever
    /// [`StringifiedValue::get`] reports.
    pub fn get<T: FromValue>(&self, key: &str) -> Result<T> {
        self.value(key)?.get::<T>()
    }

    /// Raw text of the property `key`, without any type check.
    ///
    /// # Errors
    ///
    /// [`IniError::KeyNotFound`] if the key is absent.
    pub fn get_text(&self, key: &str) -> Result<&str> {
        self.value(key).map(StringifiedValue::as_text)
    }

    /// The stored value for `key`.
    ///
    /// # Errors
    ///
    /// [`IniError::KeyNotFound`] if the key is absent.
    pub fn value(&self, key: &str) -> Result<&StringifiedValue> {
        self.properties.get(key).ok_or_else(|| IniError::KeyNotFound {
            section: self.name.clone(),
            key: key.to_string(),
        })
    }

    /// Inserts or overwrites `key` with `raw`, inferring its type.
    pub fn set(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.insert(key, StringifiedValue::new(raw));
    }

    /// Inserts or overwrites `key` with an already classified value.
    pub fn insert(&mut self, key: impl Into<String>, value: StringifiedValue) {
        self.properties.insert(key.into(), value);
    }

    /// Removes `key`.  Absent keys are ignored.
    pub fn erase_property(&mut self, key: &str) {
        self.properties.remove(key);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Property keys in serialization order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// `(key, value)` pairs in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StringifiedValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Writes `[name]`, one `key = value` line per property, then a blank line.
    pub fn write<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "[{}]", self.name)?;
        for (key, value) in &self.properties {
            writeln!(sink, "{} = {}", key, value.as_text())?;
        }
        writeln!(sink)
    }
}
