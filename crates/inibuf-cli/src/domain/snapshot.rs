//! JSON-friendly snapshot of a [`ConfigStore`].
//!
//! ```json
//! {
//!   "net": {
//!     "host": { "type": "string", "raw": "localhost", "value": "localhost" },
//!     "port": { "type": "int", "raw": "8080", "value": 8080 }
//!   }
//! }
//! ```
//!
//! `value` is `null` for empty values and for numeric text that does not
//! convert (`3.14.15`); `raw` always holds the stored text.

use std::collections::BTreeMap;

use inibuf_core::{ConfigStore, DataType, StringifiedValue, Value};
use serde::Serialize;

/// One property as it appears in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySnapshot {
    #[serde(rename = "type")]
    pub data_type: DataType,
    pub raw: String,
    pub value: Option<Value>,
}

impl From<&StringifiedValue> for PropertySnapshot {
    fn from(stored: &StringifiedValue) -> Self {
        Self {
            data_type: stored.data_type(),
            raw: stored.as_text().to_string(),
            value: stored.typed().ok(),
        }
    }
}

/// Section name → key → property, both levels in serialization order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DocumentSnapshot {
    pub sections: BTreeMap<String, BTreeMap<String, PropertySnapshot>>,
}

impl DocumentSnapshot {
    pub fn capture(store: &ConfigStore) -> Self {
        let sections = store
            .sections()
            .map(|section| {
                let properties = section
                    .iter()
                    .map(|(key, value)| (key.to_string(), PropertySnapshot::from(value)))
                    .collect();
                (section.name().to_string(), properties)
            })
            .collect();
        Self { sections }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
