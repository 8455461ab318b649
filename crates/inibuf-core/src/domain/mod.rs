//! In-memory model of an INI document.
//!
//! This module has no file-system access.  It defines:
//!
//! - [`sniff`] – type inference from raw text.
//! - [`value`] – a stored value plus typed access to it.
//! - [`section`] – a named, key-ordered group of properties.

pub mod section;
pub mod sniff;
pub mod value;
