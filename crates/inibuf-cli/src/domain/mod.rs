//! Serializable views of a loaded document.

pub mod snapshot;

pub use snapshot::{DocumentSnapshot, PropertySnapshot};
