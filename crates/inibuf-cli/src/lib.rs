//! inibuf-cli library crate.
//!
//! The `inibuf` binary is a thin shell around the functions in this crate so
//! that every command can be exercised from tests without spawning a process.
//!
//! ```text
//! inibuf (main.rs)        clap parsing, tracing setup, exit code
//!   └── application/      one function per subcommand + the benchmark loop
//!         └── domain/     serializable view of a loaded document
//!               └── inibuf-core
//! ```

/// Serializable views of store content.
pub mod domain;

/// Subcommand implementations.
pub mod application;
