//! Subcommand implementations for the `inibuf` binary.
//!
//! Every function takes its inputs as plain values plus an output sink, so
//! `main.rs` only parses arguments and picks one.
//!
//! # Sub-modules
//!
//! - **`commands`**  – `check`, `get`, `set`, `erase`, `dump`: load a file,
//!   call one store operation, print or write the result.
//! - **`benchmark`** – the repeated load + write + clear timing loop behind
//!   `inibuf bench`.

pub mod benchmark;
pub mod commands;

pub use benchmark::{run_benchmark, BenchReport};
pub use commands::{check, dump, erase, get, open_store, set};
