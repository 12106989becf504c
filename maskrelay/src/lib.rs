//! `maskrelay`: a thin command-line wrapper around `maskrelay-core`.
//!
//! This crate carries no sanitization semantics of its own — argument
//! parsing, stdin/file I/O, and logger initialization only. See
//! `maskrelay-core` for the sanitization logic itself.
//! License: Apache-2.0

pub mod cli;
pub mod logger;
