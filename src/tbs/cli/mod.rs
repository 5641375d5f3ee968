//! # CLI Layer
//!
//! This module is the `tbs` binary's user interface. It is the **only** place
//! in the codebase that:
//! - Parses arguments (clap, with `THREEBLADES_*` environment fallbacks)
//! - Reads the config file and token into [`Settings`](tbs::config::Settings)
//! - Installs the tracing subscriber
//! - Writes to stdout and stderr
//!
//! ## Output Streams
//!
//! Rendered payloads go to stdout so they can be piped (`tbs server ls | jq`).
//! Command messages and logs go to stderr.
//!
//! ## Structure
//!
//! - `setup`: argument definitions and grouped help
//! - `commands`: `run()`, context setup and per-group dispatch
//! - `print`: message and payload output

mod commands;
mod print;
mod setup;

pub use commands::{report, run};
