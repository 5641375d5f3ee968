//! # tbs Architecture
//!
//! `tbs` is the command-line client for the 3Blades platform. Like most API
//! clients it is mostly glue: parse flags, build a request, call the API,
//! print the answer. Two pieces carry real decisions and are worth knowing
//! before touching anything else:
//!
//! - the **resolver** (`api::resolve`), which turns the names users type
//!   (`--name web`, `--project demo`) into the IDs every URL needs, and
//!   resolves the configured project at most once per invocation;
//! - the **renderer** (the `tbs-render` crate), which prints any payload as
//!   pretty JSON or as a table driven by a Go-style row template.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, loads Settings, initializes logging    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, resolve-then-act, best-effort bulk loops     │
//! │  - Returns CmdResult (messages + JSON payload)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api/)                                           │
//! │  - ApiClient: one typed method per endpoint + resolver      │
//! │  - ClientContext: namespace, project, memoized project ID   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Transport Layer (transport/)                               │
//! │  - Transport trait                                          │
//! │  - HttpTransport (production), MemoryTransport (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `commands` inward, code takes regular arguments and returns
//! `Result<CmdResult>`. It never prints and never reads the environment. The
//! one exception is `login`, which writes the token file it is handed.
//!
//! ## Testing Strategy
//!
//! 1. **Commands and API** run against `MemoryTransport`, which serves canned
//!    JSON per method and path and records every request. Tests assert on
//!    the requests sent (paths, query filters, bodies) as much as on results.
//! 2. **Config** tests use `tempfile` directories for the YAML file and the
//!    token file.
//! 3. **CLI** tests (`tests/`) run the binary with `assert_cmd` and a
//!    temporary `HOME`, covering argument parsing and local-only commands.
//!
//! ## Module Overview
//!
//! - [`api`]: `ApiClient`, `ClientContext`, `Selector`, resolver, endpoints
//! - [`commands`]: one function per CLI operation
//! - [`config`]: config file, token file, resolved `Settings`
//! - [`filters`]: `--filter` sets and list options
//! - [`models`]: request and response types
//! - [`transport`]: the network seam
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod transport;
