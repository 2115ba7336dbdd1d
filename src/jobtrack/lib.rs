//! # Jobtrack Architecture
//!
//! Jobtrack keeps a list of job applications in a single JSON file. The library is
//! the whole product; the `jobtrack` binary is one client of it, and a desktop UI
//! is another (talking to [`bridge::Bridge`] over whatever IPC it has).
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients (jobtrack binary: cli/, a desktop UI over IPC)     │
//! │  - Parse input, render output, own stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  {operation, data}
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bridge (bridge.rs)                                         │
//! │  - Six named operations, untrusted JSON payloads            │
//! │  - Always answers with a value or {error, message, stack}   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  RecordStore (store/record_store.rs)                        │
//! │  - In-memory Vec<JobApplication>, newest first              │
//! │  - Write-then-commit on every mutation                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  StorageBackend (store/)                                    │
//! │  - FsBackend (atomic JSON file), MemBackend (tests)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`query`] and [`stats`] are read-only views over `RecordStore::list_all` used by
//! list and dashboard screens.
//!
//! ## No I/O Assumptions in Core
//!
//! From the bridge inward, code takes Rust values and returns `Result`s. It never
//! prints and never exits; logging goes through `tracing` and the binary decides
//! where it ends up.
//!
//! ## Module Overview
//!
//! - [`bridge`]: request dispatch and transport-safe errors
//! - [`store`]: record store and storage backends
//! - [`model`]: `JobApplication`, `JobStatus`, patches and timestamp format
//! - [`query`]: filtering and sorting for list views
//! - [`stats`]: dashboard summary
//! - [`config`]: `config.json` next to the database
//! - [`paths`]: data directory resolution
//! - [`logging`]: subscriber setup
//! - [`error`]: error types

pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod paths;
pub mod query;
pub mod stats;
pub mod store;
