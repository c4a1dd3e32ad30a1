//! # Stockroom Architecture
//!
//! Stockroom is a single-user inventory tracker that keeps product records
//! (SKU, name, quantity, price) in a spreadsheet file. Like any library with a
//! CLI client, the core knows nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, args.rs, wired by main.rs)                │
//! │  - Subcommands and the interactive menu                     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, normalizes input              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! │  - Query logic (filter, search) lives here                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, sheet.rs)                           │
//! │  - RecordStore: SKU map + insertion order, commit on save   │
//! │  - Reconciler: upsert-by-SKU for imports                    │
//! │  - TableBackend: spreadsheet file or memory                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Model
//!
//! The whole table is read at startup and the whole table is rewritten after
//! every mutation. Last writer wins; there is no locking and no journal.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic for each operation
//! - [`store`]: record store, reconciler and backends
//! - [`sheet`]: xlsx/csv codec for the product table
//! - [`model`]: `ProductRecord` and `ProductUpdate`
//! - [`config`]: `stockroom.json` settings
//! - [`logging`]: tracing subscriber setup for binaries
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod sheet;
pub mod store;
