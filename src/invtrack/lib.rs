//! # Invtrack Architecture
//!
//! Invtrack keeps an inventory table in a flat CSV file and records every
//! user action in a second, append-only CSV file. The crate is the data core;
//! the bundled binary is one UI over it, and a GUI would sit on the same API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, prints tables and messages             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the RecordStore, AuditTrail and SearchIndex         │
//! │  - Dispatches to commands                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validate, mutate, audit; return CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Storage (store/, codec.rs)  │  │  Audit (audit.rs)        │
//! │  inventory_data.csv          │  │  audit_log.csv           │
//! │  full rewrite per mutation   │  │  append only             │
//! └──────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Error handling
//!
//! - Malformed inventory rows are skipped on load; malformed audit lines
//!   are read back partially. Neither is an error.
//! - Validation and duplicate-id failures are returned before anything
//!   changes.
//! - A failed save is returned as [`error::InvError::Persistence`] with the
//!   change still applied in memory.
//! - Audit write failures are logged and swallowed.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade a UI holds
//! - [`commands`]: One module per user action
//! - [`store`]: In-memory collection plus storage backends
//! - [`codec`]: CSV line encoding for both files
//! - [`audit`]: The append-only action log
//! - [`search`]: Keyword filtering over the current records
//! - [`validation`]: Field checks for the entry form
//! - [`index`]: 1-based positions shown to users
//! - [`model`]: Records and audit entries
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod audit;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod search;
pub mod store;
pub mod validation;
