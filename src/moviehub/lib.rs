//! # Moviehub Architecture
//!
//! Moviehub is a **UI-agnostic movie catalog library**. The terminal client in
//! `main.rs` is one consumer of it; a web or desktop front end would sit in the
//! same place and talk to the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints tables, owns the admin flag     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (id text → MovieId, genre → filter)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One flow per user action, returns CmdResult              │
//! │  - Form validation before drafts reach the controller       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Catalog State Controller (controller.rs)                   │
//! │  - Local snapshot + load state + current error              │
//! │  - Applies only mutations the store accepted                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Async RecordStore trait                                  │
//! │  - InMemoryStore: mock backend with simulated latency       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no process-wide state. A store is built explicitly, handed to a
//! controller, and lives as long as whoever owns that controller.
//!
//! ## Execution Model
//!
//! Everything runs on a single logical thread. Store calls are the only
//! suspension points: each one sleeps for its configured latency before it
//! touches the collection. Mutations issued concurrently against one store are
//! not serialized and may interleave (last writer wins).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user action
//! - [`controller`]: Client-side snapshot and load/error state
//! - [`filter`]: Pure derivations (search, genre list, sorting)
//! - [`store`]: Storage abstraction and the in-memory mock backend
//! - [`model`]: `Movie`, `MovieDraft`, `MovieId`
//! - [`seed`]: Built-in and file-based initial catalogs
//! - [`validation`]: Draft checks performed before submitting a form
//! - [`config`]: Configuration management
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod seed;
pub mod store;
pub mod validation;
