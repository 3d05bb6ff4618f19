//! # CLI Layer
//!
//! This module is **one possible UI client** for moviehub. It is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit` (via `main.rs`)
//! - Handles argument parsing
//! - Decides whether the user may add, edit or delete (`--admin`)
//!
//! ## Structure
//!
//! - `setup`: clap definitions and grouped help
//! - `commands`: `run()`, context setup and per-command handlers
//! - `print`: turns `CmdResult` data into terminal text
//! - `shell`: interactive session sharing one catalog across commands
//!
//! A one-shot invocation seeds a fresh store, so its changes end with the
//! process. `moviehub shell` keeps the store alive between commands.

mod commands;
mod print;
mod setup;
mod shell;

pub use commands::run;
