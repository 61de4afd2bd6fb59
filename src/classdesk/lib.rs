//! # ClassDesk Architecture
//!
//! ClassDesk is a **UI-agnostic classroom dashboard library**. The `classdesk` binary is one
//! client of it; a web view or a TUI could drive the same core.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, prompts for confirm    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Gates directory access behind the session                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Turns core outcomes into `CmdResult` + messages          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (directory, session, preferences, validate)           │
//! │  - Pure state transitions over an injected store            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KeyValueStore trait                             │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments and returns regular Rust types.
//! It never writes to stdout/stderr and never asks the user anything directly: the one
//! interactive step (confirming a delete) is injected by the caller as a closure.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Per-operation glue producing [`commands::CmdResult`]
//! - [`directory`]: The student directory (CRUD, search, id generation)
//! - [`session`]: Logged-in user, login/signup, page gate
//! - [`preferences`]: Compact layout and light/dark theme flags
//! - [`validate`]: Form validation and password strength
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod init;
pub mod model;
pub mod preferences;
pub mod session;
pub mod store;
pub mod validate;
