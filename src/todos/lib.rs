//! # Todos Architecture
//!
//! Todos is a small REST service for todo records kept in one JSON file.
//! The HTTP surface is the only client; everything beneath it is plain Rust
//! that knows nothing about requests or responses.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/, wired by main.rs)                       │
//! │  - Routing, request validation, response envelope           │
//! │  - The ONLY place that knows about status codes             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (service.rs)                                 │
//! │  - Generates ids and timestamps for new records             │
//! │  - Otherwise a pass-through to the store                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract TodoStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Store** (`store/record_store.rs`): uniqueness, merging, persistence
//!    and failure handling, against the in-memory backend. Most tests live here.
//! 2. **Service** (`service.rs`): generated fields and delegation.
//! 3. **HTTP** (`tests/api_tests.rs`): the router driven in-process, checking
//!    status codes and envelopes end to end.
//!
//! ## Module Overview
//!
//! - [`http`]: Router, handlers, response envelope, list cache, OpenAPI doc
//! - [`service`]: The service facade
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Todo`, `NewTodo`, `TodoPatch`)
//! - [`config`]: Server configuration
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
