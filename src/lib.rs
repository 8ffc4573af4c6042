//! Contract Ledger - contract lifecycle record-keeping API.
//!
//! Stores contracts with their payment installments, expenses, project
//! staffing, attachments, and derived milestone warnings behind a role-gated
//! HTTP API, alongside the master data those records reference.
//!
//! # Architecture layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the nested-sync algorithm
//! - **services**: Application use cases
//! - **infra**: Infrastructure concerns (database, cache, Unit of Work)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
