//! fintrack - Terminal-based personal finance tracker
//!
//! This library provides the core functionality for the fintrack
//! application. It records income and expense transactions per user,
//! tracks monthly category budgets, and reports totals, persisting
//! everything in a local SQLite database.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, transactions, budgets, money)
//! - `storage`: SQLite storage layer
//! - `services`: Business logic layer (auth, ledger, budgets)
//! - `backup`: Database backup management
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{paths::FintrackPaths, settings::Settings};
//!
//! let paths = FintrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinError, FinResult};
