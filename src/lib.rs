//! payoff-cli - Debt payoff planning for envelope budgets
//!
//! This library implements the core of a debt payoff and credit-card payment
//! reconciliation engine for a zero-based (envelope) budget: it classifies
//! credit-card payments, records the paired budget transfer for each payment,
//! generates snowball/avalanche payoff plans, and tracks progress against the
//! active plan from live transaction data.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, budgets, debts, plans)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (classifier, transfer engine, payoff
//!   plan generator, progress tracker, plan lifecycle)
//! - `audit`: Append-only audit logging
//! - `cli`: Command handlers for the `payoff` binary
//! - `display`: Table rendering for CLI output
//!
//! # Example
//!
//! ```rust,ignore
//! use payoff::config::{paths::PayoffPaths, settings::Settings};
//!
//! let paths = PayoffPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::PayoffError;
