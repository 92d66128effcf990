//! Audit logging for payoff-cli
//!
//! Records create, update, and delete operations with before/after values
//! in an append-only, line-delimited JSON log. Storage and infrastructure
//! failures surface a generic message to the user; the detail lands here.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
