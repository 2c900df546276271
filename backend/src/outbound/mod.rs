//! Outbound adapters implementing the kitchen repository ports.
//!
//! - **memory**: mutex-guarded store for tests and database-less runs
//! - **persistence**: PostgreSQL repositories using Diesel
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
