//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories for tests and database-less runs.
//! - **api_client**: reqwest client for the grocery REST API, used by the
//!   list controller.
//!
//! Adapters only translate between domain types and external
//! representations; they hold no business rules.

pub mod api_client;
pub mod memory;
pub mod persistence;
