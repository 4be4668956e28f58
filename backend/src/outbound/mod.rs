//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel
//! - **identity**: reqwest client for the external identity provider
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod identity;
pub mod persistence;
