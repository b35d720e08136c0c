//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: process-local repositories for development and tests.
//! - **security**: bcrypt password hashing and HS256 bearer tokens.
//! - **mail**: transactional mail delivery.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod mail;
pub mod memory;
pub mod persistence;
pub mod security;
