//! Concierge backend: user accounts, bearer-token sign-in, and file storage.
//!
//! The crate is laid out hexagonally. [`domain`] holds entities, ports and
//! services; [`inbound`] adapts HTTP requests onto driving ports; [`outbound`]
//! implements driven ports over PostgreSQL, in-memory maps, bcrypt, JWT and
//! the mail log.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
