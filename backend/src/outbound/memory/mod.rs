//! In-process adapters for the repository ports.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. State lives behind a `std::sync::Mutex` that is never held across
//! an `.await`.

mod file_repository;
mod user_repository;

pub use file_repository::InMemoryFileRepository;
pub use user_repository::InMemoryUserRepository;
