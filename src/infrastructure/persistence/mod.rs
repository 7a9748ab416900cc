//! Repository implementations for URL record storage.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - PostgreSQL-backed storage, the production default
//! - [`MemoryUrlRepository`] - process-local storage for tests and
//!   database-less development runs

pub mod memory_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::MemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
