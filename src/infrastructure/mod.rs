//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete storage backends behind the [`UrlRepository`] trait.
//!
//! [`UrlRepository`]: crate::domain::repositories::UrlRepository

pub mod persistence;
