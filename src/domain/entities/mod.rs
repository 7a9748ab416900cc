//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation input
//! uses a separate struct (`NewUrlRecord`) so store-assigned fields (`id`,
//! `clicks`, timestamps) cannot be forged by callers.

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
