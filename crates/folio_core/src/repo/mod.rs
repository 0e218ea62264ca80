//! Content repository abstractions and the immutable catalog.
//!
//! # Responsibility
//! - Define the read-only contract query code depends on.
//! - Assemble validated catalogs from built-in or external content.
//!
//! # Invariants
//! - A catalog never holds two items with the same id.
//! - Catalog contents never change after construction.

pub mod catalog;
