//! Content domain model shared by every view.
//!
//! # Responsibility
//! - Define the two content variants (articles and projects) as one sum type.
//! - Own per-item validation rules used when a catalog is assembled.
//!
//! # Invariants
//! - Every item is identified by a path-safe `ContentId`.
//! - Items are immutable once placed into a catalog.

pub mod content;
