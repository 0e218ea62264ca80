//! Content query entry points.
//!
//! # Responsibility
//! - Expose lookup, filter, substring search, sort and relatedness over a
//!   borrowed item slice.
//! - Keep result shaping free of presentation concerns.

pub mod query;
