//! Core view use-case services.
//!
//! # Responsibility
//! - Turn query-engine results into per-view models.
//! - Keep CLI/presentation layers decoupled from catalog details.

pub mod content_service;
pub mod markdown;
pub mod views;
