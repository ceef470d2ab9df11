//! Core types for Storeboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod date;
pub mod id;
pub mod price;

pub use date::format_created_at;
pub use id::*;
pub use price::Price;
