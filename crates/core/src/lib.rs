//! Flash Vitrine Core - Shared types library.
//!
//! This crate provides common types used across all Flash Vitrine components:
//! - `server` - JSON API serving merchants and public storefront pages
//! - `cli` - Command-line tools for migrations and session maintenance
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, slugs, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
