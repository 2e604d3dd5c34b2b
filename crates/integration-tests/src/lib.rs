//! Integration tests for Flash Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations (VITRINE_DATABASE_URL must point at a running PostgreSQL)
//! cargo run -p flash-vitrine-cli -- migrate
//!
//! # Start the server
//! cargo run -p flash-vitrine-server
//!
//! # Run integration tests
//! cargo test -p flash-vitrine-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_auth` - Registration, login, logout, and session behavior
//! - `api_vitrines` - Vitrine CRUD, slug uniqueness, and the public page
//! - `api_products` - Product CRUD, ownership checks, and the per-vitrine cap
//!
//! All tests are marked `#[ignore]` because they need a running server and
//! database. Each test registers its own throwaway user, so tests do not
//! share state and can run in parallel.
//!
//! # Environment Variables
//!
//! - `VITRINE_BASE_URL` - Server base URL (defaults to `http://localhost:3000`)

#![cfg_attr(not(test), forbid(unsafe_code))]
