//! Cornerstore Core - Shared domain types.
//!
//! This crate provides the types shared by every Cornerstore component:
//! - `storefront` - Shopper-facing cart, catalog client and view models
//! - `integration-tests` - End-to-end tests against a stub catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. This keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, catalog entities, users and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
