//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`catalog`] - `StubCatalog`, an in-process catalog service on a random port.
//! - [`domain`] - Builders for categories and products.
//! - [`config`] - Storefront configuration pointing at a stub catalog.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

pub mod catalog;
pub mod config;
pub mod domain;
