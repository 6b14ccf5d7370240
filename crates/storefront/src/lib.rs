//! Cornerstore storefront library.
//!
//! Session-scoped shopping cart, product view models and the JSON HTTP
//! surface over them, backed by a remote catalog service. Provided as a
//! library so it can be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
