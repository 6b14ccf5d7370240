//! Core types for Cornerstore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod status;
pub mod user;

pub use catalog::{Category, Product, ProductDraft};
pub use id::*;
pub use status::OrderStatus;
pub use user::User;
