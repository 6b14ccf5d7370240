//! Types stored in the session.

pub mod session;

pub use session::{SessionCart, keys as session_keys};
