//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with an evicting moka store)

pub mod session;

pub use session::{create_session_layer, session_store};
