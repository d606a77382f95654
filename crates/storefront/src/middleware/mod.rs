//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fills in the span field and echoes the header)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
