//! # Middleware
//!
//! Axum middleware for request stamping and request/response logging.
//!
//! ## Modules
//!
//! - **[`mw_req_stamp`]**: Request ID stamping
//! - **[`mw_logging`]**: Structured request/response logging

// region: --- Modules
pub mod mw_req_stamp;
pub mod mw_logging;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_logging::log_requests;
// endregion: --- Re-exports
