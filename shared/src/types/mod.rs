//! Common type definitions shared across crates

pub mod response;

pub use response::{error_codes, ApiResponse, ErrorResponse, ResponseStatus};
