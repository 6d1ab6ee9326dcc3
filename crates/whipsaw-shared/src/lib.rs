//! # Whipsaw Shared
//!
//! Wire types shared between the API server and its clients.
//! Entity bodies come from `whipsaw-core`; this crate holds the request and
//! response envelopes around them.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
