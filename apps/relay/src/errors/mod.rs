//! Error codes for the move relay.

pub mod error_code;

pub use error_code::ErrorCode;
