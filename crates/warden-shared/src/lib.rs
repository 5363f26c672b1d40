//! # Warden Shared
//!
//! Types shared between the HTTP layer and API clients: request/response
//! DTOs, the response envelope and the declarative validation rules that
//! guard every request body.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ApiResponse, ErrorResponse};
pub use validation::{Rules, ValidationFailure};
