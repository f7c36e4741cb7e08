//! # strucbot-api
//!
//! Shared API types for the strucbot service.
//! This crate is designed to be WASM-compatible and can be used in both
//! the backend (Rust) and client applications.
//!
//! ## Features
//!
//! - Request DTOs (RegisterRequest, LoginRequest, etc.)
//! - Response DTOs (UserResponse, LoginResponse, SchemaRecord, etc.)
//! - Error response format (ErrorResponse)
//!
//! ## Example
//!
//! ```rust
//! use strucbot_api::LoginRequest;
//!
//! let request = LoginRequest {
//!     username: "admin".to_string(),
//!     password: "admin123".to_string(),
//! };
//! ```

pub mod error;
pub mod requests;
pub mod responses;
pub mod schema;

// Re-exports for convenient access
pub use error::ErrorResponse;
pub use requests::*;
pub use responses::*;
pub use schema::{ColumnDef, SchemaRecord};
