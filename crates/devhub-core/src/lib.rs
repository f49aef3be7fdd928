//! # DevHub Core
//!
//! Core types, errors, and utilities for the DevHub API.
//!
//! This crate provides foundational types used throughout the DevHub application:
//!
//! - [`errors`]: The closed application error taxonomy and its HTTP rendering
//! - [`environment`]: Deployment environment (production vs. development)
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use devhub_core::{AppError, Environment};
//!
//! let error = AppError::not_found("Meeting not found");
//! let (status, body) = error.render(Environment::Production);
//! assert_eq!(status.as_u16(), 404);
//! assert_eq!(body.error, "Meeting not found");
//! ```

pub mod environment;
pub mod errors;
pub mod serde;

// Re-export commonly used types at crate root
pub use environment::Environment;
pub use errors::{AppError, DatabaseError, ErrorBody, ErrorReport, FieldError};
