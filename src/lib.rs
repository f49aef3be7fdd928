//! # DevHub API
//!
//! HTTP backend for the DevHub platform, built with Rust and Axum.
//!
//! ## Overview
//!
//! - **Authentication**: HS256 JWT access tokens, verified per request
//! - **Admin access**: role claim or email allow-list, every grant audited
//! - **Meeting signatures**: short-lived tokens for the meeting web SDK
//! - **Uniform errors**: every failure answers `{ "error": ... }`
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Auth guards, error handling
//! ├── modules/          # Feature modules
//! │   ├── zoom/        # Meeting SDK signatures
//! │   ├── me/          # Current identity
//! │   ├── admin/       # Admin session check
//! │   └── health/      # Liveness probe
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Routes and layer stack
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Shared pieces live in workspace crates:
//!
//! - `devhub-core`: error taxonomy and environment
//! - `devhub-config`: configuration from environment variables
//! - `devhub-auth`: access tokens and meeting signatures
//! - `devhub-observability`: tracing setup and request logging
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `model.rs`: Request and response DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Request Pipeline
//!
//! ```text
//! request logger -> CORS -> error handler -> panic catcher -> auth guard -> handler
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! ZOOM_SDK_KEY=...
//! ZOOM_SDK_SECRET=...
//! ADMIN_EMAILS=ops@example.com
//! ENVIRONMENT=development
//! ```
//!
//! When the server is running, API documentation is available at:
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use devhub_auth;
pub use devhub_config;
pub use devhub_core;
pub use devhub_observability;
