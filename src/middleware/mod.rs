//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Bearer token extractors and the auth/admin guard middleware
//! - [`errors`]: Error logging and environment-aware error rendering
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. `AdminUser` additionally checks the admin policy
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AdminUser, AuthUser, OptionalAuthUser};
//!
//! // Any valid token
//! async fn me(auth_user: AuthUser) -> Json<Identity> {
//!     Json(auth_user.identity())
//! }
//!
//! // Token optional, never rejected
//! async fn sign(OptionalAuthUser(caller): OptionalAuthUser) -> impl IntoResponse {
//!     // ...
//! }
//! ```

pub mod auth;
pub mod errors;
