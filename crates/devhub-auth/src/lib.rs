//! # DevHub Auth
//!
//! Authentication types, JWT utilities and meeting SDK signatures for the
//! DevHub API.
//!
//! This crate provides:
//!
//! - [`claims`]: Access token claims and the per-request [`Identity`]
//! - [`jwt`]: Access token creation and verification
//! - [`signature`]: Signed tokens for the third-party meeting SDK
//!
//! Everything here is synchronous and takes its secrets as arguments, so the
//! HTTP layer and the CLI share one implementation.
//!
//! # Example
//!
//! ```ignore
//! use devhub_auth::{create_access_token, verify_token};
//! use devhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//!
//! let token = create_access_token("42", "user@example.com", None, &config)?;
//! let claims = verify_token(&token, &config)?;
//! println!("User ID: {}", claims.id);
//! ```

pub mod claims;
pub mod jwt;
pub mod signature;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity};
pub use jwt::{TokenError, create_access_token, encode_claims, verify_token};
pub use signature::{MeetingClaims, MeetingSignature, issue_meeting_signature};
