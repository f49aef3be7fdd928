//! # DevHub CLI
//!
//! Development helpers that reuse the server's own token code:
//!
//! - [`commands::issue_token`]: signs an access token the auth guard accepts
//! - [`commands::sign_meeting`]: issues a meeting SDK signature, exactly as
//!   `POST /api/zoom/signature` would
//!
//! ## Usage
//!
//! ```bash
//! devhub-cli issue-token --id 42 --email ops@example.com --role admin
//! devhub-cli sign-meeting --meeting-number 85746065432 --role 1
//! ```

pub mod commands;
