//! DevHub Observability Module
//!
//! Provides:
//! - Console, rolling-file and OpenTelemetry tracing setup
//! - HTTP request/response logging with sensitive field redaction
//! - In-memory log capture for tests (`test-utils` feature)
//!
//! File logging and the OTLP exporter are compiled in with the `observability`
//! feature. At runtime they can be switched off with `OBSERVABILITY_ENABLED=false`,
//! leaving console logging only.
//!
//! # Examples
//!
//! ```no_run
//! use devhub_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... application code ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
#[cfg(any(test, feature = "test-utils"))]
pub mod capture;
#[cfg(feature = "observability")]
pub mod logging;
pub mod redact;
pub mod request_log;

pub use basic_logging::init_basic_console_logging;
#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled, shutdown_tracer};
pub use redact::{REDACTED, redact_json};
pub use request_log::{RequestLogger, client_ip, log_requests};

// Console-only fallbacks when the exporters are not compiled in
#[cfg(not(feature = "observability"))]
pub mod stubs {
    pub fn is_observability_enabled() -> bool {
        false
    }

    pub fn init_tracing() {
        crate::basic_logging::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
