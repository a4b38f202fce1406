//! Error types for the Tribunal moderation bot.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tribunal_error::{ReportError, ReportErrorKind, TribunalResult};
//!
//! fn publish() -> TribunalResult<()> {
//!     Err(ReportError::new(ReportErrorKind::SummaryPublishFailed(
//!         "Missing Access".to_string(),
//!     )))?
//! }
//!
//! assert!(publish().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod platform;
mod report;

pub use config::ConfigError;
pub use error::{TribunalError, TribunalErrorKind, TribunalResult};
pub use http::HttpError;
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use report::{ReportError, ReportErrorKind, ReportResult};
