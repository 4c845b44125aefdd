//! Structured logging facility for storval
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use storval_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Validation entry points log at debug level; operational failures are
//! logged at error level with their stable `err.code`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
