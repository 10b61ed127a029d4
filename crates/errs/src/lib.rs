//! # errs — errors with context
//!
//! Errors that carry a message, key/value fields, the call site that built
//! them and, when composed, a chain of the composed messages.
//!
//! ## Design
//!
//! `Error` is a cheap, clonable handle with three semantic variants:
//!
//! - **Fundamental** (`new!`): a leaf error. Message, fields, location.
//!
//! - **Wrapped** (`wrap!`): a fundamental plus a cause. `source()` yields
//!   the cause, so identity checks see through it.
//!
//! - **Boxed** (`boxed!`): same shape as wrapped, but `source()` yields
//!   nothing. Identity checks stop here, which keeps internal causes out of
//!   a public API's error contract.
//!
//! Factories return `Option<Error>`: an empty message (`new!`) or an absent
//! cause (`wrap!`, `boxed!`) means "no error", not an error value.
//!
//! ## Quick Start
//!
//! ```rust
//! use errs::Error;
//!
//! #[derive(Debug, PartialEq)]
//! struct SomethingFailed;
//!
//! impl std::fmt::Display for SomethingFailed {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("something failed")
//!     }
//! }
//!
//! impl std::error::Error for SomethingFailed {}
//!
//! let err = errs::new!("error occurred", "temperature" => 10, "state" => "heating");
//! assert_eq!(
//!     err.map(|e| e.to_string()).as_deref(),
//!     Some("error occurred (temperature=10 state=heating)")
//! );
//!
//! let wrapped = errs::wrap!(Some(SomethingFailed), "error occurred").unwrap();
//! assert_eq!(wrapped.to_string(), "error occurred: something failed");
//! assert!(errs::is(&wrapped, &SomethingFailed));
//!
//! let boxed = errs::boxed!(Some(SomethingFailed), "error occurred").unwrap();
//! assert_eq!(boxed.to_string(), "error occurred: something failed");
//! assert!(!errs::is(&boxed, &SomethingFailed));
//!
//! assert!(errs::new!("").is_none());
//! assert!(errs::wrap!(None::<Error>, "error occurred").is_none());
//! ```
//!
//! ## Diagnostics
//!
//! Fields, locations and chains are for people reading failures. They are
//! not part of any compatibility guarantee and must not drive control flow.
//! Only the `Display` format and the wrapped/boxed cause behaviour are
//! stable.
//!
//! Construction emits `tracing` events at `TRACE` level under the `errs`
//! target. Nothing is emitted unless the application installs a subscriber.

mod field;
mod render;
pub mod location;
mod error;
#[macro_use]
mod macros;
mod cause;
mod convert;

// ── Public API ────────────────────────────────────────────────────

pub use field::{Debugged, Field, Value};
pub use location::Location;
pub use error::{DynError, Error, Kind};
pub use cause::{find, is, sources};
pub use convert::ResultExt;

/// Convenience Result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
