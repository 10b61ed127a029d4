use std::io;

use crate::error::{DynError, Error, Kind};
use crate::field::Field;
use crate::location::Location;

// ── ResultExt — composition during propagation ────────────────────

/// Extension trait for composing an [`Error`] onto the error of any
/// `Result`.
///
/// The `Err` side is always present here, so these never hit the "absent
/// cause" rule and always produce an `Error`. The location records the
/// caller's file and line; the function name is not available this way
/// (use the macros where it matters).
///
/// ```
/// use errs::ResultExt;
///
/// fn port(s: &str) -> errs::Result<u16> {
///     s.parse::<u16>().wrap_err("bad port")
/// }
///
/// let err = port("http").unwrap_err();
/// assert!(err.to_string().starts_with("bad port: "));
/// assert!(errs::find::<std::num::ParseIntError>(&err).is_some());
/// ```
pub trait ResultExt<T> {
    /// Wrap the error; the cause stays reachable through `source()`.
    fn wrap_err(self, message: impl Into<String>) -> crate::Result<T>;

    /// Wrap the error with fields.
    fn wrap_err_with(self, message: impl Into<String>, fields: Vec<Field>) -> crate::Result<T>;

    /// Box the error; the cause is hidden from `source()`.
    fn box_err(self, message: impl Into<String>) -> crate::Result<T>;

    /// Box the error with fields.
    fn box_err_with(self, message: impl Into<String>, fields: Vec<Field>) -> crate::Result<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Box<DynError>>,
{
    #[track_caller]
    fn wrap_err(self, message: impl Into<String>) -> crate::Result<T> {
        let location = Location::caller();
        self.map_err(|e| Error::compose(location, e.into(), message.into(), Vec::new(), Kind::Wrapped))
    }

    #[track_caller]
    fn wrap_err_with(self, message: impl Into<String>, fields: Vec<Field>) -> crate::Result<T> {
        let location = Location::caller();
        self.map_err(|e| Error::compose(location, e.into(), message.into(), fields, Kind::Wrapped))
    }

    #[track_caller]
    fn box_err(self, message: impl Into<String>) -> crate::Result<T> {
        let location = Location::caller();
        self.map_err(|e| Error::compose(location, e.into(), message.into(), Vec::new(), Kind::Boxed))
    }

    #[track_caller]
    fn box_err_with(self, message: impl Into<String>, fields: Vec<Field>) -> crate::Result<T> {
        let location = Location::caller();
        self.map_err(|e| Error::compose(location, e.into(), message.into(), fields, Kind::Boxed))
    }
}

// ── Into<io::Error> ───────────────────────────────────────────────

impl From<Error> for io::Error {
    /// Wraps the error as a custom `io::Error` of kind `Other`.
    fn from(err: Error) -> Self {
        io::Error::other(err)
    }
}
