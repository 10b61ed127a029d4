//! Call-site capture.
//!
//! A `Location` is the function, file and line that built an error:
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────┬────────┐
//! │  function                    │  file            │  line  │
//! │  my_app::store::open         │  src/store.rs    │  42    │
//! └──────────────────────────────┴──────────────────┴────────┘
//! ```
//!
//! The factory macros expand `location!()` at the caller, so the location
//! always names the caller's code and never this crate's internals.
//!
//! Entry points that are plain functions (`ResultExt`) use
//! [`Location::caller`], which knows file and line but not the function.
//! An empty function or a zero line means "unavailable".

use std::fmt;

/// Where an error was constructed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    function: &'static str,
    file: &'static str,
    line: u32,
}

impl Location {
    /// Location unavailable.
    pub const UNKNOWN: Location = Location::new("", "", 0);

    #[inline]
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self { function, file, line }
    }

    /// File and line of the caller of the enclosing `#[track_caller]`
    /// function. The function name is not available this way.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        let caller = std::panic::Location::caller();
        Self::new("", caller.file(), caller.line())
    }

    /// Fully qualified function path, e.g. `my_app::store::open`.
    #[inline]
    pub const fn function(&self) -> &'static str {
        self.function
    }

    #[inline]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// `(function, file, line)`.
    #[inline]
    pub const fn parts(&self) -> (&'static str, &'static str, u32) {
        (self.function, self.file, self.line)
    }

    /// True if nothing was captured.
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        self.function.is_empty() && self.file.is_empty() && self.line == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("<unknown>");
        }
        if !self.function.is_empty() {
            write!(f, "{} ", self.function)?;
        }
        write!(f, "({}:{})", self.file, self.line)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("function", &self.function)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish()
    }
}

/// Strip the marker item and closure segments from a `type_name` path.
#[doc(hidden)]
pub fn __function_path(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::__here").unwrap_or(raw);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Capture the current function, file and line as a [`Location`].
///
/// ```
/// let here = errs::location!();
/// assert!(here.function().contains("main"));
/// assert_eq!(here.file(), file!());
/// assert!(here.line() > 0);
/// ```
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(
            {
                fn __here() {}
                $crate::location::__function_path(::core::any::type_name_of_val(&__here))
            },
            file!(),
            line!(),
        )
    };
}
