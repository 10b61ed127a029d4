use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::field::Field;
use crate::location::Location;

/// Any error that can be a cause or a chain link.
pub type DynError = dyn StdError + Send + Sync + 'static;

/// Composable error with message, fields, location and chain.
///
/// Three semantic variants share one handle type:
///
/// - **Fundamental**: message, fields, location. No cause.
///
/// - **Wrapped**: a fundamental plus a cause. [`Error::cause`] and
///   `source()` return the cause, so cause-identity checks see through it.
///
/// - **Boxed**: identical to wrapped, except [`Error::cause`] and
///   `source()` return `None`. The cause is still rendered and still
///   appears in the chain.
///
/// Build errors with the [`new!`](crate::new), [`wrap!`](crate::wrap) and
/// [`boxed!`](crate::boxed) macros. They capture the caller's location.
///
/// Cloning is cheap and clones are the same error: equality is identity.
#[derive(Clone)]
pub struct Error {
    repr: Arc<Repr>,
}

enum Repr {
    Fundamental(Fundamental),
    Composed(Composed),
}

struct Composed {
    fundamental: Arc<Fundamental>,
    cause: Arc<DynError>,
    /// Own fundamental first, then ancestors, most recent first.
    chain: Vec<Arc<DynError>>,
    kind: Kind,
}

/// Which factory built an [`Error`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `new!`: a leaf error.
    Fundamental,
    /// `wrap!`: the cause is reachable through `source()`.
    Wrapped,
    /// `boxed!`: the cause is hidden from `source()`.
    Boxed,
}

/// Message, fields and location. The leaf of every error and the element
/// type of chains built by this crate.
struct Fundamental {
    message: String,
    fields: Vec<Field>,
    location: Location,
}

impl fmt::Display for Fundamental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            return Ok(());
        }
        f.write_str(&self.message)?;
        if self.fields.is_empty() {
            return Ok(());
        }
        f.write_str(" (")?;
        for (idx, field) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", field)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Fundamental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fundamental")
            .field("message", &self.message)
            .field("fields", &self.fields)
            .field("location", &self.location)
            .finish()
    }
}

impl StdError for Fundamental {}

// ── Constructors ──────────────────────────────────────────────────

impl Error {
    /// Build a fundamental error.
    ///
    /// Returns `None` if `message` is empty. Prefer [`new!`](crate::new).
    pub fn new(location: Location, message: impl Into<String>, fields: Vec<Field>) -> Option<Self> {
        let message = message.into();
        if message.is_empty() {
            tracing::trace!(
                target: "errs",
                function = location.function(),
                file = location.file(),
                line = location.line(),
                "empty message, no error built"
            );
            return None;
        }

        let err = Self {
            repr: Arc::new(Repr::Fundamental(Fundamental { message, fields, location })),
        };
        err.trace_built();
        Some(err)
    }

    /// Build an error wrapping `cause`. The cause stays reachable through
    /// [`Error::cause`] and `source()`.
    ///
    /// Returns `None` if `cause` is `None`, whatever the message. An empty
    /// message is allowed. Prefer [`wrap!`](crate::wrap).
    pub fn wrap<E>(
        location: Location,
        cause: Option<E>,
        message: impl Into<String>,
        fields: Vec<Field>,
    ) -> Option<Self>
    where
        E: Into<Box<DynError>>,
    {
        Self::compose_optional(location, cause, message.into(), fields, Kind::Wrapped)
    }

    /// Build an error boxing `cause`. The cause is rendered and chained but
    /// not reachable through [`Error::cause`] or `source()`.
    ///
    /// Returns `None` if `cause` is `None`, whatever the message. Prefer
    /// [`boxed!`](crate::boxed).
    pub fn boxed<E>(
        location: Location,
        cause: Option<E>,
        message: impl Into<String>,
        fields: Vec<Field>,
    ) -> Option<Self>
    where
        E: Into<Box<DynError>>,
    {
        Self::compose_optional(location, cause, message.into(), fields, Kind::Boxed)
    }

    fn compose_optional<E>(
        location: Location,
        cause: Option<E>,
        message: String,
        fields: Vec<Field>,
        kind: Kind,
    ) -> Option<Self>
    where
        E: Into<Box<DynError>>,
    {
        match cause {
            Some(cause) => Some(Self::compose(location, cause.into(), message, fields, kind)),
            None => {
                tracing::trace!(
                    target: "errs",
                    kind = ?kind,
                    function = location.function(),
                    file = location.file(),
                    line = location.line(),
                    "no cause, no error built"
                );
                None
            }
        }
    }

    pub(crate) fn compose(
        location: Location,
        cause: Box<DynError>,
        message: String,
        fields: Vec<Field>,
        kind: Kind,
    ) -> Self {
        debug_assert!(kind != Kind::Fundamental);

        let fundamental = Arc::new(Fundamental { message, fields, location });
        let cause: Arc<DynError> = Arc::from(cause);

        let mut chain: Vec<Arc<DynError>> = vec![fundamental.clone() as Arc<DynError>];
        match cause.downcast_ref::<Error>().and_then(Error::chain) {
            Some(links) => chain.extend(links),
            None => chain.push(Arc::clone(&cause)),
        }

        let err = Self {
            repr: Arc::new(Repr::Composed(Composed { fundamental, cause, chain, kind })),
        };
        err.trace_built();
        err
    }

    fn trace_built(&self) {
        let location = self.location();
        tracing::trace!(
            target: "errs",
            kind = ?self.kind(),
            function = location.function(),
            file = location.file(),
            line = location.line(),
            error = %self,
            "error built"
        );
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Error {
    #[inline]
    fn fundamental(&self) -> &Fundamental {
        match &*self.repr {
            Repr::Fundamental(fdm) => fdm,
            Repr::Composed(cmp) => &cmp.fundamental,
        }
    }

    /// Which factory built this error.
    #[inline]
    pub fn kind(&self) -> Kind {
        match &*self.repr {
            Repr::Fundamental(_) => Kind::Fundamental,
            Repr::Composed(cmp) => cmp.kind,
        }
    }

    /// This error's own message, without fields or cause.
    #[inline]
    pub fn message(&self) -> &str {
        &self.fundamental().message
    }

    /// This error's own fields, in insertion order. The cause's fields are
    /// not included.
    ///
    /// Returns a fresh `Vec`; changing it does not affect the error.
    pub fn fields(&self) -> Vec<Field> {
        self.fundamental().fields.clone()
    }

    /// Where this error (not its cause) was built.
    #[inline]
    pub fn location(&self) -> Location {
        self.fundamental().location
    }

    /// Errors leading to this one, this error first, most recent first.
    ///
    /// Each link renders only its own message and fields. Links built by
    /// this crate appear once each; a foreign cause ends the chain as a
    /// single link.
    ///
    /// `None` for errors built by `new!`: only composed errors have a chain.
    pub fn chain(&self) -> Option<Vec<Arc<DynError>>> {
        match &*self.repr {
            Repr::Fundamental(_) => None,
            Repr::Composed(cmp) => Some(cmp.chain.clone()),
        }
    }

    /// The immediate cause, if it may be unwrapped.
    ///
    /// `Some` only for errors built by `wrap!`. Boxed errors keep their
    /// cause for display and chain but return `None` here.
    pub fn cause(&self) -> Option<&DynError> {
        match &*self.repr {
            Repr::Composed(Composed { cause, kind: Kind::Wrapped, .. }) => Some(&**cause),
            _ => None,
        }
    }

    /// True if `target` is this error or is reachable from it through
    /// `source()`. See [`crate::is`].
    pub fn is<T>(&self, target: &T) -> bool
    where
        T: StdError + PartialEq + 'static,
    {
        crate::cause::is(self, target)
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause().map(|cause| cause as &(dyn StdError + 'static))
    }
}

// ── Display ───────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.repr {
            Repr::Fundamental(fdm) => fmt::Display::fmt(fdm, f),
            Repr::Composed(cmp) => {
                let fes = cmp.fundamental.to_string();
                let ces = cmp.cause.to_string();
                match (fes.is_empty(), ces.is_empty()) {
                    (true, true) => Ok(()),
                    (false, true) => f.write_str(&fes),
                    (true, false) => f.write_str(&ces),
                    (false, false) => write!(f, "{}: {}", fes, ces),
                }
            }
        }
    }
}

// ── Debug ─────────────────────────────────────────────────────────

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fdm = self.fundamental();
        let mut d = match self.kind() {
            Kind::Fundamental => f.debug_struct("Error::Fundamental"),
            Kind::Wrapped => f.debug_struct("Error::Wrapped"),
            Kind::Boxed => f.debug_struct("Error::Boxed"),
        };
        d.field("message", &fdm.message);
        if !fdm.fields.is_empty() {
            d.field("fields", &fdm.fields);
        }
        d.field("location", &format_args!("{}", fdm.location));
        if let Repr::Composed(cmp) = &*self.repr {
            d.field("cause", &format_args!("{}", cmp.cause));
            d.field("chain_len", &cmp.chain.len());
        }
        d.finish()
    }
}

// ── Identity ──────────────────────────────────────────────────────

impl PartialEq for Error {
    /// Two handles are equal if they are the same error.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.repr, &other.repr)
    }
}

impl Eq for Error {}
