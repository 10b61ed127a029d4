use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Anything that can be stored as a field value.
///
/// Blanket-implemented for every `Display + Send + Sync + 'static` type.
/// `Display` is the natural rendering; the render table overrides it for a
/// few known types (timestamps). Types with only `Debug` (`PathBuf`,
/// `Vec<T>`, `Option<T>`, `SystemTime`) go through [`Field::debug`].
pub trait Value: Any + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> Value for T
where
    T: Any + fmt::Display + Send + Sync,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A key/value pair attached to an error for diagnostics.
///
/// Immutable once built. Cloning shares the value; it is never copied.
///
/// ```
/// use errs::Field;
///
/// let field = Field::new("attempt", 3);
/// assert_eq!(field.key(), "attempt");
/// assert_eq!(field.downcast_ref::<i32>(), Some(&3));
///
/// let empty = Field::none("peer");
/// assert!(empty.value().is_none());
/// ```
#[derive(Clone)]
pub struct Field {
    key: Cow<'static, str>,
    value: Option<Arc<dyn Value>>,
}

/// A value rendered through its `Debug` output.
///
/// Built by [`Field::debug`]. [`Field::downcast_ref`] sees through it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Debugged<T>(pub T);

impl<T: fmt::Debug> fmt::Display for Debugged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Debugged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Field {
    /// A field rendered with `Display`. Use [`Field::debug`] for values
    /// that only implement `Debug`.
    pub fn new<V: Value>(key: impl Into<Cow<'static, str>>, value: V) -> Self {
        Self {
            key: key.into(),
            value: Some(Arc::new(value)),
        }
    }

    /// A field rendered with `Debug`.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use errs::Field;
    ///
    /// let field = Field::debug("path", PathBuf::from("/etc/app.toml"));
    /// assert_eq!(field.to_string(), r#"path="/etc/app.toml""#);
    /// assert_eq!(field.downcast_ref::<PathBuf>(), Some(&PathBuf::from("/etc/app.toml")));
    /// ```
    pub fn debug<V>(key: impl Into<Cow<'static, str>>, value: V) -> Self
    where
        V: fmt::Debug + Send + Sync + 'static,
    {
        Self::new(key, Debugged(value))
    }

    /// A field whose value is absent.
    pub fn none(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored value, by reference.
    #[inline]
    pub fn value(&self) -> Option<&dyn Value> {
        self.value.as_deref()
    }

    /// The stored value if it is a `T`, directly or through
    /// [`Field::debug`].
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any = self.value()?.as_any();
        any.downcast_ref::<T>()
            .or_else(|| any.downcast_ref::<Debugged<T>>().map(|d| &d.0))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, crate::render::value(self))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("value", &crate::render::value(self))
            .finish()
    }
}
