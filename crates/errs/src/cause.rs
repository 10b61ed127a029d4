//! Cause-identity traversal over `source()`.
//!
//! Errors built by `wrap!` expose their cause through `source()`; errors
//! built by `boxed!` do not. Walking `source()` therefore sees through any
//! number of wraps and stops at the first box.

use std::error::Error as StdError;

/// The error itself, then each `source()` in turn.
pub fn sources<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> + 'a {
    std::iter::successors(Some(err), |&e| e.source())
}

/// True if `err` or any of its sources is a `T` equal to `target`.
///
/// [`Error`](crate::Error) compares by identity, so for errors built by
/// this crate this asks "is `target` this very error, or its cause".
///
/// ```
/// let base = errs::new!("base").unwrap();
/// let wrapped = errs::wrap!(Some(base.clone()), "outer").unwrap();
/// let boxed = errs::boxed!(Some(base.clone()), "outer").unwrap();
///
/// assert!(errs::is(&wrapped, &base));
/// assert!(!errs::is(&boxed, &base));
/// ```
pub fn is<T>(err: &(dyn StdError + 'static), target: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    sources(err).any(|e| e.downcast_ref::<T>() == Some(target))
}

/// The first error in `err`'s sources that is a `T`.
pub fn find<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    sources(err).find_map(|e| e.downcast_ref::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn sources_through_wraps() {
        let e1 = crate::new!("one");
        let e2 = crate::wrap!(e1, "two");
        let e3 = crate::wrap!(e2, "three").unwrap();

        let messages: Vec<String> = sources(&e3).map(|e| e.to_string()).collect();
        assert_eq!(messages, ["three: two: one", "two: one", "one"]);
    }

    #[test]
    fn sources_stop_at_box() {
        let e1 = crate::new!("one");
        let e2 = crate::boxed!(e1, "two");
        let e3 = crate::wrap!(e2, "three").unwrap();

        assert_eq!(sources(&e3).count(), 2);
    }

    #[test]
    fn is_matches_self() {
        let e = crate::new!("self").unwrap();
        assert!(is(&e, &e));
    }

    #[test]
    fn is_through_many_wraps() {
        let base = crate::new!("base").unwrap();
        let mut err = base.clone();
        for i in 0..10 {
            err = crate::wrap!(Some(err), format!("layer {}", i)).unwrap();
        }
        assert!(is(&err, &base));
    }

    #[test]
    fn is_does_not_match_lookalike() {
        let base = crate::new!("base").unwrap();
        let lookalike = crate::new!("base").unwrap();
        let err = crate::wrap!(Some(base), "outer").unwrap();
        assert!(!is(&err, &lookalike));
    }

    #[test]
    fn find_foreign_cause() {
        let io_err = io::Error::new(io::ErrorKind::AddrInUse, "port taken");
        let err = crate::wrap!(Some(io_err), "bind failed").unwrap();

        let found = find::<io::Error>(&err);
        assert_eq!(found.map(io::Error::kind), Some(io::ErrorKind::AddrInUse));
    }

    #[test]
    fn sources_collect_as_references() {
        let e1 = crate::new!("one");
        let e2 = crate::wrap!(e1, "two").unwrap();

        let chain: Vec<&(dyn StdError + 'static)> = sources(&e2).collect();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].to_string(), "one");
    }

    #[test]
    fn found_cause_outlives_search() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = crate::wrap!(Some(io_err), "open failed").unwrap();

        let found: &io::Error = {
            let dyn_err: &(dyn StdError + 'static) = &err;
            match find::<io::Error>(dyn_err) {
                Some(found) => found,
                None => panic!("io::Error not found"),
            }
        };
        assert_eq!(found.kind(), io::ErrorKind::NotFound);
        assert_eq!(found.to_string(), "no such file");
    }

    #[test]
    fn is_through_boxed_dyn_cause() {
        let base = crate::new!("base").unwrap();
        let cause: Box<crate::DynError> = Box::new(base.clone());
        let err = crate::wrap!(Some(cause), "outer").unwrap();

        assert!(is(&err, &base));
        assert!(find::<crate::Error>(&err).is_some());
    }

    #[test]
    fn find_hidden_by_box() {
        let io_err = io::Error::new(io::ErrorKind::AddrInUse, "port taken");
        let err = crate::boxed!(Some(io_err), "bind failed").unwrap();
        assert!(find::<io::Error>(&err).is_none());
    }
}
