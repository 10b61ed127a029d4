/// Build a fundamental error at the caller's location.
///
/// Evaluates to `Option<Error>`: `None` if the message is empty.
///
/// # Forms
///
/// ```ignore
/// // Message only:
/// new!("port already in use")
///
/// // Key => value fields:
/// new!("port already in use", "port" => 8080, "retries" => 3)
///
/// // Prebuilt fields:
/// new!("lookup failed", Field::new("host", host), Field::none("peer"))
/// ```
#[macro_export]
macro_rules! new {
    ($msg:expr $(,)?) => {
        $crate::Error::new($crate::location!(), $msg, ::std::vec::Vec::new())
    };

    ($msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::Error::new(
            $crate::location!(),
            $msg,
            ::std::vec![$($crate::Field::new($key, $value)),+],
        )
    };

    ($msg:expr, $($field:expr),+ $(,)?) => {
        $crate::Error::new($crate::location!(), $msg, ::std::vec![$($field),+])
    };
}

/// Build an error wrapping a cause, at the caller's location.
///
/// The cause is an `Option` of anything convertible into
/// `Box<dyn Error + Send + Sync>`. Evaluates to `Option<Error>`: `None` if
/// the cause is `None`. The cause stays reachable through `source()`.
///
/// ```ignore
/// wrap!(res.err(), "reading config")
/// wrap!(Some(io_err), "reading config", "path" => path.display().to_string())
/// ```
#[macro_export]
macro_rules! wrap {
    ($cause:expr, $msg:expr $(,)?) => {
        $crate::Error::wrap($crate::location!(), $cause, $msg, ::std::vec::Vec::new())
    };

    ($cause:expr, $msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::Error::wrap(
            $crate::location!(),
            $cause,
            $msg,
            ::std::vec![$($crate::Field::new($key, $value)),+],
        )
    };

    ($cause:expr, $msg:expr, $($field:expr),+ $(,)?) => {
        $crate::Error::wrap($crate::location!(), $cause, $msg, ::std::vec![$($field),+])
    };
}

/// Build an error boxing a cause, at the caller's location.
///
/// Same forms and absence rule as [`wrap!`], but the cause is hidden from
/// `source()`: identity checks across this error fail.
///
/// ```ignore
/// boxed!(res.err(), "storage unavailable")
/// ```
#[macro_export]
macro_rules! boxed {
    ($cause:expr, $msg:expr $(,)?) => {
        $crate::Error::boxed($crate::location!(), $cause, $msg, ::std::vec::Vec::new())
    };

    ($cause:expr, $msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::Error::boxed(
            $crate::location!(),
            $cause,
            $msg,
            ::std::vec![$($crate::Field::new($key, $value)),+],
        )
    };

    ($cause:expr, $msg:expr, $($field:expr),+ $(,)?) => {
        $crate::Error::boxed($crate::location!(), $cause, $msg, ::std::vec![$($field),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::{Error, Field, Kind};

    #[test]
    fn new_forms() {
        let e = new!("plain").unwrap();
        assert_eq!(e.to_string(), "plain");

        let e = new!("pairs", "a" => 1, "b" => "two",).unwrap();
        assert_eq!(e.to_string(), "pairs (a=1 b=two)");

        let key = String::from("dynamic");
        let e = new!("computed key", key.clone() => 3).unwrap();
        assert_eq!(e.fields()[0].key(), "dynamic");

        let e = new!("prebuilt", Field::new("a", 1), Field::none("b")).unwrap();
        assert_eq!(e.fields().len(), 2);
    }

    #[test]
    fn new_owned_message() {
        let port = 8080;
        let e = new!(format!("port {} in use", port)).unwrap();
        assert_eq!(e.message(), "port 8080 in use");
    }

    #[test]
    fn wrap_forms() {
        let base = new!("base");

        let e = wrap!(base.clone(), "plain").unwrap();
        assert_eq!(e.to_string(), "plain: base");

        let e = wrap!(base.clone(), "pairs", "a" => 1).unwrap();
        assert_eq!(e.to_string(), "pairs (a=1): base");

        let e = wrap!(base, "prebuilt", Field::new("a", 1)).unwrap();
        assert_eq!(e.kind(), Kind::Wrapped);
    }

    #[test]
    fn boxed_forms() {
        let base = new!("base");

        let e = boxed!(base.clone(), "plain").unwrap();
        assert_eq!(e.to_string(), "plain: base");

        let e = boxed!(base.clone(), "pairs", "a" => 1).unwrap();
        assert_eq!(e.to_string(), "pairs (a=1): base");

        let e = boxed!(base, "prebuilt", Field::new("a", 1)).unwrap();
        assert_eq!(e.kind(), Kind::Boxed);
    }

    #[test]
    fn cause_from_result() {
        fn parse(s: &str) -> Option<Error> {
            wrap!(s.parse::<u16>().err(), "bad port", "input" => s.to_string())
        }
        assert!(parse("8080").is_none());
        let e = parse("http").unwrap();
        assert!(e.to_string().starts_with("bad port (input=http): "), "got: {}", e);
        assert!(crate::find::<std::num::ParseIntError>(&e).is_some());
    }

    #[test]
    fn string_cause() {
        let e = wrap!(Some("disk full"), "write failed").unwrap();
        assert_eq!(e.to_string(), "write failed: disk full");
    }

    #[test]
    fn location_points_here() {
        let line = line!() + 1;
        let e = boxed!(new!("inner"), "outer").unwrap();
        assert_eq!(e.location().line(), line);
        assert_eq!(e.location().function(), "errs::macros::tests::location_points_here");
    }
}
