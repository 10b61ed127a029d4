//! Type-dispatched rendering of field values.
//!
//! Values render with `Display` unless their concrete type has an entry in
//! the render table. Timestamps are the only entries today: they render as
//! RFC 3339 with whole seconds, whether stored by value or behind a
//! reference (`&'static`, `Box`, `Arc`). A `SystemTime` stored through
//! `Field::debug` renders the same way, in UTC.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, TimeZone, Utc};

use crate::field::{Debugged, Field};

/// Text for an absent value.
pub(crate) const NONE: &str = "None";

type Render = fn(&dyn Any) -> Option<String>;

/// Render a field's value for an error message.
pub(crate) fn value(field: &Field) -> String {
    let Some(value) = field.value() else {
        return NONE.to_string();
    };
    let any = value.as_any();
    table()
        .get(&Any::type_id(any))
        .and_then(|render| render(any))
        .unwrap_or_else(|| value.to_string())
}

fn table() -> &'static HashMap<TypeId, Render> {
    static TABLE: OnceLock<HashMap<TypeId, Render>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        register_timestamps::<Utc>(&mut table);
        register_timestamps::<FixedOffset>(&mut table);
        register_timestamps::<Local>(&mut table);
        table.insert(TypeId::of::<Debugged<SystemTime>>(), rfc3339::<Debugged<SystemTime>>);
        table
    })
}

fn register_timestamps<Tz>(table: &mut HashMap<TypeId, Render>)
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: std::fmt::Display + Send + Sync,
{
    table.insert(TypeId::of::<DateTime<Tz>>(), rfc3339::<DateTime<Tz>>);
    table.insert(TypeId::of::<&'static DateTime<Tz>>(), rfc3339::<&'static DateTime<Tz>>);
    table.insert(TypeId::of::<Box<DateTime<Tz>>>(), rfc3339::<Box<DateTime<Tz>>>);
    table.insert(TypeId::of::<Arc<DateTime<Tz>>>(), rfc3339::<Arc<DateTime<Tz>>>);
}

fn rfc3339<T: Timestamp + 'static>(any: &dyn Any) -> Option<String> {
    any.downcast_ref::<T>().map(Timestamp::rfc3339)
}

/// A value that renders as an RFC 3339 timestamp.
trait Timestamp {
    fn rfc3339(&self) -> String;
}

impl<Tz> Timestamp for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fn rfc3339(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Timestamp for Debugged<SystemTime> {
    fn rfc3339(&self) -> String {
        DateTime::<Utc>::from(self.0).rfc3339()
    }
}

impl<T: Timestamp + ?Sized> Timestamp for &T {
    fn rfc3339(&self) -> String {
        (**self).rfc3339()
    }
}

impl<T: Timestamp + ?Sized> Timestamp for Box<T> {
    fn rfc3339(&self) -> String {
        (**self).rfc3339()
    }
}

impl<T: Timestamp + ?Sized> Timestamp for Arc<T> {
    fn rfc3339(&self) -> String {
        (**self).rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap()
    }

    #[test]
    fn natural_rendering() {
        assert_eq!(value(&Field::new("k", "value1")), "value1");
        assert_eq!(value(&Field::new("k", 1234)), "1234");
        assert_eq!(value(&Field::new("k", 12.34)), "12.34");
        assert_eq!(value(&Field::new("k", true)), "true");
        assert_eq!(value(&Field::new("k", String::from("owned"))), "owned");
    }

    #[test]
    fn absent_rendering() {
        assert_eq!(value(&Field::none("k")), NONE);
    }

    #[test]
    fn timestamp_by_value() {
        let ts = sample();
        assert_eq!(value(&Field::new("at", ts)), "2024-03-09T14:05:30Z");
        assert_ne!(value(&Field::new("at", ts)), ts.to_string());
    }

    #[test]
    fn timestamp_drops_subseconds() {
        let ts = sample() + Duration::milliseconds(250);
        assert_eq!(value(&Field::new("at", ts)), "2024-03-09T14:05:30Z");
    }

    #[test]
    fn timestamp_with_offset() {
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let ts = sample().with_timezone(&offset);
        assert_eq!(value(&Field::new("at", ts)), "2024-03-09T19:35:30+05:30");
    }

    #[test]
    fn timestamp_by_reference() {
        let ts = sample();
        assert_eq!(value(&Field::new("at", Arc::new(ts))), "2024-03-09T14:05:30Z");
        assert_eq!(value(&Field::new("at", Box::new(ts))), "2024-03-09T14:05:30Z");

        static FIXED: OnceLock<DateTime<Utc>> = OnceLock::new();
        let fixed: &'static DateTime<Utc> = FIXED.get_or_init(sample);
        assert_eq!(value(&Field::new("at", fixed)), "2024-03-09T14:05:30Z");
    }

    #[test]
    fn timestamp_with_negative_offset() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let ts = (sample() + Duration::milliseconds(999)).with_timezone(&offset);
        assert_eq!(value(&Field::new("at", ts)), "2024-03-09T07:05:30-07:00");
    }

    #[test]
    fn zero_offset_renders_z() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let ts = sample().with_timezone(&offset);
        assert_eq!(value(&Field::new("at", ts)), "2024-03-09T14:05:30Z");
    }

    #[test]
    fn local_timestamp_names_the_same_instant() {
        // The local offset depends on the host; the instant does not.
        let ts = (sample() + Duration::milliseconds(250)).with_timezone(&Local);
        let rendered = value(&Field::new("at", ts));
        let parsed = DateTime::parse_from_rfc3339(&rendered)
            .unwrap_or_else(|e| panic!("not RFC 3339: {} ({})", rendered, e));
        assert_eq!(parsed.with_timezone(&Utc), sample());
        assert!(!rendered.contains('.'), "expected whole seconds in: {}", rendered);
    }

    #[test]
    fn system_time_through_debug() {
        let at = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        assert_eq!(value(&Field::debug("at", at)), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn unregistered_wrapper_falls_back() {
        // Only the listed reference shapes are timestamps; anything else
        // keeps its Display output.
        let ts = sample();
        let wrapped = Arc::new(Box::new(ts));
        assert_eq!(value(&Field::new("at", wrapped)), ts.to_string());
    }
}
