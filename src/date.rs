//! ISO 8601 calendar dates (`YYYY-MM-DD`) as used by record forms and storage.
//!
//! A record's date may be blank, since the date inputs on the record forms
//! can be cleared. Blank dates are kept as `None` and stored as `""`.

use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Today's date in UTC, the default date for new records.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Parse a `YYYY-MM-DD` string.
///
/// # Errors
///
/// Returns [Error::Validation] if `text` is not a valid calendar date.
pub fn parse_iso_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), ISO_DATE)
        .map_err(|_| Error::Validation(format!("\"{text}\" is not a valid date (YYYY-MM-DD)")))
}

/// Parse a date input that may have been left blank.
///
/// # Errors
///
/// Returns [Error::Validation] if `text` is neither blank nor a valid
/// calendar date.
pub fn parse_optional_iso_date(text: &str) -> Result<Option<Date>, Error> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    parse_iso_date(text).map(Some)
}

/// Format `date` as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

/// Format `date` as `YYYY-MM-DD`, or an empty string if there is no date.
pub fn format_optional_iso_date(date: Option<Date>) -> String {
    date.map(format_iso_date).unwrap_or_default()
}

/// Serde adapter for a record date that may be blank.
///
/// Blank, missing and unreadable dates all load as `None`, so one damaged
/// date never makes the rest of its collection unreadable.
pub(crate) mod optional_iso_date {
    use serde::{
        Deserialize, Deserializer, Serializer,
        de::{IntoDeserializer, value},
    };
    use time::Date;

    use super::iso_date;

    pub(crate) fn serialize<S: Serializer>(
        date: &Option<Date>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => iso_date::serialize(date, serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();

        if text.is_empty() {
            return Ok(None);
        }

        let text_deserializer: value::StrDeserializer<'_, value::Error> =
            text.as_str().into_deserializer();

        match iso_date::deserialize(text_deserializer) {
            Ok(date) => Ok(Some(date)),
            Err(error) => {
                tracing::warn!("Treating unreadable date {text:?} as blank: {error}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod date_tests {
    use serde::{Deserialize, Serialize};
    use time::{Date, macros::date};

    use crate::{
        Error,
        date::{
            format_iso_date, format_optional_iso_date, optional_iso_date, parse_iso_date,
            parse_optional_iso_date,
        },
    };

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_iso_date("2025-01-15"), Ok(date!(2025 - 01 - 15)));
    }

    #[test]
    fn rejects_invalid_dates() {
        for text in ["", "2025-13-01", "15/01/2025", "2025-02-30"] {
            assert!(
                matches!(parse_iso_date(text), Err(Error::Validation(_))),
                "want validation error for {text:?}"
            );
        }
    }

    #[test]
    fn blank_date_input_is_none() {
        assert_eq!(parse_optional_iso_date(""), Ok(None));
        assert_eq!(parse_optional_iso_date("  "), Ok(None));
        assert_eq!(
            parse_optional_iso_date("2025-01-15"),
            Ok(Some(date!(2025 - 01 - 15)))
        );
        assert!(parse_optional_iso_date("yesterday").is_err());
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_iso_date(date!(2025 - 03 - 07)), "2025-03-07");
        assert_eq!(format_optional_iso_date(Some(date!(2025 - 03 - 07))), "2025-03-07");
        assert_eq!(format_optional_iso_date(None), "");
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dated {
        #[serde(with = "optional_iso_date", default)]
        date: Option<Date>,
    }

    #[test]
    fn stored_dates_round_trip() {
        let dated = Dated {
            date: Some(date!(2025 - 01 - 15)),
        };

        let text = serde_json::to_string(&dated).unwrap();

        assert_eq!(text, r#"{"date":"2025-01-15"}"#);
        assert_eq!(serde_json::from_str::<Dated>(&text).unwrap(), dated);
    }

    #[test]
    fn blank_date_is_stored_as_empty_string() {
        let text = serde_json::to_string(&Dated { date: None }).unwrap();

        assert_eq!(text, r#"{"date":""}"#);
    }

    #[test]
    fn blank_missing_and_unreadable_dates_load_as_none() {
        for text in [
            r#"{"date":""}"#,
            r#"{"date":null}"#,
            r#"{}"#,
            r#"{"date":"15/01/2025"}"#,
        ] {
            assert_eq!(
                serde_json::from_str::<Dated>(text).unwrap(),
                Dated { date: None },
                "want {text} to load without a date"
            );
        }
    }
}
