//! Conversions between typed field values and their stored text.
//!
//! Enumerations are stored as their symbolic names, booleans as
//! `true`/`false`, numbers in plain decimal form and dates in a per-type
//! chrono pattern.

use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::record::{FieldMap, RecordKind};

/// Declares a fieldless enum stored by its symbolic name.
///
/// Generates `as_str`, `ALL`, `NAMES`, `Display`, `FromStr` and a
/// `Serialize` that writes the symbolic name.
macro_rules! symbolic_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Every symbolic name, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            /// The symbolic name stored on disk.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "expected one of {}, got '{}'",
                        Self::NAMES.join("|"),
                        s
                    )),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

pub(crate) use symbolic_enum;

/// Returns the raw text of a required field.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the field is absent.
pub fn required<'a>(fields: &'a FieldMap, kind: RecordKind, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| malformed(kind, name, "is missing"))
}

/// Returns the text of a field, owned.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the field is absent.
pub fn text(fields: &FieldMap, kind: RecordKind, name: &str) -> Result<String> {
    required(fields, kind, name).map(str::to_string)
}

/// Parses a field with its `FromStr` implementation.
///
/// Covers integers, reals and symbolic enums.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the field is absent or unparseable.
pub fn parse<T>(fields: &FieldMap, kind: RecordKind, name: &str) -> Result<T>
where
    T: FromStr,
{
    let raw = required(fields, kind, name)?;
    raw.parse()
        .map_err(|_| malformed(kind, name, &format!("has unparseable value '{raw}'")))
}

/// Parses a boolean field.
///
/// Anything other than a case-insensitive `true` reads as `false`, matching
/// how the files have always been read.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the field is absent.
pub fn boolean(fields: &FieldMap, kind: RecordKind, name: &str) -> Result<bool> {
    required(fields, kind, name).map(|raw| raw.eq_ignore_ascii_case("true"))
}

/// Parses a date field in `pattern`.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the field is absent or does not
/// match the pattern.
pub fn date(
    fields: &FieldMap,
    kind: RecordKind,
    name: &str,
    pattern: &str,
) -> Result<NaiveDateTime> {
    let raw = required(fields, kind, name)?;
    NaiveDateTime::parse_from_str(raw, pattern)
        .map_err(|e| malformed(kind, name, &format!("has invalid date '{raw}': {e}")))
}

/// Formats a real number the way the files store it: always with a decimal
/// point, so `100` is written `100.0`.
///
/// # Examples
///
/// ```
/// use innkeep::record::value::format_real;
///
/// assert_eq!(format_real(100.0), "100.0");
/// assert_eq!(format_real(12.5), "12.5");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    format!("{value:?}")
}

fn malformed(kind: RecordKind, field: &str, reason: &str) -> Error {
    Error::MalformedRecord {
        kind,
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    symbolic_enum! {
        /// Test colours.
        pub enum Colour {
            /// Red.
            Red => "RED",
            /// Deep blue.
            DeepBlue => "DEEP_BLUE",
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_symbolic_enum() {
        assert_eq!(Colour::DeepBlue.as_str(), "DEEP_BLUE");
        assert_eq!("RED".parse::<Colour>().unwrap(), Colour::Red);
        assert!("red".parse::<Colour>().is_err());
        assert_eq!(Colour::NAMES, ["RED", "DEEP_BLUE"]);
        assert_eq!(Colour::ALL.len(), 2);
        assert_eq!(Colour::Red.to_string(), "RED");
    }

    #[test]
    fn test_symbolic_enum_serializes_as_name() {
        assert_eq!(
            serde_json::to_string(&Colour::DeepBlue).unwrap(),
            "\"DEEP_BLUE\""
        );
        assert_eq!(
            serde_json::to_value([Colour::Red]).unwrap(),
            serde_json::json!(["RED"])
        );
    }

    #[test]
    fn test_parse_numbers_and_enums() {
        let map = fields(&[("qty", "3"), ("price", "4.5"), ("colour", "RED")]);
        assert_eq!(parse::<i32>(&map, RecordKind::OrderMenuItem, "qty").unwrap(), 3);
        assert!((parse::<f64>(&map, RecordKind::MenuItem, "price").unwrap() - 4.5).abs() < f64::EPSILON);
        assert_eq!(
            parse::<Colour>(&map, RecordKind::Room, "colour").unwrap(),
            Colour::Red
        );
    }

    #[test]
    fn test_missing_and_unparseable_fields() {
        let map = fields(&[("qty", "many")]);
        let missing = parse::<i32>(&map, RecordKind::OrderMenuItem, "price").unwrap_err();
        assert!(format!("{missing}").contains("is missing"));

        let bad = parse::<i32>(&map, RecordKind::OrderMenuItem, "qty").unwrap_err();
        assert!(format!("{bad}").contains("unparseable value 'many'"));
    }

    #[test]
    fn test_boolean_is_lenient() {
        let map = fields(&[("a", "TRUE"), ("b", "false"), ("c", "yes")]);
        assert!(boolean(&map, RecordKind::Room, "a").unwrap());
        assert!(!boolean(&map, RecordKind::Room, "b").unwrap());
        assert!(!boolean(&map, RecordKind::Room, "c").unwrap());
    }

    #[test]
    fn test_date_patterns() {
        let expected = NaiveDate::from_ymd_opt(2099, 1, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();

        let map = fields(&[("checkInDate", "2099-01-01 0905"), ("created", "2099-01-01-9-5")]);
        assert_eq!(
            date(&map, RecordKind::Reservation, "checkInDate", "%Y-%m-%d %H%M").unwrap(),
            expected
        );
        assert_eq!(
            date(&map, RecordKind::RoomService, "created", "%Y-%m-%d-%-H-%-M").unwrap(),
            expected
        );
        assert!(date(&map, RecordKind::Reservation, "created", "%Y-%m-%d %H%M").is_err());
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(80.0), "80.0");
        assert_eq!(format_real(0.1), "0.1");
    }
}
