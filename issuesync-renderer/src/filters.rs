//! The `date` template filter.
//!
//! Patterns use Moment.js tokens because that is what issue templates in
//! the wild are written against:
//!
//! | Token  | Output            | Token  | Output              |
//! |--------|-------------------|--------|---------------------|
//! | `YYYY` | `2024`            | `HH`   | `09` (24h)          |
//! | `YY`   | `24`              | `H`    | `9`                 |
//! | `MMMM` | `January`         | `hh`   | `09` (12h)          |
//! | `MMM`  | `Jan`             | `h`    | `9`                 |
//! | `MM`   | `01`              | `mm`   | `05`                |
//! | `M`    | `1`               | `m`    | `5`                 |
//! | `DDDD` | `002` (day of yr) | `ss`   | `07`                |
//! | `DD`   | `02`              | `s`    | `7`                 |
//! | `Do`   | `2nd`             | `SSS`  | `042` (millis)      |
//! | `D`    | `2`               | `A`/`a`| `PM` / `pm`         |
//! | `dddd` | `Friday`          | `ZZ`   | `+0000`             |
//! | `ddd`  | `Fri`             | `Z`    | `+00:00`            |
//! | `dd`   | `Fr`              | `X`    | unix seconds        |
//! | `d`    | `5` (weekday)     | `x`    | unix milliseconds   |
//!
//! Text inside `[brackets]` is copied literally. All formatting is in UTC.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use minijinja::value::{Value, ValueKind};
use minijinja::{Error, ErrorKind};

/// Pattern used when the filter gets no argument.
pub const DEFAULT_PATTERN: &str = "YYYY-MM-DDTHH:mm:ssZ";

#[derive(Debug, Clone, Copy)]
enum Piece {
    Strftime(&'static str),
    Ordinal,
    MinWeekday,
    Millis,
}

// Longest tokens first within each shared prefix.
const TOKENS: &[(&str, Piece)] = &[
    ("YYYY", Piece::Strftime("%Y")),
    ("YY", Piece::Strftime("%y")),
    ("MMMM", Piece::Strftime("%B")),
    ("MMM", Piece::Strftime("%b")),
    ("MM", Piece::Strftime("%m")),
    ("M", Piece::Strftime("%-m")),
    ("DDDD", Piece::Strftime("%j")),
    ("DD", Piece::Strftime("%d")),
    ("Do", Piece::Ordinal),
    ("D", Piece::Strftime("%-d")),
    ("dddd", Piece::Strftime("%A")),
    ("ddd", Piece::Strftime("%a")),
    ("dd", Piece::MinWeekday),
    ("d", Piece::Strftime("%w")),
    ("HH", Piece::Strftime("%H")),
    ("H", Piece::Strftime("%-H")),
    ("hh", Piece::Strftime("%I")),
    ("h", Piece::Strftime("%-I")),
    ("mm", Piece::Strftime("%M")),
    ("m", Piece::Strftime("%-M")),
    ("ss", Piece::Strftime("%S")),
    ("s", Piece::Strftime("%-S")),
    ("SSS", Piece::Strftime("%3f")),
    ("A", Piece::Strftime("%p")),
    ("a", Piece::Strftime("%P")),
    ("ZZ", Piece::Strftime("%z")),
    ("Z", Piece::Strftime("%:z")),
    ("X", Piece::Strftime("%s")),
    ("x", Piece::Millis),
];

/// `{{ value | date }}` / `{{ value | date('YYYY-MM-DD') }}`.
///
/// `value` is a millisecond Unix timestamp or an RFC 3339 string. Undefined
/// and `none` render as the empty string.
pub fn date(value: Value, pattern: Option<&str>) -> Result<String, Error> {
    if value.is_undefined() || value.is_none() {
        return Ok(String::new());
    }
    let dt = to_datetime(&value)?;
    Ok(format_moment(&dt, pattern.unwrap_or(DEFAULT_PATTERN)))
}

fn to_datetime(value: &Value) -> Result<DateTime<Utc>, Error> {
    if let Some(s) = value.as_str() {
        return DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("date filter cannot parse '{s}': {e}"),
                )
            });
    }

    let millis = match value.kind() {
        ValueKind::Number => i64::try_from(value.clone())
            .ok()
            .or_else(|| f64::try_from(value.clone()).ok().map(|f| f.trunc() as i64)),
        _ => None,
    };
    millis
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("date filter expects a timestamp or RFC 3339 string, got {value}"),
            )
        })
}

/// Format `dt` with a Moment.js-style pattern.
pub fn format_moment(dt: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }
        if let Some((token, piece)) = TOKENS.iter().find(|(t, _)| rest.starts_with(t)) {
            push_piece(&mut out, dt, *piece);
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn push_piece(out: &mut String, dt: &DateTime<Utc>, piece: Piece) {
    match piece {
        Piece::Strftime(spec) => out.push_str(&dt.format(spec).to_string()),
        Piece::Ordinal => {
            let day = dt.day();
            out.push_str(&format!("{day}{}", ordinal_suffix(day)));
        }
        Piece::MinWeekday => {
            let name = dt.format("%a").to_string();
            out.extend(name.chars().take(2));
        }
        Piece::Millis => out.push_str(&dt.timestamp_millis().to_string()),
    }
}

fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // 2024-02-02T21:05:07.042Z, a Friday.
    const MILLIS: i64 = 1_706_907_907_042;

    fn fixed() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(MILLIS).single().unwrap()
    }

    #[rstest]
    #[case("YYYY", "2024")]
    #[case("YY", "24")]
    #[case("MMMM MMM MM M", "February Feb 02 2")]
    #[case("DDDD DD Do D", "033 02 2nd 2")]
    #[case("dddd ddd dd d", "Friday Fri Fr 5")]
    #[case("HH:mm:ss", "21:05:07")]
    #[case("h:m:s a", "9:5:7 pm")]
    #[case("hh A", "09 PM")]
    #[case("SSS", "042")]
    #[case("Z ZZ", "+00:00 +0000")]
    #[case("X", "1706907907")]
    #[case("x", "1706907907042")]
    #[case("[Week of] YYYY-MM-DD", "Week of 2024-02-02")]
    #[case("[YYYY", "[2024")]
    fn moment_tokens(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(format_moment(&fixed(), pattern), expected);
    }

    #[rstest]
    #[case(1, "st")]
    #[case(2, "nd")]
    #[case(3, "rd")]
    #[case(4, "th")]
    #[case(11, "th")]
    #[case(12, "th")]
    #[case(13, "th")]
    #[case(21, "st")]
    #[case(22, "nd")]
    #[case(31, "st")]
    fn ordinals(#[case] n: u32, #[case] suffix: &str) {
        assert_eq!(ordinal_suffix(n), suffix);
    }

    #[test]
    fn default_pattern_is_iso_with_offset() {
        let out = date(Value::from(MILLIS), None).unwrap();
        assert_eq!(out, "2024-02-02T21:05:07+00:00");
    }

    #[test]
    fn float_timestamps_are_truncated() {
        let out = date(Value::from(MILLIS as f64 + 0.9), Some("x")).unwrap();
        assert_eq!(out, MILLIS.to_string());
    }

    #[test]
    fn rfc3339_strings_are_accepted() {
        let out = date(Value::from("2023-12-31T23:30:00-01:00"), Some("YYYY-MM-DD")).unwrap();
        assert_eq!(out, "2024-01-01");
    }

    #[test]
    fn undefined_renders_empty() {
        assert_eq!(date(Value::UNDEFINED, Some("YYYY")).unwrap(), "");
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(date(Value::from("yesterday"), None).is_err());
        assert!(date(Value::from(true), None).is_err());
    }
}
