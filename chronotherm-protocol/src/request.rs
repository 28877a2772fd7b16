//! Request-line decoding
//!
//! One inbound connection carries one request line. Only lines starting with
//! the literal `GET /screen?` prefix carry an update; everything else decodes
//! to "no change". The query string is tokenized on `&` and `=` rather than
//! scanned for substrings, so `mode` only matches the key `mode`, not an
//! accidental `xmode`.

/// Request-line prefix that selects the screen endpoint
pub const REQUEST_PREFIX: &str = "GET /screen?";

/// Decoded update extracted from one request line
///
/// A `None` field means the key was absent and the current value is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenUpdate {
    /// New screen mode (0 = clock, anything else = temperature)
    pub mode: Option<i32>,
    /// New temperature reading in whole degrees
    pub temp: Option<i32>,
}

impl ScreenUpdate {
    /// True if the line carried neither key
    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.temp.is_none()
    }
}

/// Decode a request line into a [`ScreenUpdate`].
///
/// Returns `None` for any line that does not start with [`REQUEST_PREFIX`]
/// (wrong method, wrong path, garbage). Such requests are not errors; the
/// caller still answers them, it just has nothing to apply.
pub fn parse_request_line(line: &str) -> Option<ScreenUpdate> {
    let rest = line.strip_prefix(REQUEST_PREFIX)?;

    // The query runs up to the HTTP-version field (or end of line if the
    // client never sent one).
    let query = match rest.find(' ') {
        Some(idx) => &rest[..idx],
        None => rest,
    };

    let mut update = ScreenUpdate::default();
    for (key, value) in query_pairs(query) {
        match key {
            // First occurrence wins; later duplicates are ignored.
            "mode" if update.mode.is_none() => update.mode = Some(parse_decimal(value)),
            "temp" if update.temp.is_none() => update.temp = Some(parse_decimal(value)),
            _ => {}
        }
    }
    Some(update)
}

/// Split a query string into `(key, value)` pairs.
///
/// Pairs are separated by `&`, key and value by the first `=`. A pair with
/// no `=` yields an empty value. No percent-decoding: values are bare
/// integers on this wire.
fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query.split('&').map(|pair| match pair.find('=') {
        Some(idx) => (&pair[..idx], &pair[idx + 1..]),
        None => (pair, ""),
    })
}

/// Loose decimal conversion: optional sign, then leading digits.
///
/// Mirrors the tolerant parsing the wire has always had: trailing junk after
/// the digits is ignored (`"12ab"` → 12) and input with no leading digits at
/// all converts to 0 (`"abc"`, `""` → 0). Conversion failure is never an
/// error on this wire.
pub fn parse_decimal(s: &str) -> i32 {
    let bytes = s.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(i32::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_parameters() {
        let update = parse_request_line("GET /screen?mode=1&temp=72 HTTP/1.1").unwrap();
        assert_eq!(update.mode, Some(1));
        assert_eq!(update.temp, Some(72));
    }

    #[test]
    fn test_parameters_in_either_order() {
        let update = parse_request_line("GET /screen?temp=72&mode=1 HTTP/1.1").unwrap();
        assert_eq!(update.mode, Some(1));
        assert_eq!(update.temp, Some(72));
    }

    #[test]
    fn test_mode_only_leaves_temp_unset() {
        let update = parse_request_line("GET /screen?mode=0 HTTP/1.1").unwrap();
        assert_eq!(update.mode, Some(0));
        assert_eq!(update.temp, None);
    }

    #[test]
    fn test_temp_only_leaves_mode_unset() {
        let update = parse_request_line("GET /screen?temp=-40 HTTP/1.1").unwrap();
        assert_eq!(update.mode, None);
        assert_eq!(update.temp, Some(-40));
    }

    #[test]
    fn test_unrecognized_path_is_not_an_update() {
        assert_eq!(parse_request_line("GET /favicon.ico HTTP/1.1"), None);
        assert_eq!(parse_request_line("POST /screen?mode=1 HTTP/1.1"), None);
        assert_eq!(parse_request_line(""), None);
    }

    #[test]
    fn test_non_numeric_value_converts_to_zero() {
        let update = parse_request_line("GET /screen?temp=abc HTTP/1.1").unwrap();
        assert_eq!(update.temp, Some(0));
    }

    #[test]
    fn test_trailing_junk_after_digits_is_ignored() {
        assert_eq!(parse_decimal("12ab"), 12);
        assert_eq!(parse_decimal("-7x"), -7);
    }

    #[test]
    fn test_missing_http_version_still_parses() {
        let update = parse_request_line("GET /screen?mode=1&temp=23").unwrap();
        assert_eq!(update.mode, Some(1));
        assert_eq!(update.temp, Some(23));
    }

    #[test]
    fn test_exact_key_match_only() {
        // `xmode` must not be mistaken for `mode`
        let update = parse_request_line("GET /screen?xmode=5&temp=9 HTTP/1.1").unwrap();
        assert_eq!(update.mode, None);
        assert_eq!(update.temp, Some(9));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let update = parse_request_line("GET /screen?mode=1&mode=2 HTTP/1.1").unwrap();
        assert_eq!(update.mode, Some(1));
    }

    #[test]
    fn test_empty_query() {
        let update = parse_request_line("GET /screen? HTTP/1.1").unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_large_values_saturate() {
        assert_eq!(parse_decimal("99999999999999"), i32::MAX);
        assert_eq!(parse_decimal("-99999999999999"), i32::MIN + 1);
    }
}
