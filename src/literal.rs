use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::{MalformedLiteral, Reason};

const QUOTE: char = '"';
const BACKSLASH: char = '\\';

/// Number of characters in `line` exactly as written, delimiters and escapes included.
pub fn raw_length(line: &str) -> usize {
    line.chars().count()
}

/// Number of characters in the value a double-quoted literal represents.
///
/// The surrounding quotes count for nothing; `\"`, `\\` and `\xHH` each count as one
/// character. Anything that is not a well-formed literal is rejected with the column
/// (0-based, in characters) where scanning stopped.
pub fn decoded_length(line: &str) -> Result<usize, MalformedLiteral> {
    let chars: Vec<char> = line.chars().collect();
    let close = closing_quote(&chars)?;

    let mut pos = 1;
    let mut count = 0;
    while pos < close {
        pos += item_width(&chars, pos, close)?;
        count += 1;
    }
    Ok(count)
}

/// Decode a double-quoted literal into the string it represents.
///
/// `\xHH` becomes the character with code point `0xHH`.
pub fn decode(line: &str) -> Result<String, MalformedLiteral> {
    decoded_length(line)?;
    // Both delimiters are a single ASCII byte once validated.
    let body = &line[1..line.len() - 1];
    let decoded = escape_regex().replace_all(body, |caps: &Captures<'_>| match &caps[0] {
        "\\\\" => BACKSLASH.to_string(),
        "\\\"" => QUOTE.to_string(),
        _ => {
            // Two hex digits never exceed 0xff.
            let code = caps[1]
                .chars()
                .filter_map(|c| c.to_digit(16))
                .fold(0u8, |n, d| n * 16 + d as u8);
            char::from(code).to_string()
        }
    });
    Ok(decoded.into_owned())
}

/// Quote `s` as a literal, escaping every `"` and `\`.
pub fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(QUOTE);
    for c in s.chars() {
        if c == QUOTE || c == BACKSLASH {
            out.push(BACKSLASH);
        }
        out.push(c);
    }
    out.push(QUOTE);
    out
}

/// Length of `encode(s)` without building it.
pub fn encoded_length(s: &str) -> usize {
    2 + s
        .chars()
        .map(|c| if c == QUOTE || c == BACKSLASH { 2 } else { 1 })
        .sum::<usize>()
}

fn escape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\\\\|\\"|\\x([[:xdigit:]]{2})"#).expect("escape pattern compiles")
    })
}

/// Index of the closing delimiter, after checking both delimiters are present.
fn closing_quote(chars: &[char]) -> Result<usize, MalformedLiteral> {
    if chars.len() < 2 {
        return Err(MalformedLiteral::new(Reason::TooShort, chars.len()));
    }
    if chars[0] != QUOTE {
        return Err(MalformedLiteral::new(Reason::MissingOpeningQuote, 0));
    }
    let close = chars.len() - 1;
    if chars[close] != QUOTE {
        return Err(MalformedLiteral::new(Reason::MissingClosingQuote, close));
    }
    Ok(close)
}

/// Raw width of the plain character or escape sequence starting at `pos`.
fn item_width(chars: &[char], pos: usize, close: usize) -> Result<usize, MalformedLiteral> {
    match chars[pos] {
        QUOTE => Err(MalformedLiteral::new(Reason::UnescapedQuote, pos)),
        BACKSLASH => {
            if pos + 1 >= close {
                return Err(MalformedLiteral::new(Reason::DanglingBackslash, pos));
            }
            match chars[pos + 1] {
                QUOTE | BACKSLASH => Ok(2),
                'x' => {
                    let hex_ok = pos + 3 < close
                        && chars[pos + 2].is_ascii_hexdigit()
                        && chars[pos + 3].is_ascii_hexdigit();
                    if hex_ok {
                        Ok(4)
                    } else {
                        Err(MalformedLiteral::new(Reason::BadHexEscape, pos))
                    }
                }
                other => Err(MalformedLiteral::new(Reason::UnknownEscape(other), pos)),
            }
        }
        _ => Ok(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_literal() {
        assert_eq!(raw_length(r#""""#), 2);
        assert_eq!(decoded_length(r#""""#).unwrap(), 0);
    }

    #[test]
    fn plain_literal() {
        assert_eq!(raw_length(r#""abc""#), 5);
        assert_eq!(decoded_length(r#""abc""#).unwrap(), 3);
    }

    #[test]
    fn escaped_quote() {
        let line = r#""aaa\"aaa""#;
        assert_eq!(raw_length(line), 10);
        assert_eq!(decoded_length(line).unwrap(), 7);
        assert_eq!(decode(line).unwrap(), "aaa\"aaa");
    }

    #[test]
    fn hex_escape() {
        let line = r#""\x27""#;
        assert_eq!(raw_length(line), 6);
        assert_eq!(decoded_length(line).unwrap(), 1);
        assert_eq!(decode(line).unwrap(), "'");
    }

    #[test]
    fn hex_escape_covers_full_byte_range() {
        assert_eq!(decode(r#""\x00\x7F\xff\xAb""#).unwrap(), "\u{0}\u{7f}\u{ff}\u{ab}");
    }

    #[test]
    fn escaped_backslash_followed_by_x_is_not_hex() {
        let line = r#""\\x27""#;
        assert_eq!(decoded_length(line).unwrap(), 4);
        assert_eq!(decode(line).unwrap(), "\\x27");
    }

    #[test]
    fn decode_length_matches_decoded_length() {
        for line in [r#""""#, r#""a\\b\"c\xffd""#, r#""\x41\x42""#, r#""héllo""#] {
            let n = decoded_length(line).unwrap();
            assert_eq!(decode(line).unwrap().chars().count(), n, "{line}");
            assert!(n <= raw_length(line));
        }
    }

    #[test]
    fn non_ascii_counts_characters() {
        assert_eq!(raw_length(r#""é""#), 3);
        assert_eq!(decoded_length(r#""é""#).unwrap(), 1);
    }

    #[test]
    fn rejects_short_and_undelimited() {
        assert_eq!(decoded_length("").unwrap_err().reason, Reason::TooShort);
        assert_eq!(decoded_length("\"").unwrap_err().reason, Reason::TooShort);
        assert_eq!(
            decoded_length("abc\"").unwrap_err().reason,
            Reason::MissingOpeningQuote
        );
        let err = decoded_length("\"abc").unwrap_err();
        assert_eq!(err.reason, Reason::MissingClosingQuote);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn rejects_bad_escapes() {
        let err = decoded_length(r#""ab\""#).unwrap_err();
        assert_eq!(err.reason, Reason::DanglingBackslash);
        assert_eq!(err.column, 3);

        let err = decoded_length(r#""\n""#).unwrap_err();
        assert_eq!(err.reason, Reason::UnknownEscape('n'));
        assert_eq!(err.column, 1);

        assert_eq!(
            decoded_length(r#""\x4""#).unwrap_err().reason,
            Reason::BadHexEscape
        );
        assert_eq!(
            decoded_length(r#""\xzz""#).unwrap_err().reason,
            Reason::BadHexEscape
        );
        assert_eq!(
            decoded_length(r#""a"b""#).unwrap_err().reason,
            Reason::UnescapedQuote
        );
    }

    #[test]
    fn decode_rejects_what_decoded_length_rejects() {
        assert_eq!(decode(r#""\q""#).unwrap_err().reason, Reason::UnknownEscape('q'));
    }

    #[test]
    fn encode_escapes_quotes_and_backslashes() {
        assert_eq!(encode(r#""""#), r#""\"\"""#);
        assert_eq!(encode(r#""aaa\"aaa""#), r#""\"aaa\\\"aaa\"""#);
        assert_eq!(encode(r#""\x27""#), r#""\"\\x27\"""#);
    }

    #[test]
    fn encoded_length_matches_encode() {
        for s in [r#""""#, r#""abc""#, r#""aaa\"aaa""#, r#""\x27""#, "plain", ""] {
            assert_eq!(encoded_length(s), encode(s).chars().count(), "{s}");
            assert!(encoded_length(s) >= raw_length(s) + 2);
        }
    }

    #[test]
    fn encoded_literal_decodes_back() {
        let s = r#""aaa\"aaa""#;
        assert_eq!(decode(&encode(s)).unwrap(), s);
    }
}
