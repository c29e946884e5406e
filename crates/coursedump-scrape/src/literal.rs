//! Script string-literal decoding.
//!
//! The viewer document's values are matched as raw quoted literals and need
//! unescaping before use. This is a dedicated decoder for exactly that job;
//! it understands both quote styles and the usual backslash escapes and
//! nothing else. In particular it never evaluates anything, which is what
//! makes the scraped values safe to use even if the source markup were
//! hostile.

use crate::ScrapeError;

/// Decode a quoted script string literal, including its quotes.
///
/// Unknown escapes decode to the escaped character itself, matching script
/// semantics (`\q` is `q`).
///
/// # Errors
///
/// [`ScrapeError::BadStringLiteral`] for mismatched quotes, a dangling
/// backslash, or an invalid `\xHH`/`\uHHHH` sequence.
pub(crate) fn decode_string_literal(literal: &str) -> Result<String, ScrapeError> {
    let bad = || ScrapeError::BadStringLiteral(literal.to_owned());

    let quote = literal.chars().next().ok_or_else(bad)?;
    if quote != '"' && quote != '\'' {
        return Err(bad());
    }
    if literal.len() < 2 || !literal.ends_with(quote) {
        return Err(bad());
    }

    let inner = &literal[1..literal.len() - 1];
    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        let escaped = chars.next().ok_or_else(bad)?;
        match escaped {
            'n' => decoded.push('\n'),
            'r' => decoded.push('\r'),
            't' => decoded.push('\t'),
            '0' => decoded.push('\0'),
            'b' => decoded.push('\u{8}'),
            'f' => decoded.push('\u{c}'),
            'v' => decoded.push('\u{b}'),
            'x' => decoded.push(hex_escape(&mut chars, 2).ok_or_else(bad)?),
            'u' => decoded.push(hex_escape(&mut chars, 4).ok_or_else(bad)?),
            other => decoded.push(other),
        }
    }

    Ok(decoded)
}

/// Consume `digits` hex digits and return the code point they name.
fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let digit = chars.next()?.to_digit(16)?;
        value = value * 16 + digit;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_double_quoted() {
        assert_eq!(decode_string_literal(r#""Intro Video""#).unwrap(), "Intro Video");
    }

    #[test]
    fn test_plain_single_quoted() {
        assert_eq!(decode_string_literal("'Intro Video'").unwrap(), "Intro Video");
    }

    #[test]
    fn test_common_escapes() {
        assert_eq!(
            decode_string_literal(r#""a\n\t\\b\"c""#).unwrap(),
            "a\n\t\\b\"c"
        );
        assert_eq!(decode_string_literal(r"'it\'s'").unwrap(), "it's");
    }

    #[test]
    fn test_unknown_escape_is_the_character_itself() {
        assert_eq!(decode_string_literal(r#""\q\/""#).unwrap(), "q/");
    }

    #[test]
    fn test_hex_and_unicode_escapes() {
        assert_eq!(decode_string_literal(r#""\x41é""#).unwrap(), "Aé");
    }

    #[test]
    fn test_empty_literal() {
        assert_eq!(decode_string_literal(r#""""#).unwrap(), "");
    }

    #[test]
    fn test_mismatched_quotes_fail() {
        assert!(decode_string_literal(r#""oops'"#).is_err());
    }

    #[test]
    fn test_unquoted_input_fails() {
        assert!(decode_string_literal("bare").is_err());
    }

    #[test]
    fn test_dangling_backslash_fails() {
        assert!(decode_string_literal(r#""trailing\"#).is_err());
    }

    #[test]
    fn test_bad_unicode_escape_fails() {
        assert!(decode_string_literal(r#""\uZZZZ""#).is_err());
    }
}
