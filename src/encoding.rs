use crate::compat::{String, ToString, Vec};
use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, utf8_percent_encode};

// Encode sets follow the WHATWG URL standard and ECMAScript's
// encodeURIComponent. See https://url.spec.whatwg.org/#percent-encoded-bytes

/// application/x-www-form-urlencoded percent-encode set
/// Everything except ASCII alphanumerics and `*`, `-`, `.`, `_`
/// Space is part of the set and is rewritten to `+` on output.
pub const FORM_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Component percent-encode set (encodeURIComponent)
/// Everything except ASCII alphanumerics and `-`, `_`, `.`, `!`, `~`, `*`, `'`, `(`, `)`
pub const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Bracket-key percent-encode set
/// `COMPONENT_SET` with `[` and `]` left literal so nested keys stay readable
pub const BRACKET_KEY_SET: &AsciiSet = &COMPONENT_SET.remove(b'[').remove(b']');

/// Strict component set
/// `COMPONENT_SET` + `!`, `'`, `(`, `)`, `*`
pub const STRICT_COMPONENT_SET: &AsciiSet = &COMPONENT_SET
    .add(b'!')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*');

/// Write a form-encoded string into `buffer`, spaces as `+`
pub fn form_encode_into(buffer: &mut String, input: &str) {
    plus_encode_into(buffer, input, FORM_SET);
}

/// Form-encode a string (URLSearchParams serialization rules)
pub fn form_encode(input: &str) -> String {
    let mut buffer = String::with_capacity(input.len());
    form_encode_into(&mut buffer, input);
    buffer
}

/// Decode a form-encoded string: `+` becomes a space, escapes are decoded,
/// malformed escapes pass through and invalid UTF-8 is replaced.
pub fn form_decode(input: &str) -> String {
    if !input.bytes().any(|b| b == b'+' || b == b'%') {
        return input.to_string();
    }

    let bytes: Vec<u8> = input
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&bytes).decode_utf8_lossy().into_owned()
}

/// Percent-encode a string using the provided encode set
pub fn percent_encode_with_set(input: &str, encode_set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, encode_set).to_string()
}

/// Encode a URI component (encodeURIComponent)
pub fn encode_component(input: &str) -> String {
    percent_encode_with_set(input, COMPONENT_SET)
}

/// Encode a URI component with the strict set, spaces as `+`
pub fn encode_component_safe(input: &str) -> String {
    let mut buffer = String::with_capacity(input.len());
    plus_encode_into(&mut buffer, input, STRICT_COMPONENT_SET);
    buffer
}

/// Decode a URI component (decodeURIComponent)
///
/// Fails on a `%` that is not followed by two hex digits, and on escapes
/// that decode to invalid UTF-8.
pub fn decode_component(input: &str) -> Result<String> {
    if !has_valid_escapes(input) {
        return Err(Error::InvalidPercentEncoding);
    }
    percent_decode(input.as_bytes())
        .decode_utf8()
        .map(Into::into)
        .map_err(|_| Error::InvalidPercentEncoding)
}

/// Decode a URI component, falling back to the input on malformed data
pub fn decode_component_safe(input: &str) -> String {
    decode_component(input).unwrap_or_else(|_| input.to_string())
}

fn plus_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, encode_set) {
        if chunk == "%20" {
            buffer.push('+');
        } else {
            buffer.push_str(chunk);
        }
    }
}

fn has_valid_escapes(input: &str) -> bool {
    let bytes = input.as_bytes();
    let mut offset = 0;
    while let Some(pos) = memchr::memchr(b'%', &bytes[offset..]) {
        let at = offset + pos;
        let valid = bytes
            .get(at + 1..at + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return false;
        }
        offset = at + 3;
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encode() {
        assert_eq!(form_encode("a b"), "a+b");
        assert_eq!(form_encode("1+1=2"), "1%2B1%3D2");
        assert_eq!(form_encode("a&b"), "a%26b");
        assert_eq!(form_encode("*-._"), "*-._");
        assert_eq!(form_encode("~"), "%7E");
        assert_eq!(form_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_form_decode() {
        assert_eq!(form_decode("value+with+spaces"), "value with spaces");
        assert_eq!(form_decode("a%26b"), "a&b");
        assert_eq!(form_decode("100%"), "100%");
        assert_eq!(form_decode("plain"), "plain");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_component("foo[bar]"), "foo%5Bbar%5D");
        assert_eq!(encode_component("!~*'()"), "!~*'()");
    }

    #[test]
    fn test_encode_component_safe() {
        assert_eq!(encode_component_safe("a b"), "a+b");
        assert_eq!(encode_component_safe("it's (ok)!*"), "it%27s+%28ok%29%21%2A");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("hello%20world").unwrap(), "hello world");
        assert_eq!(decode_component("%2F").unwrap(), "/");
        assert_eq!(decode_component("%C3%A9").unwrap(), "é");
        assert_eq!(decode_component("a+b").unwrap(), "a+b");
        assert_eq!(decode_component("%"), Err(Error::InvalidPercentEncoding));
        assert_eq!(decode_component("%zz"), Err(Error::InvalidPercentEncoding));
        assert_eq!(decode_component("%FF"), Err(Error::InvalidPercentEncoding));
    }

    #[test]
    fn test_decode_component_safe_falls_back() {
        assert_eq!(decode_component_safe("%"), "%");
        assert_eq!(decode_component_safe("50%off"), "50%off");
        assert_eq!(decode_component_safe("%E0%A4%A"), "%E0%A4%A");
        assert_eq!(decode_component_safe("ok%21"), "ok!");
    }
}
