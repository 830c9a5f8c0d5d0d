//! JSON encoding that is safe to inline in an HTML `<script>` element

use crate::error::GeocoderResult;
use serde::Serialize;

/// Serialize `value` as compact JSON, escaping `<`, `>`, `&`, `'` and the
/// U+2028/U+2029 line separators.
///
/// Those characters can only occur inside JSON strings, where the `\uXXXX`
/// forms decode to the same text.
pub fn to_script_json<T: Serialize + ?Sized>(value: &T) -> GeocoderResult<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\'' => out.push_str("\\u0027"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}
