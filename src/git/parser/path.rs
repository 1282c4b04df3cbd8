//! C-style quoted path decoding (and the matching encoder)
//!
//! git wraps a path in double quotes when it contains a quote, a backslash,
//! a control character, or (with `core.quotepath=true`) any non-ASCII byte.
//! Inside the quotes it uses `\"`, `\\`, `\a \b \t \n \v \f \r` and
//! three-digit octal byte escapes.

/// Decode a path token from porcelain output.
///
/// Only a token that both starts and ends with `"` is treated as quoted;
/// anything else is returned trimmed. Escapes that cannot be decoded are kept
/// verbatim, and if the decoded bytes are not UTF-8 the raw token is returned,
/// so path bytes are never dropped.
pub fn decode_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return trimmed.to_string();
    };

    let bytes = inner.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte != b'\\' {
            decoded.push(byte);
            i += 1;
            continue;
        }

        let Some(&escaped) = bytes.get(i + 1) else {
            // Lone trailing backslash
            decoded.push(b'\\');
            break;
        };

        match escaped {
            b'\\' | b'"' => decoded.push(escaped),
            b'a' => decoded.push(0x07),
            b'b' => decoded.push(0x08),
            b't' => decoded.push(b'\t'),
            b'n' => decoded.push(b'\n'),
            b'v' => decoded.push(0x0b),
            b'f' => decoded.push(0x0c),
            b'r' => decoded.push(b'\r'),
            b'0'..=b'7' => {
                let digits = bytes[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|b| (b'0'..=b'7').contains(*b))
                    .count();
                let octal = &inner[i + 1..i + 1 + digits];
                match u8::from_str_radix(octal, 8) {
                    Ok(value) => decoded.push(value),
                    Err(_) => {
                        decoded.push(b'\\');
                        decoded.extend_from_slice(octal.as_bytes());
                    }
                }
                i += 1 + digits;
                continue;
            }
            _ => {
                // Unknown escape: keep it as written
                decoded.push(b'\\');
                decoded.push(escaped);
            }
        }
        i += 2;
    }

    String::from_utf8(decoded).unwrap_or_else(|_| trimmed.to_string())
}

/// Quote a path the way git does.
///
/// With `escape_non_ascii` set this matches `core.quotepath=true` (the git
/// default); otherwise non-ASCII bytes pass through unescaped. Paths that
/// need no quoting are returned unchanged.
pub fn quote_path(path: &str, escape_non_ascii: bool) -> String {
    let needs_quoting = |b: u8| {
        b == b'"' || b == b'\\' || b < 0x20 || b == 0x7f || (escape_non_ascii && b >= 0x80)
    };

    if !path.bytes().any(needs_quoting) {
        return path.to_string();
    }

    let mut quoted = String::with_capacity(path.len() + 2);
    quoted.push('"');
    for ch in path.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{07}' => quoted.push_str("\\a"),
            '\u{08}' => quoted.push_str("\\b"),
            '\t' => quoted.push_str("\\t"),
            '\n' => quoted.push_str("\\n"),
            '\u{0b}' => quoted.push_str("\\v"),
            '\u{0c}' => quoted.push_str("\\f"),
            '\r' => quoted.push_str("\\r"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                quoted.push_str(&format!("\\{:03o}", c as u32));
            }
            c if escape_non_ascii && !c.is_ascii() => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    quoted.push_str(&format!("\\{b:03o}"));
                }
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
