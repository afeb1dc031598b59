//! MySQL string literal escaping

/// Escape raw column bytes the way `mysql_real_escape_string` does, so the
/// result can be embedded between quotes in a MySQL string literal.
///
/// Only ASCII bytes are rewritten; multi-byte UTF-8 sequences pass through
/// untouched. Invalid UTF-8 is replaced lossily.
pub fn mysql_escape(raw: &[u8]) -> String {
    let mut escaped = Vec::with_capacity(raw.len() + raw.len() / 8);
    for &byte in raw {
        match byte {
            0 => escaped.extend_from_slice(b"\\0"),
            b'\n' => escaped.extend_from_slice(b"\\n"),
            b'\r' => escaped.extend_from_slice(b"\\r"),
            b'\\' => escaped.extend_from_slice(b"\\\\"),
            b'\'' => escaped.extend_from_slice(b"\\'"),
            b'"' => escaped.extend_from_slice(b"\\\""),
            0x1a => escaped.extend_from_slice(b"\\Z"),
            other => escaped.push(other),
        }
    }
    match String::from_utf8(escaped) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Quote a MySQL identifier with backticks
pub fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}
