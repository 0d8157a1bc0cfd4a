//! Escaping for untrusted commit text

/// Make free-form commit text safe to embed in a generated page
///
/// Trims surrounding whitespace and replaces `< > & " '` with HTML entities.
/// Everything else, including backslash sequences, passes through.
///
/// Not idempotent: apply it exactly once per raw field.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());

    for ch in trimmed.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }

    out
}
