//! Markup serialization helpers: attribute naming, escaping and point lists.

use inkwash_core::Point;

/// Converts a camel-case attribute key to kebab case (`strokeWidth` ->
/// `stroke-width`). Keys already in kebab or lower case pass through.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Escapes text for use in element content or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Formats points as space-separated `x,y` pairs with one decimal place.
///
/// Non-finite points are written as the origin. Returns the formatted list
/// and the number of points that had to be replaced.
pub fn format_points(points: &[Point]) -> (String, usize) {
    let mut replaced = 0;
    let pairs: Vec<String> = points
        .iter()
        .map(|p| {
            if !p.is_finite() {
                replaced += 1;
            }
            let p = p.finite_or_origin();
            format!("{:.1},{:.1}", p.x, p.y)
        })
        .collect();
    (pairs.join(" "), replaced)
}

/// Serializes a style record as `key:value` pairs joined by semicolons,
/// with kebab-case keys.
pub fn style_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}:{}", kebab_case(k), v))
        .collect::<Vec<_>>()
        .join(";")
}

/// Serializes attributes as ` key="value"` with kebab-case keys and
/// escaped values. The leading space is included when non-empty.
pub fn attribute_string(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!(" {}=\"{}\"", kebab_case(k), escape(v)))
        .collect()
}
