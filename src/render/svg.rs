// Small SVG building blocks

use crate::format::{BAR_WIDTH, share_width};

/// Escapes text for use inside an SVG text node or attribute value.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Track plus gradient fill for `part` of `whole`.
pub fn share_bar(part: u64, whole: u64) -> String {
    let filled = share_width(part, whole, BAR_WIDTH);
    format!(
        r##"<rect x="0" y="0" width="{BAR_WIDTH}" height="10" rx="2" fill="#1a1a2e" stroke="#2a2a4a" stroke-width="0.5"/><rect x="0" y="0" width="{filled}" height="10" rx="2" fill="url(#barGrad)"/>"##
    )
}
