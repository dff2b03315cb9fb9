// Shared SVG building blocks
use std::fmt::Write;

pub const MONO_FONT: &str = "'SF Mono', 'Monaco', 'Courier New', monospace";
pub const BACKGROUND: &str = "#0D1117";
pub const TEXT_PRIMARY: &str = "#C9D1D9";
pub const TEXT_MUTED: &str = "#8B949E";
pub const GRID: &str = "#30363D";

/// Escape text content and attribute values.
pub fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Pixel coordinate as written into the markup.
pub fn px(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn open_document(svg: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        svg,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = px(width),
        h = px(height)
    );
}

pub fn background(svg: &mut String, width: f64, height: f64, fill: &str) {
    let _ = writeln!(
        svg,
        r#"  <rect width="{}" height="{}" fill="{}" rx="6"/>"#,
        px(width),
        px(height),
        fill
    );
}

pub fn text(svg: &mut String, x: f64, y: f64, size: u32, fill: &str, attrs: &str, content: &str) {
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}"{}>{}</text>"#,
        px(x),
        px(y),
        MONO_FONT,
        size,
        escape_text(fill),
        attrs,
        escape_text(content)
    );
}

pub fn close_document(svg: &mut String) {
    svg.push_str("</svg>\n");
}

/// Balanced-tag check used by renderer tests.
#[cfg(test)]
pub fn assert_well_formed(markup: &str) {
    assert!(markup.starts_with("<svg "), "document must open with <svg");
    assert!(markup.trim_end().ends_with("</svg>"), "document must close with </svg>");
    assert_eq!(markup.matches("<svg").count(), 1);
    for tag in ["text", "defs", "linearGradient"] {
        assert_eq!(
            markup.matches(&format!("<{} ", tag)).count() + markup.matches(&format!("<{}>", tag)).count(),
            markup.matches(&format!("</{}>", tag)).count(),
            "unbalanced <{}>",
            tag
        );
    }
}
