use crate::block::{Block, List, Span};
use crate::config::LinksConfig;

/// Convert blocks to an HTML fragment
pub fn blocks_to_html(blocks: &[Block], links: &LinksConfig) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, links, &mut out);
    }
    out
}

fn emit_block(block: &Block, links: &LinksConfig, out: &mut String) {
    match block {
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, links, out);
            out.push_str("</p>");
        }
        Block::List(list) => list_to_html(list, links, out),
    }
}

fn list_to_html(list: &List, links: &LinksConfig, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(&item.content, links, out);
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn spans_to_html(spans: &[Span], links: &LinksConfig, out: &mut String) {
    for span in spans {
        span_to_html(span, links, out);
    }
}

fn span_to_html(span: &Span, links: &LinksConfig, out: &mut String) {
    match span {
        Span::Text(text) => escape_text(text, out),
        Span::Bold(inner) => wrap("strong", inner, links, out),
        Span::Italic(inner) => wrap("em", inner, links, out),
        Span::Underline(inner) => wrap("u", inner, links, out),
        Span::Strike(inner) => wrap("s", inner, links, out),
        Span::Highlight { color, content } => {
            out.push_str("<mark style=\"background-color:");
            escape_attr(color, out);
            out.push_str(";\">");
            spans_to_html(content, links, out);
            out.push_str("</mark>");
        }
        Span::Color { color, content } => {
            out.push_str("<span style=\"color:");
            escape_attr(color, out);
            out.push_str("\">");
            spans_to_html(content, links, out);
            out.push_str("</span>");
        }
        Span::Link { url } => {
            out.push_str("<a href=\"");
            escape_attr(url, out);
            out.push('"');
            push_attr(out, "target", &links.target);
            if let Some(rel) = &links.rel {
                push_attr(out, "rel", rel);
            }
            push_attr(out, "class", &links.class);
            out.push('>');
            escape_text(url, out);
            out.push_str("</a>");
        }
    }
}

fn wrap(tag: &str, inner: &[Span], links: &LinksConfig, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    spans_to_html(inner, links, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Empty values leave the attribute out entirely.
fn push_attr(out: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attr(value, out);
    out.push('"');
}

/// Escape a value for use in text or a double-quoted attribute.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_attr(text, &mut out);
    out
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
