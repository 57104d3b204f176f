mod block;
mod config;
mod duration;
mod editor;
mod error;
mod html;
mod parser;

pub use block::{Block, List, ListItem, Span};
pub use config::{Config, LinksConfig, PageConfig, ToolbarConfig};
pub use duration::format_duration;
pub use editor::{
    Colors, Editor, EditorConfig, Format, Insertion, Selection, initialize, insert_format,
};
pub use error::{Error, Result};
pub use parser::apply_inline_formats;

use tracing::debug;

/// Parse markup text into a vector of blocks.
pub fn parse(text: &str) -> Vec<Block> {
    parser::parse(text)
}

/// Render markup to an HTML fragment using default config.
pub fn render(text: &str) -> String {
    render_with_config(text, Config::compiled_default())
}

/// Render markup to an HTML fragment with custom config.
pub fn render_with_config(text: &str, config: &Config) -> String {
    let blocks = parse(text);
    debug!(bytes = text.len(), blocks = blocks.len(), "rendering markup");
    html::blocks_to_html(&blocks, &config.links)
}

/// Wrap a rendered fragment in a minimal HTML page.
///
/// The fragment sits in a `<div id="{id}-preview">` container, the same
/// surface an editor renders into.
pub fn standalone_page(fragment: &str, id: &str, config: &Config) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html::escape(&config.page.title)));
    if let Some(stylesheet) = &config.page.stylesheet {
        out.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            html::escape(stylesheet)
        ));
    }
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<div id=\"{}-preview\">", html::escape(id)));
    out.push_str(fragment);
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_wraps_fragment() {
        let mut config = Config::default();
        config.page.title = "A & B".to_string();
        config.page.stylesheet = Some("/s.css".to_string());
        let page = standalone_page("<p>x</p>", "cuerpo", &config);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>A &amp; B</title>"));
        assert!(page.contains("<link rel=\"stylesheet\" href=\"/s.css\">"));
        assert!(page.contains("<div id=\"cuerpo-preview\"><p>x</p></div>"));
    }

    #[test]
    fn parse_exposes_blocks() {
        assert_eq!(
            parse("hi"),
            vec![Block::Paragraph {
                content: vec![Span::Text("hi".to_string())]
            }]
        );
    }
}
