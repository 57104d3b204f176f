/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Underline(Vec<Span>),
    Strike(Vec<Span>),
    Highlight { color: String, content: Vec<Span> },
    Color { color: String, content: Vec<Span> },
    /// The URL doubles as the visible link text.
    Link { url: String },
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<Span>,
}

/// A list group (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements parsed from markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { content: Vec<Span> },
    List(List),
}
