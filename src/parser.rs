use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::block::{Block, List, ListItem, Span};

static ORDERED_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").unwrap());

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"N\((.*?)\)").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"I\((.*?)\)").unwrap());
static UNDERLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"S\((.*?)\)").unwrap());
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"T\((.*?)\)").unwrap());
// Colors and URLs are attribute values, so they never take in a styled span
static HIGHLIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"M\(([^,)\x{FFFC}]+),\s*([^)]+)\)").unwrap());
static COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"C\(([^,)\x{FFFC}]+),\s*([^)]+)\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"url\(([^)\x{FFFC}]*)\)").unwrap());

/// Stands in for an already styled span while a marker pattern runs.
const SLOT: char = '\u{FFFC}';

/// How a single line is classified before inline formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    Bullet(&'a str),
    Numbered(&'a str),
    Paragraph(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if let Some(rest) = trimmed.strip_prefix("* ") {
        LineKind::Bullet(rest)
    } else if let Some(prefix) = ORDERED_PREFIX.find(trimmed) {
        LineKind::Numbered(&trimmed[prefix.end()..])
    } else {
        // Paragraphs keep the untrimmed line
        LineKind::Paragraph(line)
    }
}

/// Parse markup text into a list of blocks
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open_list: Option<List> = None;

    for (number, line) in text.lines().enumerate() {
        let kind = classify(line);
        trace!(line = number + 1, ?kind, "classified line");

        match kind {
            LineKind::Blank => close_list(&mut open_list, &mut blocks),
            LineKind::Bullet(rest) => push_item(&mut open_list, &mut blocks, false, rest),
            LineKind::Numbered(rest) => push_item(&mut open_list, &mut blocks, true, rest),
            LineKind::Paragraph(line) => {
                close_list(&mut open_list, &mut blocks);
                blocks.push(Block::Paragraph {
                    content: apply_inline_formats(line),
                });
            }
        }
    }

    close_list(&mut open_list, &mut blocks);
    blocks
}

fn close_list(open_list: &mut Option<List>, blocks: &mut Vec<Block>) {
    if let Some(list) = open_list.take() {
        blocks.push(Block::List(list));
    }
}

fn push_item(open_list: &mut Option<List>, blocks: &mut Vec<Block>, ordered: bool, text: &str) {
    // A list of the other kind ends here
    if open_list.as_ref().is_some_and(|list| list.ordered != ordered) {
        close_list(open_list, blocks);
    }
    let list = open_list.get_or_insert_with(|| List {
        ordered,
        items: Vec::new(),
    });
    list.items.push(ListItem {
        content: apply_inline_formats(text),
    });
}

/// Inline markers in the order they are applied.
#[derive(Debug, Clone, Copy)]
enum Marker {
    Bold,
    Italic,
    Underline,
    Strike,
    Highlight,
    Color,
    Link,
}

const MARKERS: [Marker; 7] = [
    Marker::Bold,
    Marker::Italic,
    Marker::Underline,
    Marker::Strike,
    Marker::Highlight,
    Marker::Color,
    Marker::Link,
];

impl Marker {
    fn pattern(self) -> &'static Regex {
        match self {
            Marker::Bold => &BOLD,
            Marker::Italic => &ITALIC,
            Marker::Underline => &UNDERLINE,
            Marker::Strike => &STRIKE,
            Marker::Highlight => &HIGHLIGHT,
            Marker::Color => &COLOR,
            Marker::Link => &LINK,
        }
    }

    fn build(self, caps: &Captures, line: &mut FlatLine) -> Span {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let mut content = |i: usize| match caps.get(i) {
            Some(m) => {
                line.take_until(m.start());
                line.take_until(m.end())
            }
            None => Vec::new(),
        };
        match self {
            Marker::Bold => Span::Bold(content(1)),
            Marker::Italic => Span::Italic(content(1)),
            Marker::Underline => Span::Underline(content(1)),
            Marker::Strike => Span::Strike(content(1)),
            Marker::Highlight => Span::Highlight {
                color: group(1).to_string(),
                content: content(2),
            },
            Marker::Color => Span::Color {
                color: group(1).to_string(),
                content: content(2),
            },
            Marker::Link => Span::Link {
                url: group(1).to_string(),
            },
        }
    }
}

/// A run of sibling spans flattened to one string, each styled span replaced
/// by a single `SLOT` so a pattern can match across it.
struct FlatLine {
    text: String,
    /// Byte offset of each slot with the span it stands for, in order.
    slots: VecDeque<(usize, Span)>,
    pos: usize,
}

impl FlatLine {
    fn new(spans: Vec<Span>) -> Self {
        let mut text = String::new();
        let mut slots = VecDeque::new();
        for span in spans {
            match span {
                Span::Text(run) => text.push_str(&run),
                styled => {
                    slots.push_back((text.len(), styled));
                    text.push(SLOT);
                }
            }
        }
        Self {
            text,
            slots,
            pos: 0,
        }
    }

    /// Spans covering `pos..end`, moving `pos` to `end`.
    fn take_until(&mut self, end: usize) -> Vec<Span> {
        let mut spans = Vec::new();
        while let Some((offset, _)) = self.slots.front() {
            if *offset >= end {
                break;
            }
            let offset = *offset;
            if offset > self.pos {
                spans.push(Span::Text(self.text[self.pos..offset].to_string()));
            }
            if let Some((_, styled)) = self.slots.pop_front() {
                spans.push(styled);
            }
            self.pos = offset + SLOT.len_utf8();
        }
        if end > self.pos {
            spans.push(Span::Text(self.text[self.pos..end].to_string()));
            self.pos = end;
        }
        spans
    }
}

fn text_spans(text: &str) -> Vec<Span> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Span::Text(text.to_string())]
    }
}

/// Resolve inline markers in a line of text.
///
/// Each marker is applied in turn to the output of the markers before it, so
/// `C(red, N(x))` colors an already bold span. A match may take in whole spans
/// from earlier markers but never part of one, which keeps the result
/// balanced.
pub fn apply_inline_formats(text: &str) -> Vec<Span> {
    MARKERS
        .iter()
        .fold(text_spans(text), |spans, marker| apply_marker(spans, *marker))
}

fn apply_marker(spans: Vec<Span>, marker: Marker) -> Vec<Span> {
    let mut line = FlatLine::new(spans);
    let flat = line.text.clone();
    let mut out = Vec::new();
    for caps in marker.pattern().captures_iter(&flat) {
        let Some(whole) = caps.get(0) else { continue };
        out.extend(line.take_until(whole.start()));
        let span = marker.build(&caps, &mut line);
        line.take_until(whole.end());
        out.push(span);
    }
    out.extend(line.take_until(flat.len()));
    out
}
