//! Binds the renderer to editor instances.
//!
//! An editor is a text buffer paired with a preview surface, named `<id>` and
//! `<id>-preview`, plus an optional toolbar whose buttons wrap the current
//! selection in marker syntax. Every change to the buffer re-renders the whole
//! preview.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, error};

use crate::config::{Config, ToolbarConfig};
use crate::error::Error;

/// A toolbar action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Strike,
    Highlight,
    Color,
    Url,
    BulletList,
    NumberedList,
}

impl Format {
    /// The trigger name a toolbar button carries for this action.
    pub fn trigger(self) -> &'static str {
        match self {
            Format::Bold => "N",
            Format::Italic => "I",
            Format::Underline => "S",
            Format::Strike => "T",
            Format::Highlight => "M",
            Format::Color => "C",
            Format::Url => "url",
            Format::BulletList => "lista",
            Format::NumberedList => "lista-num",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Format::Bold),
            "I" => Ok(Format::Italic),
            "S" => Ok(Format::Underline),
            "T" => Ok(Format::Strike),
            "M" => Ok(Format::Highlight),
            "C" => Ok(Format::Color),
            "url" => Ok(Format::Url),
            "lista" => Ok(Format::BulletList),
            "lista-num" => Ok(Format::NumberedList),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trigger())
    }
}

/// Current values of the toolbar's two color pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors {
    pub text: String,
    pub highlight: String,
}

impl Colors {
    pub fn from_config(toolbar: &ToolbarConfig) -> Self {
        Self {
            text: toolbar.text_color.clone(),
            highlight: toolbar.highlight_color.clone(),
        }
    }
}

/// A selection in the buffer, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Byte range of the selection in `text`, ordered and clamped to its length.
    fn byte_range(self, text: &str) -> (usize, usize) {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        (char_to_byte(text, lo), char_to_byte(text, hi))
    }
}

fn char_to_byte(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Result of inserting a format into a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    /// Character offset just past the inserted markup.
    pub caret: usize,
}

/// Markup that replaces `selected` for the given format.
fn replacement(format: Format, selected: &str, colors: &Colors, toolbar: &ToolbarConfig) -> String {
    let selected = if selected.is_empty() {
        toolbar.placeholder.as_str()
    } else {
        selected
    };
    match format {
        Format::Bold | Format::Italic | Format::Underline | Format::Strike => {
            format!("{}({selected})", format.trigger())
        }
        Format::Highlight => format!("M({}, {selected})", colors.highlight),
        Format::Color => format!("C({}, {selected})", colors.text),
        Format::Url => {
            let url = if selected == toolbar.placeholder {
                toolbar.url_placeholder.as_str()
            } else {
                selected
            };
            format!("url({url})")
        }
        Format::BulletList => "\n* Item 1\n* Item 2".to_string(),
        Format::NumberedList => "\n1. Item 1\n2. Item 2".to_string(),
    }
}

/// Wrap the selected text of `buffer` in the markup for `format`.
pub fn insert_format(
    buffer: &str,
    selection: Selection,
    format: Format,
    colors: &Colors,
    toolbar: &ToolbarConfig,
) -> Insertion {
    let (start, end) = selection.byte_range(buffer);
    let inserted = replacement(format, &buffer[start..end], colors, toolbar);

    let mut text = String::with_capacity(buffer.len() + inserted.len());
    text.push_str(&buffer[..start]);
    text.push_str(&inserted);
    text.push_str(&buffer[end..]);

    let caret = buffer[..start].chars().count() + inserted.chars().count();
    Insertion { text, caret }
}

/// One editor instance with its buffer and rendered preview.
#[derive(Debug, Clone)]
pub struct Editor {
    id: String,
    text: String,
    preview: String,
    colors: Colors,
    config: Config,
}

impl Editor {
    /// Create an editor and render its initial preview.
    pub fn new(id: impl Into<String>, text: impl Into<String>, config: &Config) -> Self {
        let mut editor = Self {
            id: id.into(),
            text: text.into(),
            preview: String::new(),
            colors: Colors::from_config(&config.toolbar),
            config: config.clone(),
        };
        editor.update_preview();
        editor
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn preview_id(&self) -> String {
        format!("{}-preview", self.id)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The rendered HTML for the current buffer.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn set_text_color(&mut self, color: impl Into<String>) {
        self.colors.text = color.into();
    }

    pub fn set_highlight_color(&mut self, color: impl Into<String>) {
        self.colors.highlight = color.into();
    }

    /// Replace the buffer and re-render.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.update_preview();
    }

    /// Apply a toolbar action to the selection, returning the new caret.
    pub fn apply(&mut self, format: Format, selection: Selection) -> usize {
        let insertion = insert_format(
            &self.text,
            selection,
            format,
            &self.colors,
            &self.config.toolbar,
        );
        debug!(editor = %self.id, %format, caret = insertion.caret, "applied format");
        self.set_text(insertion.text);
        insertion.caret
    }

    /// Apply a toolbar action by its trigger name.
    pub fn apply_trigger(&mut self, trigger: &str, selection: Selection) -> crate::Result<usize> {
        let format = trigger.parse()?;
        Ok(self.apply(format, selection))
    }

    fn update_preview(&mut self) {
        self.preview = crate::render_with_config(&self.text, &self.config);
    }
}

/// What the host page knows about one toolbar and the surfaces it targets.
#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    /// Id of the text buffer the toolbar edits.
    pub target: String,
    /// Current buffer contents, or `None` if no buffer with that id exists.
    pub text: Option<String>,
    /// Whether a `<target>-preview` surface exists.
    pub has_preview: bool,
}

/// Bind an editor to every usable configuration.
///
/// Configurations without a target are skipped. Those whose buffer or preview
/// surface is missing are skipped and logged; the rest are still bound.
pub fn initialize<I>(configs: I, config: &Config) -> Vec<Editor>
where
    I: IntoIterator<Item = EditorConfig>,
{
    let mut editors = Vec::new();
    for EditorConfig {
        target,
        text,
        has_preview,
    } in configs
    {
        if target.is_empty() {
            continue;
        }
        match text {
            Some(text) if has_preview => editors.push(Editor::new(target, text, config)),
            _ => error!(target_id = %target, "editor could not be initialized"),
        }
    }
    debug!(count = editors.len(), "initialized editors");
    editors
}
