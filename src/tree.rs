//! Labeled render tree and bordered panel output.
//!
//! Renderers build [`Node`] trees; this module turns them into terminal text
//! with box-drawing guides and wraps finished sections in rounded panels.
//! Styling happens upstream (nodes carry already-painted text); the only
//! color applied here is the guide and border style.

use unicode_width::UnicodeWidthChar;

use crate::theme::Style;

// === Nodes ===

/// One node of the render tree: painted text (possibly multi-line) plus
/// ordered children. Exclusively owned, built once per render call.
#[derive(Debug, Clone, Default)]
pub struct Node {
    text: String,
    children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Append a child node.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the tree rooted here into a single string.
    #[must_use]
    pub fn render(&self, guide: &Style) -> String {
        self.lines(guide).join("\n")
    }

    fn lines(&self, guide: &Style) -> Vec<String> {
        let mut out: Vec<String> = self.text.split('\n').map(str::to_string).collect();
        let count = self.children.len();
        for (index, child) in self.children.iter().enumerate() {
            let last = index + 1 == count;
            let (branch, cont) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            for (line_index, line) in child.lines(guide).into_iter().enumerate() {
                let prefix = if line_index == 0 { branch } else { cont };
                out.push(format!("{}{line}", guide.paint(prefix)));
            }
        }
        out
    }
}

// === Panels ===

/// Wrap pre-rendered `content` in a rounded border with a title.
///
/// `title` may already carry styling; widths are computed on the printable
/// text only.
#[must_use]
pub fn panel(content: &str, title: &str, border: &Style) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let title_width = display_width(title);
    let body_width = lines.iter().map(|line| display_width(line)).max().unwrap_or(0);
    // Inner width must fit the widest body line and the "─ title ─" header.
    let inner = body_width.max(title_width + 2);

    let mut out = String::new();
    out.push_str(&border.paint("╭─ "));
    out.push_str(title);
    out.push(' ');
    out.push_str(&border.paint(&format!("{}╮", "─".repeat(inner - title_width - 1))));
    for line in lines {
        out.push('\n');
        out.push_str(&border.paint("│ "));
        out.push_str(line);
        out.push_str(&" ".repeat(inner - display_width(line)));
        out.push_str(&border.paint(" │"));
    }
    out.push('\n');
    out.push_str(&border.paint(&format!("╰{}╯", "─".repeat(inner + 2))));
    out
}

/// Printable width of a line, ignoring ANSI escape sequences.
#[must_use]
pub fn display_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // Skip the SGR sequence through its final byte.
            for follow in chars.by_ref() {
                if follow.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            width += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    width
}
