//! Line classifier for the restricted markdown dialect lesson plans use.
//!
//! Recognized: `#`/`##`/`###` headings, `-`/`*` bullets, whole-line `**bold**`
//! and inline `[label](url)` links. Anything else is plain text. This is not a
//! general markdown parser; there is no nesting and no multi-line construct.
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. `"# "` → heading 1
//! 2. `"## "` → heading 2
//! 3. `"### "` → heading 3
//! 4. `"- "` or `"* "` → bullet item
//! 5. starts and ends with `"**"` → bold line
//! 6. otherwise → plain text with links reduced to their labels
//!
//! Prefix tests look at the raw line, so an indented `"  # x"` is plain text
//! and `"# **bold**"` is a heading whose text keeps its asterisks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `[label](url)` with a non-empty label and target.
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("link pattern compiles"));

/// Heading depth recognized by the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric level, 1 to 3.
    pub fn level(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// One classified, non-blank line of lesson content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownLine {
    Heading(HeadingLevel, String),
    BulletItem(String),
    BoldLine(String),
    PlainText(String),
}

impl MarkdownLine {
    /// The text that gets rendered, markers removed.
    pub fn text(&self) -> &str {
        match self {
            MarkdownLine::Heading(_, text)
            | MarkdownLine::BulletItem(text)
            | MarkdownLine::BoldLine(text)
            | MarkdownLine::PlainText(text) => text,
        }
    }
}

/// Classifies a single line. Blank or whitespace-only lines yield `None`.
///
/// A trailing `\r` (CRLF content) is ignored.
pub fn classify(line: &str) -> Option<MarkdownLine> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        return None;
    }

    let heading = [("# ", HeadingLevel::H1), ("## ", HeadingLevel::H2), ("### ", HeadingLevel::H3)]
        .into_iter()
        .find_map(|(marker, level)| line.strip_prefix(marker).map(|rest| (level, rest)));
    if let Some((level, rest)) = heading {
        return Some(MarkdownLine::Heading(level, rest.trim().to_string()));
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(MarkdownLine::BulletItem(rest.trim().to_string()));
    }

    // "**" and "***" open and close on shared markers and hold no text.
    if line.starts_with("**") && line.ends_with("**") {
        let inner = line
            .get(2..line.len().saturating_sub(2))
            .unwrap_or_default();
        return Some(MarkdownLine::BoldLine(inner.to_string()));
    }

    Some(MarkdownLine::PlainText(strip_links(line)))
}

/// Classifies every non-blank line of `content`, in order.
pub fn parse(content: &str) -> impl Iterator<Item = MarkdownLine> + '_ {
    content.split('\n').filter_map(classify)
}

/// Rewrites every `[label](url)` to `label`.
pub fn strip_links(text: &str) -> String {
    MARKDOWN_LINK.replace_all(text, "$1").into_owned()
}
