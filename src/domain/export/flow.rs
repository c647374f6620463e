//! Flow document model: a sequence of styled blocks for a word processor.

use serde::Serialize;

use super::markdown::{self, HeadingLevel, MarkdownLine};
use super::request::ExportRequest;
use super::style::{Alignment, TextRun};

/// Paragraph style of a flow block. Each maps to one named style in the
/// target engine's stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockStyle {
    Title,
    Heading(HeadingLevel),
    ListBullet,
    Normal,
}

impl BlockStyle {
    /// Style identifier as used in WordprocessingML stylesheets.
    pub fn style_id(self) -> &'static str {
        match self {
            BlockStyle::Title => "Title",
            BlockStyle::Heading(HeadingLevel::H1) => "Heading1",
            BlockStyle::Heading(HeadingLevel::H2) => "Heading2",
            BlockStyle::Heading(HeadingLevel::H3) => "Heading3",
            BlockStyle::ListBullet => "ListBullet",
            BlockStyle::Normal => "Normal",
        }
    }

    /// Display name of the style, e.g. `"List Bullet"`.
    pub fn style_name(self) -> &'static str {
        match self {
            BlockStyle::Title => "Title",
            BlockStyle::Heading(HeadingLevel::H1) => "heading 1",
            BlockStyle::Heading(HeadingLevel::H2) => "heading 2",
            BlockStyle::Heading(HeadingLevel::H3) => "heading 3",
            BlockStyle::ListBullet => "List Bullet",
            BlockStyle::Normal => "Normal",
        }
    }
}

/// One paragraph-level element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowBlock {
    pub style: BlockStyle,
    pub alignment: Alignment,
    pub runs: Vec<TextRun>,
}

impl FlowBlock {
    fn new(style: BlockStyle, runs: Vec<TextRun>) -> Self {
        Self {
            style,
            alignment: Alignment::Left,
            runs,
        }
    }

    fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// True for a paragraph with no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// A lesson plan laid out as a flow of blocks.
///
/// Layout: title, metadata paragraph, one empty separator paragraph, then one
/// block per classified content line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowDocument {
    /// Document title, also written to the package properties.
    pub title: String,
    pub blocks: Vec<FlowBlock>,
}

impl FlowDocument {
    /// Builds the flow model for a request. Never fails; empty content gives
    /// a document holding only the header blocks.
    pub fn from_request(request: &ExportRequest) -> Self {
        let title = request.title();
        let mut blocks = vec![
            FlowBlock::new(BlockStyle::Title, vec![TextRun::plain(title.clone())]).centered(),
            FlowBlock::new(
                BlockStyle::Normal,
                vec![
                    TextRun::bold(format!("Grade/Level: {}", request.grade)),
                    TextRun::bold(format!(" | Duration: {}", request.duration)),
                    TextRun::bold(format!(" | Created: {}", request.created_label())),
                ],
            )
            .centered(),
            FlowBlock::new(BlockStyle::Normal, Vec::new()),
        ];

        blocks.extend(markdown::parse(&request.content).map(Self::block_for));

        Self { title, blocks }
    }

    fn block_for(line: MarkdownLine) -> FlowBlock {
        match line {
            MarkdownLine::Heading(level, text) => {
                FlowBlock::new(BlockStyle::Heading(level), vec![TextRun::plain(text)])
            }
            MarkdownLine::BulletItem(text) => {
                FlowBlock::new(BlockStyle::ListBullet, vec![TextRun::plain(text)])
            }
            MarkdownLine::BoldLine(text) => {
                FlowBlock::new(BlockStyle::Normal, vec![TextRun::bold(text)])
            }
            MarkdownLine::PlainText(text) => {
                FlowBlock::new(BlockStyle::Normal, vec![TextRun::plain(text)])
            }
        }
    }

    /// Blocks carrying the given style, in document order.
    pub fn blocks_with_style(&self, style: BlockStyle) -> impl Iterator<Item = &FlowBlock> {
        self.blocks.iter().filter(move |block| block.style == style)
    }

    /// True if any block uses the bullet list style.
    pub fn has_bullets(&self) -> bool {
        self.blocks_with_style(BlockStyle::ListBullet).next().is_some()
    }
}
