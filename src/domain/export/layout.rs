//! Page-layout model: typeset items a paginating engine flows onto pages.
//!
//! Positions are not fixed here. The model carries sizes, colors and spacing
//! in points; the backend word-wraps and paginates.

use serde::Serialize;

use super::markdown::{self, HeadingLevel, MarkdownLine};
use super::request::ExportRequest;
use super::style::{Alignment, Rgb, TextRun};

pub const POINTS_PER_INCH: f32 = 72.0;

const BULLET_PREFIX: &str = "\u{2022} ";

/// Physical page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    /// A4 portrait with half-inch top/bottom and one-inch side margins.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin_top: 0.5 * POINTS_PER_INCH,
        margin_bottom: 0.5 * POINTS_PER_INCH,
        margin_left: POINTS_PER_INCH,
        margin_right: POINTS_PER_INCH,
    };

    /// Width available to text between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Baseline ceiling: y of the top margin, measured from the page bottom.
    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Typography of one paragraph item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size: f32,
    /// Distance between consecutive baselines.
    pub leading: f32,
    pub color: Rgb,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
}

impl TextStyle {
    const LEADING_FACTOR: f32 = 1.2;

    fn sized(font_size: f32) -> Self {
        Self {
            font_size,
            leading: font_size * Self::LEADING_FACTOR,
            color: Rgb::BLACK,
            alignment: Alignment::Left,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn title() -> Self {
        Self {
            color: Rgb::DARK_BLUE,
            alignment: Alignment::Center,
            space_after: 30.0,
            ..Self::sized(24.0)
        }
    }

    pub fn metadata() -> Self {
        Self {
            color: Rgb::MUTED_GREY,
            alignment: Alignment::Center,
            ..Self::sized(11.0)
        }
    }

    pub fn heading(level: HeadingLevel) -> Self {
        let (size, spacing) = match level {
            HeadingLevel::H1 => (18.0, 12.0),
            HeadingLevel::H2 => (14.0, 10.0),
            HeadingLevel::H3 => (12.0, 8.0),
        };
        Self {
            space_before: spacing,
            space_after: spacing,
            ..Self::sized(size)
        }
    }

    pub fn body() -> Self {
        Self::sized(10.0)
    }
}

/// One element in the page flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageItem {
    Paragraph { style: TextStyle, runs: Vec<TextRun> },
    /// Fixed vertical gap in points.
    Spacer(f32),
}

impl PageItem {
    fn paragraph(style: TextStyle, runs: Vec<TextRun>) -> Self {
        PageItem::Paragraph { style, runs }
    }

    /// Concatenated run text, empty for spacers.
    pub fn text(&self) -> String {
        match self {
            PageItem::Paragraph { runs, .. } => runs.iter().map(|run| run.text.as_str()).collect(),
            PageItem::Spacer(_) => String::new(),
        }
    }
}

/// A lesson plan as a page-flow of paragraphs and spacers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub geometry: PageGeometry,
    pub title: String,
    pub items: Vec<PageItem>,
}

impl PageLayout {
    const TITLE_GAP: f32 = 0.2 * POINTS_PER_INCH;
    const METADATA_GAP: f32 = 0.3 * POINTS_PER_INCH;
    const LINE_GAP: f32 = 0.1 * POINTS_PER_INCH;

    pub fn from_request(request: &ExportRequest) -> Self {
        let title = request.title();
        let mut items = vec![
            PageItem::paragraph(TextStyle::title(), vec![TextRun::bold(title.clone())]),
            PageItem::Spacer(Self::TITLE_GAP),
            PageItem::paragraph(
                TextStyle::metadata(),
                vec![
                    TextRun::bold("Grade/Level:"),
                    TextRun::plain(format!(" {} | ", request.grade)),
                    TextRun::bold("Duration:"),
                    TextRun::plain(format!(" {} | ", request.duration)),
                    TextRun::bold("Created:"),
                    TextRun::plain(format!(" {}", request.created_label())),
                ],
            ),
            PageItem::Spacer(Self::METADATA_GAP),
        ];

        for line in markdown::parse(&request.content) {
            items.push(Self::item_for(line));
            items.push(PageItem::Spacer(Self::LINE_GAP));
        }

        Self {
            geometry: PageGeometry::A4,
            title,
            items,
        }
    }

    fn item_for(line: MarkdownLine) -> PageItem {
        match line {
            MarkdownLine::Heading(level, text) => {
                PageItem::paragraph(TextStyle::heading(level), vec![TextRun::bold(text)])
            }
            MarkdownLine::BulletItem(text) => PageItem::paragraph(
                TextStyle::body(),
                vec![TextRun::plain(format!("{BULLET_PREFIX}{text}"))],
            ),
            MarkdownLine::BoldLine(text) => {
                PageItem::paragraph(TextStyle::body(), vec![TextRun::bold(text)])
            }
            MarkdownLine::PlainText(text) => {
                PageItem::paragraph(TextStyle::body(), vec![TextRun::plain(text)])
            }
        }
    }

    /// Paragraph items only, skipping spacers.
    pub fn paragraphs(&self) -> impl Iterator<Item = &PageItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, PageItem::Paragraph { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str) -> ExportRequest {
        ExportRequest {
            subject: "Math".to_string(),
            topic: "Algebra".to_string(),
            grade: "Grade 8".to_string(),
            duration: "45 minutes".to_string(),
            content: content.to_string(),
            created_at: Some("2024-01-01".to_string()),
        }
    }

    fn style_of(item: &PageItem) -> TextStyle {
        match item {
            PageItem::Paragraph { style, .. } => *style,
            PageItem::Spacer(_) => panic!("expected a paragraph, got a spacer"),
        }
    }

    #[test]
    fn a4_geometry_uses_half_inch_vertical_margins() {
        let page = PageGeometry::A4;
        assert_eq!(page.margin_top, 36.0);
        assert_eq!(page.margin_bottom, 36.0);
        assert!((page.content_width() - 451.28).abs() < 1e-3);
        assert!((page.content_top() - 805.89).abs() < 1e-3);
    }

    #[test]
    fn header_has_title_metadata_and_gaps() {
        let layout = PageLayout::from_request(&request(""));
        assert_eq!(layout.items.len(), 4);

        let title = style_of(&layout.items[0]);
        assert_eq!(title.font_size, 24.0);
        assert_eq!(title.color, Rgb::DARK_BLUE);
        assert_eq!(title.alignment, Alignment::Center);
        assert_eq!(layout.items[0].text(), "Math - Algebra");

        assert_eq!(layout.items[1], PageItem::Spacer(0.2 * 72.0));

        let meta = style_of(&layout.items[2]);
        assert_eq!(meta.color, Rgb::MUTED_GREY);
        assert_eq!(meta.alignment, Alignment::Center);
        assert_eq!(
            layout.items[2].text(),
            "Grade/Level: Grade 8 | Duration: 45 minutes | Created: 2024-01-01"
        );

        assert_eq!(layout.items[3], PageItem::Spacer(0.3 * 72.0));
    }

    #[test]
    fn metadata_labels_are_bold_and_values_plain() {
        let layout = PageLayout::from_request(&request(""));
        let PageItem::Paragraph { runs, .. } = &layout.items[2] else {
            panic!("metadata should be a paragraph");
        };
        let bold: Vec<_> = runs.iter().filter(|r| r.bold).map(|r| r.text.as_str()).collect();
        assert_eq!(bold, vec!["Grade/Level:", "Duration:", "Created:"]);
    }

    #[test]
    fn every_content_line_is_followed_by_a_spacer() {
        let layout = PageLayout::from_request(&request("# Intro\n\n- a\nplain"));
        let body = &layout.items[4..];
        assert_eq!(body.len(), 6);
        for pair in body.chunks(2) {
            assert!(matches!(pair[0], PageItem::Paragraph { .. }));
            assert_eq!(pair[1], PageItem::Spacer(0.1 * 72.0));
        }
    }

    #[test]
    fn heading_sizes_follow_level() {
        let layout = PageLayout::from_request(&request("# A\n## B\n### C"));
        let sizes: Vec<_> = layout
            .paragraphs()
            .skip(2)
            .map(|item| style_of(item).font_size)
            .collect();
        assert_eq!(sizes, vec![18.0, 14.0, 12.0]);
    }

    #[test]
    fn bullets_carry_a_literal_glyph() {
        let layout = PageLayout::from_request(&request("* Variables"));
        assert_eq!(layout.items[4].text(), "\u{2022} Variables");
        assert_eq!(style_of(&layout.items[4]).font_size, 10.0);
    }

    #[test]
    fn plain_text_is_body_sized_without_links() {
        let layout = PageLayout::from_request(&request("See [notes](http://n)"));
        assert_eq!(layout.items[4].text(), "See notes");
        assert_eq!(style_of(&layout.items[4]), TextStyle::body());
    }

    #[test]
    fn leading_scales_with_font_size() {
        assert!((TextStyle::body().leading - 12.0).abs() < 1e-6);
        assert!((TextStyle::title().leading - 28.8).abs() < 1e-4);
    }
}
