//! PDF backend for the page-layout model, built on `lopdf`.
//!
//! Paragraphs are word-wrapped with Helvetica metrics and flowed top to
//! bottom across as many pages as needed. Text uses the two standard Type1
//! faces, so no font program is embedded. The document carries no dates and
//! no file identifier; equal layouts produce equal bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::pdf_metrics::{encode_win_ansi, glyph_width, text_width};
use crate::domain::export::{Alignment, PageGeometry, PageItem, PageLayout, TextRun, TextStyle};
use crate::ports::{ExportError, ExportFormat, PageLayoutBackend};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

fn pdf_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::render_failed(ExportFormat::Pdf, err.to_string())
}

/// One encoded glyph and its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    code: u8,
    bold: bool,
}

impl Glyph {
    fn is_space(self) -> bool {
        self.code == b' '
    }

    fn width(self, font_size: f32) -> f32 {
        f32::from(glyph_width(self.code, self.bold)) * font_size / 1000.0
    }
}

fn glyphs_of(runs: &[TextRun]) -> Vec<Glyph> {
    runs.iter()
        .flat_map(|run| {
            encode_win_ansi(&run.text)
                .into_iter()
                .map(move |code| Glyph { code, bold: run.bold })
        })
        .collect()
}

fn width_of(glyphs: &[Glyph], font_size: f32) -> f32 {
    glyphs.iter().map(|g| g.width(font_size)).sum()
}

fn trim_trailing_spaces(line: &mut Vec<Glyph>) {
    while line.last().is_some_and(|g| g.is_space()) {
        line.pop();
    }
}

/// Greedy word wrap. Continuation lines lose their leading spaces; a word
/// wider than the whole line is broken between glyphs.
fn wrap(glyphs: &[Glyph], max_width: f32, font_size: f32) -> Vec<Vec<Glyph>> {
    let mut lines: Vec<Vec<Glyph>> = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();

    let mut rest = glyphs;
    while let Some(first) = rest.first() {
        let split = rest
            .iter()
            .position(|g| g.is_space() != first.is_space())
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(split);
        rest = tail;

        if first.is_space() {
            if current.is_empty() && !lines.is_empty() {
                continue;
            }
            current.extend_from_slice(token);
            continue;
        }

        let token_width = width_of(token, font_size);
        let has_word = current.iter().any(|g| !g.is_space());
        if has_word && width_of(&current, font_size) + token_width > max_width {
            trim_trailing_spaces(&mut current);
            lines.push(std::mem::take(&mut current));
        }

        if token_width <= max_width {
            current.extend_from_slice(token);
            continue;
        }

        for &glyph in token {
            if !current.is_empty() && width_of(&current, font_size) + glyph.width(font_size) > max_width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(glyph);
        }
    }

    trim_trailing_spaces(&mut current);
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// A wrapped line split into same-weight segments.
#[derive(Debug, Clone, PartialEq)]
struct TypesetLine {
    segments: Vec<(bool, Vec<u8>)>,
    width: f32,
}

impl TypesetLine {
    fn from_glyphs(glyphs: &[Glyph], font_size: f32) -> Self {
        let mut segments: Vec<(bool, Vec<u8>)> = Vec::new();
        for glyph in glyphs {
            match segments.last_mut() {
                Some((bold, codes)) if *bold == glyph.bold => codes.push(glyph.code),
                _ => segments.push((glyph.bold, vec![glyph.code])),
            }
        }
        let width = segments
            .iter()
            .map(|(bold, codes)| text_width(codes, *bold, font_size))
            .sum();
        Self { segments, width }
    }
}

/// Accumulates page content streams while tracking the vertical cursor.
struct Paginator {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
    /// Top of the next line, in points from the page bottom.
    cursor: f32,
}

impl Paginator {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Vec::new()],
            cursor: geometry.content_top(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.pages.last().map_or(true, Vec::is_empty)
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = self.geometry.content_top();
    }

    /// Vertical gap; dropped at the top of a page.
    fn skip(&mut self, gap: f32) {
        if !self.at_page_top() {
            self.cursor -= gap;
        }
    }

    fn paragraph(&mut self, style: &TextStyle, runs: &[TextRun]) {
        self.skip(style.space_before);

        let glyphs = glyphs_of(runs);
        for line in wrap(&glyphs, self.geometry.content_width(), style.font_size) {
            if !self.at_page_top() && self.cursor - style.leading < self.geometry.margin_bottom {
                self.new_page();
            }
            let line = TypesetLine::from_glyphs(&line, style.font_size);
            let baseline = self.cursor - style.font_size;
            self.draw_line(style, &line, baseline);
            self.cursor -= style.leading;
        }

        self.cursor -= style.space_after;
    }

    fn draw_line(&mut self, style: &TextStyle, line: &TypesetLine, baseline: f32) {
        let x = match style.alignment {
            Alignment::Left => self.geometry.margin_left,
            Alignment::Center => {
                self.geometry.margin_left + (self.geometry.content_width() - line.width) / 2.0
            }
        };
        let [r, g, b] = style.color.to_unit();

        let mut ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
        ];
        for (bold, codes) in &line.segments {
            let font = if *bold { BOLD_FONT } else { REGULAR_FONT };
            ops.push(Operation::new("Tf", vec![font.into(), style.font_size.into()]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(codes.clone(), StringFormat::Literal)],
            ));
        }
        ops.push(Operation::new("ET", vec![]));

        if let Some(page) = self.pages.last_mut() {
            page.extend(ops);
        }
    }

    fn finish(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

/// PDF text string: UTF-16BE with a byte order mark.
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn type1_font(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Page-layout backend producing PDF 1.5 via `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfBackend;

impl PdfBackend {
    pub fn new() -> Self {
        Self
    }

    fn paginate(layout: &PageLayout) -> Vec<Vec<Operation>> {
        let mut paginator = Paginator::new(layout.geometry);
        for item in &layout.items {
            match item {
                PageItem::Paragraph { style, runs } => paginator.paragraph(style, runs),
                PageItem::Spacer(gap) => paginator.skip(*gap),
            }
        }
        paginator.finish()
    }

    fn build(layout: &PageLayout) -> Result<Document, ExportError> {
        let geometry = layout.geometry;
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(type1_font("Helvetica"));
        let bold_id = doc.add_object(type1_font("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in Self::paginate(layout) {
            let content = Content { operations };
            let stream = Stream::new(dictionary! {}, content.encode().map_err(pdf_error)?);
            let content_id = doc.add_object(stream);
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                geometry.width.into(),
                geometry.height.into(),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(&layout.title),
            "Producer" => text_string("Lesson Planner"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        doc.compress();
        Ok(doc)
    }
}

impl PageLayoutBackend for PdfBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
        let mut doc = Self::build(layout)?;
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(pdf_error)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::export::ExportRequest;

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

    fn plain(text: &str) -> Vec<Glyph> {
        glyphs_of(&[TextRun::plain(text)])
    }

    fn line_text(line: &[Glyph]) -> String {
        line.iter().map(|g| g.code as char).collect()
    }

    // ───────────────────────────────────────────────────────────────
    // Wrapping
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap(&plain("Hello world"), 400.0, 10.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "Hello world");
    }

    #[test]
    fn long_text_breaks_at_spaces_without_dangling_spaces() {
        // Each "aaaa" is 4 * 556 * 10 / 1000 = 22.24pt wide.
        let lines = wrap(&plain("aaaa aaaa aaaa"), 40.0, 10.0);
        let texts: Vec<_> = lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(texts, vec!["aaaa", "aaaa", "aaaa"]);
    }

    #[test]
    fn oversized_word_is_broken_between_glyphs() {
        let lines = wrap(&plain("wwwwwwwwww"), 30.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(width_of(line, 10.0) <= 30.0 + 1e-3);
        }
        let joined: String = lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(joined, "wwwwwwwwww");
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        let lines = wrap(&[], 100.0, 10.0);
        assert_eq!(lines, vec![Vec::<Glyph>::new()]);
    }

    #[test]
    fn typeset_line_groups_runs_by_weight() {
        let glyphs = glyphs_of(&[TextRun::bold("Grade:"), TextRun::plain(" 8")]);
        let line = TypesetLine::from_glyphs(&glyphs, 11.0);
        assert_eq!(line.segments.len(), 2);
        assert!(line.segments[0].0);
        assert_eq!(line.segments[1].1, b" 8".to_vec());
    }

    // ───────────────────────────────────────────────────────────────
    // Pagination
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn short_plan_fits_on_one_page() {
        let layout = PageLayout::from_request(&request("# Intro\n- Variables\n- Equations"));
        assert_eq!(PdfBackend::paginate(&layout).len(), 1);
    }

    #[test]
    fn long_plan_spills_onto_more_pages() {
        let content = (0..200).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
        let layout = PageLayout::from_request(&request(&content));
        let pages = PdfBackend::paginate(&layout);
        assert!(pages.len() >= 3, "expected several pages, got {}", pages.len());
        assert!(pages.iter().all(|ops| !ops.is_empty()));
    }

    #[test]
    fn centered_lines_start_right_of_margin() {
        let layout = PageLayout::from_request(&request(""));
        let pages = PdfBackend::paginate(&layout);
        let td = pages[0]
            .iter()
            .find(|op| op.operator == "Td")
            .expect("title is drawn");
        let x = td.operands[0].as_float().unwrap();
        assert!(x > layout.geometry.margin_left);
    }

    // ───────────────────────────────────────────────────────────────
    // Output
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn output_is_a_pdf_1_5_document() {
        let bytes = PdfBackend::new()
            .render(&PageLayout::from_request(&request("# Intro")))
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn rendering_is_byte_identical() {
        let layout = PageLayout::from_request(&request("# Intro\n- a\n**b**\nplain text"));
        let backend = PdfBackend::new();
        assert_eq!(backend.render(&layout).unwrap(), backend.render(&layout).unwrap());
    }

    #[test]
    fn text_string_has_utf16_bom() {
        let Object::String(bytes, _) = text_string("A") else {
            panic!("expected a string object");
        };
        assert_eq!(bytes, vec![0xFE, 0xFF, 0x00, 0x41]);
    }
}
