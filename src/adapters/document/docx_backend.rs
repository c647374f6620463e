//! WordprocessingML (DOCX) backend for the flow document model.
//!
//! The package is assembled by hand: each part is an XML string written with
//! `std::fmt::Write`, then stored in a ZIP container. Entry timestamps are
//! pinned and no part carries a creation date, so equal documents produce
//! equal bytes.

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::export::{Alignment, BlockStyle, FlowBlock, FlowDocument, HeadingLevel, TextRun};
use crate::ports::{ExportError, ExportFormat, FlowDocumentBackend};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Numbering instance backing the "List Bullet" style.
const BULLET_NUM_ID: u32 = 1;

const CONTENT_TYPES: &str = concat!(
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    "<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>",
    "<Override PartName=\"/word/numbering.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml\"/>",
    "<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>",
    "<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>",
    "</Types>"
);

const PACKAGE_RELS: &str = concat!(
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>",
    "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>",
    "<Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties\" Target=\"docProps/app.xml\"/>",
    "</Relationships>"
);

const DOCUMENT_RELS: &str = concat!(
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering\" Target=\"numbering.xml\"/>",
    "</Relationships>"
);

const APP_PROPERTIES: &str = concat!(
    "<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">",
    "<Application>Lesson Planner</Application>",
    "</Properties>"
);

/// Escape XML special characters and drop code points XML 1.0 forbids.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn xml_error(err: std::fmt::Error) -> ExportError {
    ExportError::render_failed(ExportFormat::Docx, err.to_string())
}

fn zip_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::render_failed(ExportFormat::Docx, err.to_string())
}

/// Flow backend writing an Office Open XML word-processing package.
#[derive(Debug, Clone, Default)]
pub struct DocxBackend;

impl DocxBackend {
    pub fn new() -> Self {
        Self
    }

    /// `word/document.xml` for the given document.
    fn document_xml(document: &FlowDocument) -> Result<String, ExportError> {
        let mut xml = String::from(XML_DECL);
        write!(xml, "<w:document xmlns:w=\"{}\"><w:body>", WML_NS).map_err(xml_error)?;

        for block in &document.blocks {
            Self::paragraph_xml(block, &mut xml)?;
        }

        // A4 portrait, one-inch margins (twentieths of a point).
        xml.push_str(concat!(
            "<w:sectPr>",
            "<w:pgSz w:w=\"11906\" w:h=\"16838\"/>",
            "<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" ",
            "w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/>",
            "</w:sectPr>"
        ));
        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }

    fn paragraph_xml(block: &FlowBlock, xml: &mut String) -> Result<(), ExportError> {
        xml.push_str("<w:p><w:pPr>");
        write!(xml, "<w:pStyle w:val=\"{}\"/>", block.style.style_id()).map_err(xml_error)?;
        if block.alignment == Alignment::Center {
            xml.push_str("<w:jc w:val=\"center\"/>");
        }
        xml.push_str("</w:pPr>");

        for run in &block.runs {
            Self::run_xml(run, xml)?;
        }

        xml.push_str("</w:p>");
        Ok(())
    }

    fn run_xml(run: &TextRun, xml: &mut String) -> Result<(), ExportError> {
        xml.push_str("<w:r>");
        if run.bold {
            xml.push_str("<w:rPr><w:b/><w:bCs/></w:rPr>");
        }
        write!(xml, "<w:t xml:space=\"preserve\">{}</w:t>", escape_xml(&run.text))
            .map_err(xml_error)?;
        xml.push_str("</w:r>");
        Ok(())
    }

    /// `word/styles.xml` defining every style a [`BlockStyle`] can name.
    fn styles_xml() -> Result<String, ExportError> {
        let mut xml = String::from(XML_DECL);
        write!(xml, "<w:styles xmlns:w=\"{}\">", WML_NS).map_err(xml_error)?;
        xml.push_str(concat!(
            "<w:docDefaults>",
            "<w:rPrDefault><w:rPr>",
            "<w:rFonts w:ascii=\"Calibri\" w:hAnsi=\"Calibri\" w:eastAsia=\"Calibri\" w:cs=\"Calibri\"/>",
            "<w:sz w:val=\"22\"/><w:szCs w:val=\"22\"/>",
            "</w:rPr></w:rPrDefault>",
            "<w:pPrDefault><w:pPr><w:spacing w:after=\"200\" w:line=\"276\" w:lineRule=\"auto\"/></w:pPr></w:pPrDefault>",
            "</w:docDefaults>",
        ));

        write!(
            xml,
            "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"{}\"><w:name w:val=\"{}\"/><w:qFormat/></w:style>",
            BlockStyle::Normal.style_id(),
            BlockStyle::Normal.style_name()
        )
        .map_err(xml_error)?;

        Self::styled_paragraph(
            &mut xml,
            BlockStyle::Title,
            "<w:spacing w:after=\"300\"/>",
            "<w:rFonts w:ascii=\"Calibri Light\" w:hAnsi=\"Calibri Light\"/><w:color w:val=\"17365D\"/><w:sz w:val=\"52\"/><w:szCs w:val=\"52\"/>",
        )?;

        for (level, size, before) in [
            (HeadingLevel::H1, 32, 480),
            (HeadingLevel::H2, 26, 200),
            (HeadingLevel::H3, 24, 200),
        ] {
            let ppr = format!(
                "<w:keepNext/><w:spacing w:before=\"{}\" w:after=\"0\"/><w:outlineLvl w:val=\"{}\"/>",
                before,
                level.level() - 1
            );
            let rpr = format!(
                "<w:b/><w:bCs/><w:color w:val=\"365F91\"/><w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>"
            );
            Self::styled_paragraph(&mut xml, BlockStyle::Heading(level), &ppr, &rpr)?;
        }

        let bullet_ppr = format!(
            "<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{}\"/></w:numPr><w:ind w:left=\"720\" w:hanging=\"360\"/><w:contextualSpacing/>",
            BULLET_NUM_ID
        );
        Self::styled_paragraph(&mut xml, BlockStyle::ListBullet, &bullet_ppr, "")?;

        xml.push_str("</w:styles>");
        Ok(xml)
    }

    fn styled_paragraph(
        xml: &mut String,
        style: BlockStyle,
        paragraph_props: &str,
        run_props: &str,
    ) -> Result<(), ExportError> {
        write!(
            xml,
            "<w:style w:type=\"paragraph\" w:styleId=\"{}\"><w:name w:val=\"{}\"/><w:basedOn w:val=\"{}\"/><w:next w:val=\"{}\"/><w:qFormat/>",
            style.style_id(),
            style.style_name(),
            BlockStyle::Normal.style_id(),
            BlockStyle::Normal.style_id()
        )
        .map_err(xml_error)?;
        if !paragraph_props.is_empty() {
            write!(xml, "<w:pPr>{}</w:pPr>", paragraph_props).map_err(xml_error)?;
        }
        if !run_props.is_empty() {
            write!(xml, "<w:rPr>{}</w:rPr>", run_props).map_err(xml_error)?;
        }
        xml.push_str("</w:style>");
        Ok(())
    }

    /// `word/numbering.xml` with one single-level bullet list.
    fn numbering_xml() -> Result<String, ExportError> {
        let mut xml = String::from(XML_DECL);
        write!(xml, "<w:numbering xmlns:w=\"{}\">", WML_NS).map_err(xml_error)?;
        xml.push_str(concat!(
            "<w:abstractNum w:abstractNumId=\"0\">",
            "<w:multiLevelType w:val=\"singleLevel\"/>",
            "<w:lvl w:ilvl=\"0\">",
            "<w:start w:val=\"1\"/>",
            "<w:numFmt w:val=\"bullet\"/>",
            "<w:lvlText w:val=\"\u{F0B7}\"/>",
            "<w:lvlJc w:val=\"left\"/>",
            "<w:pPr><w:ind w:left=\"720\" w:hanging=\"360\"/></w:pPr>",
            "<w:rPr><w:rFonts w:ascii=\"Symbol\" w:hAnsi=\"Symbol\" w:hint=\"default\"/></w:rPr>",
            "</w:lvl>",
            "</w:abstractNum>",
        ));
        write!(
            xml,
            "<w:num w:numId=\"{}\"><w:abstractNumId w:val=\"0\"/></w:num>",
            BULLET_NUM_ID
        )
        .map_err(xml_error)?;
        xml.push_str("</w:numbering>");
        Ok(xml)
    }

    /// `docProps/core.xml`: title and creator only, no dates.
    fn core_xml(title: &str) -> Result<String, ExportError> {
        let mut xml = String::from(XML_DECL);
        xml.push_str(concat!(
            "<cp:coreProperties ",
            "xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" ",
            "xmlns:dc=\"http://purl.org/dc/elements/1.1/\" ",
            "xmlns:dcterms=\"http://purl.org/dc/terms/\" ",
            "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">"
        ));
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(title)).map_err(xml_error)?;
        xml.push_str("<dc:creator>Lesson Planner</dc:creator>");
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    fn package(parts: &[(&str, String)]) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opts = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        for (name, body) in parts {
            zip.start_file(*name, opts).map_err(zip_error)?;
            zip.write_all(body.as_bytes()).map_err(zip_error)?;
        }

        let cursor = zip.finish().map_err(zip_error)?;
        Ok(cursor.into_inner())
    }
}

impl FlowDocumentBackend for DocxBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, document: &FlowDocument) -> Result<Vec<u8>, ExportError> {
        let parts = [
            ("[Content_Types].xml", format!("{XML_DECL}{CONTENT_TYPES}")),
            ("_rels/.rels", format!("{XML_DECL}{PACKAGE_RELS}")),
            ("word/document.xml", Self::document_xml(document)?),
            ("word/_rels/document.xml.rels", format!("{XML_DECL}{DOCUMENT_RELS}")),
            ("word/styles.xml", Self::styles_xml()?),
            ("word/numbering.xml", Self::numbering_xml()?),
            ("docProps/core.xml", Self::core_xml(&document.title)?),
            ("docProps/app.xml", format!("{XML_DECL}{APP_PROPERTIES}")),
        ];

        Self::package(&parts)
    }
}
