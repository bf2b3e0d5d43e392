use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;

use super::{DocxResult, OFFICE_DOCUMENT_REL, REL_NS, W_NS};

/// Usable width of a Letter page with 1" margins, in twips.
const TEXT_WIDTH_TWIPS: usize = 9360;

/// Document-wide formatting applied by [`DocumentBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStyle {
    pub font_name: String,
    pub font_size_pt: u32,
    pub heading: String,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            font_name: "Calibri".to_string(),
            font_size_pt: 11,
            heading: "Data from Excel".to_string(),
        }
    }
}

/// Builds a document made of a level-1 heading followed by one
/// center-aligned, grid-bordered table.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    style: DocumentStyle,
    rows: Vec<Vec<String>>,
}

impl DocumentBuilder {
    pub fn new(style: DocumentStyle) -> Self {
        Self {
            style,
            rows: Vec::new(),
        }
    }

    /// Sets the table contents. Short rows are padded with empty cells.
    pub fn table(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Serializes the package into memory and writes it with a single call,
    /// so nothing touches `path` until the archive is complete.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DocxResult<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> DocxResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    pub fn write<W: Write + Seek>(&self, writer: W) -> DocxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(root_rels().as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(document_rels().as_bytes())?;

        zip.start_file("word/document.xml", options)?;
        zip.write_all(self.document_xml().as_bytes())?;

        zip.start_file("word/styles.xml", options)?;
        zip.write_all(self.styles_xml().as_bytes())?;

        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(core_xml().as_bytes())?;

        zip.start_file("docProps/app.xml", options)?;
        zip.write_all(APP_XML.as_bytes())?;

        zip.finish()?;
        Ok(())
    }

    fn document_xml(&self) -> String {
        let ncols = self.col_count().max(1);
        let col_width = TEXT_WIDTH_TWIPS / ncols;

        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>"#
        );

        xml.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr>"#);
        xml.push_str(&run_xml(&self.style.heading));
        xml.push_str("</w:p>");

        xml.push_str(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/><w:jc w:val="center"/>"#,
        );
        xml.push_str(&borders_xml("tblBorders", true));
        xml.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/></w:tblPr>"#);

        xml.push_str("<w:tblGrid>");
        for _ in 0..ncols {
            xml.push_str(&format!(r#"<w:gridCol w:w="{col_width}"/>"#));
        }
        xml.push_str("</w:tblGrid>");

        for row in &self.rows {
            xml.push_str("<w:tr>");
            for col in 0..ncols {
                let text = row.get(col).map(String::as_str).unwrap_or("");
                xml.push_str(&format!(
                    r#"<w:tc><w:tcPr><w:tcW w:w="{col_width}" w:type="dxa"/>{}</w:tcPr>"#,
                    borders_xml("tcBorders", false)
                ));
                if text.is_empty() {
                    xml.push_str("<w:p/>");
                } else {
                    xml.push_str("<w:p>");
                    xml.push_str(&run_xml(text));
                    xml.push_str("</w:p>");
                }
                xml.push_str("</w:tc>");
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");

        // Word requires a paragraph between a trailing table and sectPr.
        xml.push_str("<w:p/>");
        xml.push_str(
            r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
        );
        xml.push_str("</w:body></w:document>");
        xml
    }

    fn styles_xml(&self) -> String {
        let font = escape(self.style.font_name.as_str());
        let half_points = self.style.font_size_pt * 2;

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}">
<w:docDefaults>
<w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault>
<w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault>
</w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="480" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:bCs/><w:color w:val="2F5496"/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style>
<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>
<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:tblPr>{}</w:tblPr></w:style>
</w:styles>"#,
            borders_xml("tblBorders", true)
        )
    }
}

/// Single black lines on every edge; `inside` adds the inner grid lines that
/// only make sense at table level.
fn borders_xml(element: &str, inside: bool) -> String {
    let sides: &[&str] = if inside {
        &["top", "left", "bottom", "right", "insideH", "insideV"]
    } else {
        &["top", "left", "bottom", "right"]
    };
    let mut xml = format!("<w:{element}>");
    for side in sides {
        xml.push_str(&format!(
            r#"<w:{side} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#
        ));
    }
    xml.push_str(&format!("</w:{element}>"));
    xml
}

/// One run per paragraph; tabs and line breaks become their own elements.
fn run_xml(text: &str) -> String {
    let text = sanitize(text);
    let mut xml = String::from("<w:r>");
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                xml.push_str("<w:tab/>");
            }
            if !segment.is_empty() {
                xml.push_str(r#"<w:t xml:space="preserve">"#);
                xml.push_str(&escape(segment));
                xml.push_str("</w:t>");
            }
        }
    }
    xml.push_str("</w:r>");
    xml
}

/// Drops characters XML 1.0 cannot carry and normalizes line endings.
fn sanitize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .map(|c| if c == '\r' { '\n' } else { c })
        .filter(|&c| {
            matches!(c, '\t' | '\n')
                || (c >= '\u{20}' && c != '\u{fffe}' && c != '\u{ffff}')
        })
        .collect()
}

fn root_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{REL_NS}">
    <Relationship Id="rId1" Type="{OFFICE_DOCUMENT_REL}" Target="word/document.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    )
}

fn document_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{REL_NS}">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
    )
}

fn core_xml() -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>Data from Excel</dc:title>
    <dc:creator>dttable</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>
</cp:coreProperties>"#
    )
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
    <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
    <Application>dttable</Application>
</Properties>"#;
