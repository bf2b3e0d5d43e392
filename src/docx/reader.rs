use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{DocxError, DocxResult, OFFICE_DOCUMENT_REL};

/// Rows of raw cell text. Rows may have different lengths.
pub type TextGrid = Vec<Vec<String>>;

const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Reads every top-level body table of a .docx file, in document order.
///
/// Cell text keeps its paragraph breaks as `\n` and tabs as `\t`; callers
/// decide how to normalize it. A cell spanning several grid columns is
/// repeated once per column, and a vertically merged continuation cell
/// repeats the text of the cell above it.
pub fn read_tables<P: AsRef<Path>>(path: P) -> DocxResult<Vec<TextGrid>> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

    let main_part = main_document_part(&mut archive)?;
    let xml = read_part(&mut archive, &main_part)?;
    parse_tables(&xml)
}

fn read_part<R: Read + Seek>(archive: &mut zip::ZipArchive<R>, name: &str) -> DocxResult<String> {
    let mut file = archive
        .by_name(name)
        .map_err(|_| DocxError::MissingPart(name.to_string()))?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Resolves the officeDocument relationship from `_rels/.rels`.
fn main_document_part<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> DocxResult<String> {
    let rels = match read_part(archive, "_rels/.rels") {
        Ok(xml) => xml,
        Err(DocxError::MissingPart(_)) => return Ok(DEFAULT_MAIN_PART.to_string()),
        Err(e) => return Err(e),
    };

    let mut reader = Reader::from_str(&rels);
    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                if attr(&e, b"Type").as_deref() == Some(OFFICE_DOCUMENT_REL) {
                    if let Some(target) = attr(&e, b"Target") {
                        return Ok(target.trim_start_matches('/').to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(DEFAULT_MAIN_PART.to_string())
}

fn attr(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VMerge {
    None,
    Restart,
    Continue,
}

#[derive(Debug)]
struct CellState {
    text: String,
    paragraphs: usize,
    span: usize,
    vmerge: VMerge,
    grid_col: usize,
}

/// Streaming parse of the main document part.
fn parse_tables(xml: &str) -> DocxResult<Vec<TextGrid>> {
    let mut reader = Reader::from_str(xml);

    let mut tables = Vec::new();
    let mut table_depth = 0usize;
    let mut textbox_depth = 0usize;
    let mut rows: TextGrid = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<CellState> = None;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event()?;
        // Only the outermost table of the body is collected; nested tables
        // and tables in text boxes are skipped.
        let collecting = table_depth == 1 && textbox_depth == 0;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"txbxContent" => textbox_depth += 1,
                _ if textbox_depth > 0 => {}
                b"tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        rows = Vec::new();
                    }
                }
                b"tr" if collecting => row = Some(Vec::new()),
                b"tc" if collecting => {
                    let grid_col = row.as_ref().map_or(0, Vec::len);
                    cell = Some(CellState {
                        text: String::new(),
                        paragraphs: 0,
                        span: 1,
                        vmerge: VMerge::None,
                        grid_col,
                    });
                }
                b"p" if collecting => {
                    if let Some(c) = cell.as_mut() {
                        if c.paragraphs > 0 {
                            c.text.push('\n');
                        }
                        c.paragraphs += 1;
                    }
                }
                b"r" if collecting => in_run = true,
                b"t" if collecting && in_run => in_text = true,
                name if collecting => cell_property(&e, name, cell.as_mut()),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                _ if !collecting => {}
                b"p" => {
                    if let Some(c) = cell.as_mut() {
                        if c.paragraphs > 0 {
                            c.text.push('\n');
                        }
                        c.paragraphs += 1;
                    }
                }
                b"tab" if in_run => push_text(cell.as_mut(), "\t"),
                b"br" | b"cr" if in_run => push_text(cell.as_mut(), "\n"),
                name => cell_property(&e, name, cell.as_mut()),
            },
            Event::Text(t) if collecting && in_text => {
                push_text(cell.as_mut(), &t.unescape()?);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"txbxContent" => textbox_depth = textbox_depth.saturating_sub(1),
                _ if textbox_depth > 0 => {}
                b"tbl" => {
                    if table_depth == 1 {
                        tables.push(std::mem::take(&mut rows));
                    }
                    table_depth = table_depth.saturating_sub(1);
                }
                b"tr" if collecting => {
                    if let Some(r) = row.take() {
                        rows.push(r);
                    }
                }
                b"tc" if collecting => {
                    if let (Some(c), Some(r)) = (cell.take(), row.as_mut()) {
                        let text = match c.vmerge {
                            VMerge::Continue => rows
                                .last()
                                .and_then(|above| above.get(c.grid_col))
                                .cloned()
                                .unwrap_or_default(),
                            VMerge::None | VMerge::Restart => c.text,
                        };
                        for _ in 0..c.span {
                            r.push(text.clone());
                        }
                    }
                }
                b"r" if collecting => in_run = false,
                b"t" if collecting => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tables)
}

fn push_text(cell: Option<&mut CellState>, text: &str) {
    if let Some(c) = cell {
        c.text.push_str(text);
    }
}

/// Picks up `w:gridSpan` and `w:vMerge` from a cell's properties.
fn cell_property(e: &BytesStart<'_>, name: &[u8], cell: Option<&mut CellState>) {
    let Some(c) = cell else {
        return;
    };
    match name {
        b"gridSpan" => {
            c.span = attr(e, b"val")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(1);
        }
        b"vMerge" => {
            c.vmerge = match attr(e, b"val").as_deref() {
                Some("restart") => VMerge::Restart,
                _ => VMerge::Continue,
            };
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(inner: &str) -> String {
        format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{inner}</w:body></w:document>"#
        )
    }

    fn tc(text: &str) -> String {
        format!(r#"<w:tc><w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p></w:tc>"#)
    }

    #[test]
    fn reads_irregular_rows() {
        let xml = body(&format!(
            "<w:tbl><w:tr>{}{}{}</w:tr><w:tr>{}{}</w:tr></w:tbl>",
            tc("x"),
            tc("y"),
            tc("z"),
            tc("1"),
            tc("2")
        ));
        let tables = parse_tables(&xml).unwrap();
        assert_eq!(tables, vec![vec![vec!["x", "y", "z"], vec!["1", "2"]]]);
    }

    #[test]
    fn paragraphs_tabs_and_breaks_become_whitespace() {
        let xml = body(
            r#"<w:tbl><w:tr><w:tc><w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c &amp; d</w:t></w:r></w:p><w:p><w:r><w:t>e</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        let tables = parse_tables(&xml).unwrap();
        assert_eq!(tables[0][0][0], "a\tb\nc & d\ne");
    }

    #[test]
    fn nested_tables_are_not_listed_or_mixed_into_cells() {
        let nested = format!("<w:tbl><w:tr>{}</w:tr></w:tbl>", tc("inner"));
        let xml = body(&format!(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>outer</w:t></w:r></w:p>{nested}<w:p/></w:tc></w:tr></w:tbl><w:p/><w:tbl><w:tr>{}</w:tr></w:tbl>"#,
            tc("second")
        ));
        let tables = parse_tables(&xml).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0][0][0], "outer\n");
        assert_eq!(tables[1][0][0], "second");
    }

    #[test]
    fn merged_cells_repeat_their_text() {
        let xml = body(
            r#"<w:tbl>
<w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>wide</w:t></w:r></w:p></w:tc><w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>tall</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc><w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc></w:tr>
</w:tbl>"#,
        );
        let tables = parse_tables(&xml).unwrap();
        assert_eq!(
            tables[0],
            vec![vec!["wide", "wide", "tall"], vec!["a", "b", "tall"]]
        );
    }

    #[test]
    fn document_without_tables_is_empty() {
        let xml = body("<w:p><w:r><w:t>just text</w:t></w:r></w:p>");
        assert!(parse_tables(&xml).unwrap().is_empty());
    }
}
