#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use dttable::value::cell_text;

/// Writes an xlsx whose active sheet holds `cells` as (col, row, text).
pub fn write_xlsx(path: &Path, cells: &[(u32, u32, &str)]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();
    for &(col, row, text) in cells {
        sheet.get_cell_mut((col, row)).set_value_string(text);
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Writes a bare .docx containing one table per entry of `tables`, rows
/// allowed to differ in length.
pub fn write_docx(path: &Path, tables: &[Vec<Vec<&str>>]) {
    let mut body = String::new();
    for table in tables {
        body.push_str("<w:tbl><w:tblPr/>");
        for row in table {
            body.push_str("<w:tr>");
            for cell in row {
                body.push_str(&format!(
                    r#"<w:tc><w:p><w:r><w:t xml:space="preserve">{cell}</w:t></w:r></w:p></w:tc>"#
                ));
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl><w:p/>");
    }
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#).unwrap();
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#).unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap();
}

/// Text of `rows` x `cols` (1-based, inclusive) of the first sheet.
pub fn read_block(path: &Path, rows: (u32, u32), cols: (u32, u32)) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&name).unwrap();
    (rows.0..=rows.1)
        .map(|r| {
            (cols.0..=cols.1)
                .map(|c| cell_text(range.get_value((r - 1, c - 1))))
                .collect()
        })
        .collect()
}
