use anyhow::Result;

/// Writes sample.xlsx with a small block at C2:E5 for trying excel2word:
///
///     excel2word --excel sample.xlsx --row-start 2 --row-end 5 --col-start C --col-end E
fn main() -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();

    let rows: [[&str; 3]; 4] = [
        ["Item", "Qty", "Note"],
        ["Apples", "12", "fresh"],
        ["Pears", "3", ""],
        ["Plums", "7", "two  spaces"],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell = sheet.get_cell_mut((3 + c as u32, 2 + r as u32));
            if r > 0 && c == 1 {
                // numeric cell, exported as "12" rather than "12.0"
                cell.set_value_number(value.parse::<f64>()?);
            } else {
                cell.set_value_string(*value);
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, "sample.xlsx")?;
    println!("Wrote sample.xlsx");
    Ok(())
}
