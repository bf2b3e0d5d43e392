use calamine::Data;

/// Text shown for a spreadsheet cell. Absent and empty cells become `""`.
pub fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None => String::new(),
        Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(n)) => {
            if n.fract() == 0.0 && n.is_finite() {
                format!("{:.0}", n)
            } else {
                n.to_string()
            }
        }
        Some(Data::Int(n)) => n.to_string(),
        Some(Data::Bool(b)) => String::from(if *b { "TRUE" } else { "FALSE" }),
        Some(Data::Error(e)) => e.to_string(),
        Some(Data::DateTime(dt)) => match dt.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        Some(Data::DateTimeIso(s)) => s.clone(),
        Some(Data::DurationIso(s)) => s.clone(),
    }
}

/// Folds every whitespace run (non-breaking spaces included) into one ASCII
/// space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
