//! Multi-row header reconstruction.

/// Collapses internal whitespace runs and trims a header value.
///
/// Also strips a leading byte-order mark.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Forward-fills blank header cells left by merged spreadsheet cells.
///
/// `rows` holds one `Vec` per header level, top level first. A blank cell at
/// level 0 takes the nearest non-blank value to its left. A blank cell at a
/// lower level takes the value to its left only when the cell above it was
/// itself filled, i.e. the column continues a merged span. All rows are padded
/// to the same width; cells that cannot be filled stay empty.
pub fn forward_fill_headers(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut filled: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    let mut inherited_above = vec![true; width];

    for row in rows {
        let mut out: Vec<String> = Vec::with_capacity(width);
        let mut inherited = vec![false; width];
        for column in 0..width {
            let value = row
                .get(column)
                .map(String::as_str)
                .map(normalize_header)
                .unwrap_or_default();
            if !value.is_empty() {
                out.push(value);
                continue;
            }
            let can_inherit = column > 0 && inherited_above[column];
            match out.last() {
                Some(left) if can_inherit && !left.is_empty() => {
                    let left = left.clone();
                    out.push(left);
                    inherited[column] = true;
                }
                _ => out.push(String::new()),
            }
        }
        filled.push(out);
        inherited_above = inherited;
    }

    filled
}
