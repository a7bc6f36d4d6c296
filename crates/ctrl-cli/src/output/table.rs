#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
    /// Right-align numeric cells. Off for two-column key/value tables.
    pub right_align_numbers: bool,
}

const MIN_WIDTH: usize = 4;
const SEPARATOR: &str = "  ";

/// Render an aligned table of string cells.
///
/// Widths are measured in characters, not bytes, so Spanish question text
/// lines up. Numeric cells are right-aligned when
/// [`TableOptions::right_align_numbers`] is set.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| width_of(cell))
                .max()
                .unwrap_or(0)
                .max(width_of(header))
                .max(MIN_WIDTH)
        })
        .collect();

    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(width_of(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(
                    &cell,
                    *width,
                    options.right_align_numbers && looks_numeric(&cell),
                );
                if options.color {
                    colorize(&cell, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn width_of(value: &str) -> usize {
    value.chars().count()
}

/// Narrow the widest shrinkable column one step at a time until the table
/// fits `max_width` or nothing can shrink further.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > width_of(headers[*idx]).max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    // Multi-line answers would break row alignment.
    let value = value.replace('\n', " ");
    if width_of(&value) <= width {
        return value;
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | '%'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(width_of(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap an already padded cell in an ANSI colour picked from its content.
fn colorize(cell: &str, padded: String) -> String {
    let code = match cell.to_ascii_uppercase().as_str() {
        "OPPORTUNITY" | "OK" | "TRUE" => "32",
        "WARNING" => "33",
        "CRITICAL" | "ERROR" | "FALSE" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
        right_align_numbers: true,
    };

    #[test]
    fn widths_count_characters() {
        let rows = vec![vec!["Comparación".to_string(), "1".to_string()]];
        let table = render_entity_table(&["name", "total"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(width_of(lines[0]), width_of(lines[2]));
    }

    #[test]
    fn long_cells_shrink_to_max_width() {
        let rows = vec![vec!["1".to_string(), "x".repeat(100)]];
        let table = render_entity_table(
            &["id", "question"],
            &rows,
            TableOptions {
                max_width: Some(40),
                ..PLAIN
            },
        );
        assert!(table.lines().all(|line| width_of(line) <= 40));
        assert!(table.contains('…'));
    }

    #[test]
    fn classification_cells_are_coloured() {
        let rows = vec![vec!["CRITICAL".to_string()]];
        let table = render_entity_table(
            &["classification"],
            &rows,
            TableOptions {
                color: true,
                ..PLAIN
            },
        );
        assert!(table.contains("\u{1b}[31mCRITICAL"));
    }

    #[test]
    fn numeric_alignment_is_optional() {
        let rows = vec![
            vec!["id".to_string(), "7".to_string()],
            vec!["question".to_string(), "a much longer question".to_string()],
        ];
        let aligned = render_entity_table(&["key", "value"], &rows, PLAIN);
        assert!(aligned.lines().nth(2).unwrap().ends_with(&format!("{}7", " ".repeat(21))));

        let left = TableOptions {
            right_align_numbers: false,
            ..PLAIN
        };
        let table = render_entity_table(&["key", "value"], &rows, left);
        assert_eq!(table.lines().nth(2), Some("id        7"));
    }

    #[test]
    fn newlines_never_reach_the_table() {
        let rows = vec![vec!["line one\nline two".to_string()]];
        let table = render_entity_table(&["answer"], &rows, PLAIN);
        assert_eq!(table.lines().count(), 3);
    }
}
