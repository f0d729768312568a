//! ANSI styling and column layout for cost sheets printed to a terminal.

use std::io;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const GREY: &str = "\x1b[90m";

pub(super) fn bold(text: &str) -> String {
    format!("{BOLD}{text}{RESET}")
}

pub(super) fn red(text: &str) -> String {
    format!("{RED}{text}{RESET}")
}

pub(super) fn green(text: &str) -> String {
    format!("{GREEN}{text}{RESET}")
}

/// Greys out the box-drawing characters of a rendered table.
pub(super) fn dim_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len());
    let mut dimmed = false;

    for ch in table.chars() {
        let border = matches!(ch, '\u{2500}'..='\u{257F}');

        if border != dimmed {
            out.push_str(if border { GREY } else { RESET });
            dimmed = border;
        }

        out.push(ch);
    }

    if dimmed {
        out.push_str(RESET);
    }

    out
}

/// Characters a terminal shows for `text`, not counting escape sequences.
pub(super) fn visible_width(text: &str) -> usize {
    let mut chars = text.chars();
    let mut width = 0_usize;

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // An escape sequence ends at its first letter.
            _ = chars.find(char::is_ascii_alphabetic);
        } else {
            width = width.saturating_add(1);
        }
    }

    width
}

/// Writes label/value pairs as two right-aligned columns.
pub(super) fn write_columns(
    out: &mut impl io::Write,
    lines: &[(String, String)],
) -> io::Result<()> {
    let label_width = column_width(lines.iter().map(|(label, _)| label.as_str()));
    let value_width = column_width(lines.iter().map(|(_, value)| value.as_str()));

    for (label, value) in lines {
        let label_pad = label_width.saturating_sub(visible_width(label));
        let value_pad = value_width.saturating_sub(visible_width(value));

        writeln!(out, " {:label_pad$}{label}  {:value_pad$}{value}", "", "")?;
    }

    Ok(())
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(visible_width).max().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn visible_width_ignores_ansi_sequences() {
        assert_eq!(visible_width(&bold("Total:")), 6);
        assert_eq!(visible_width("£2.50"), 5);
    }

    #[test]
    fn dim_borders_wraps_each_run_once() {
        assert_eq!(
            dim_borders("╭──╮\n│a│"),
            format!("{GREY}╭──╮{RESET}\n{GREY}│{RESET}a{GREY}│{RESET}")
        );
    }

    #[test]
    fn columns_align_on_visible_width() -> TestResult {
        let mut out = Vec::new();

        write_columns(
            &mut out,
            &[
                (bold("Total:"), "£10.00".to_string()),
                ("Per unit:".to_string(), red("N/A")),
            ],
        )?;

        let printed = String::from_utf8(out)?;
        let widths: Vec<usize> = printed.lines().map(visible_width).collect();

        assert_eq!(widths, vec![18, 18]);

        Ok(())
    }
}
