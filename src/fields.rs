//! Line and TAB-field handling around the converter.

use std::num::NonZeroUsize;

use crate::convert::convert;
use crate::options::Options;

/// What part of a line is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
    /// The whole line is replaced by its conversion.
    #[default]
    Line,
    /// Field N (1-based, TAB-separated) is converted and prepended to the
    /// unchanged line as a new first column.
    Field(NonZeroUsize),
}

/// Converts one input line. A trailing `\n` or `\r\n` is kept.
pub fn convert_line(line: &str, mode: FieldMode, options: &Options) -> String {
    let (body, ending) = split_ending(line);
    match mode {
        FieldMode::Line => convert(body, options) + ending,
        FieldMode::Field(n) => {
            let field = body.split('\t').nth(n.get() - 1).unwrap_or_else(|| {
                log::warn!("line has no field {n}: {body:?}");
                ""
            });
            format!("{}\t{body}{ending}", convert(field, options))
        }
    }
}

fn split_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(n: usize) -> FieldMode {
        FieldMode::Field(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn line_mode_converts_everything() {
        let line = "bägga ahka\n";
        assert_eq!(
            convert_line(line, FieldMode::Line, &Options::default()),
            "beäg'ga ahkka\n"
        );
    }

    #[test]
    fn field_mode_prepends_converted_field() {
        let line = "bägga\tstorm\t12\n";
        assert_eq!(
            convert_line(line, field(1), &Options::default()),
            "beäg'ga\tbägga\tstorm\t12\n"
        );
    }

    #[test]
    fn field_mode_selects_by_index() {
        let line = "12\tahka\twuorrat";
        assert_eq!(
            convert_line(line, field(2), &Options::default()),
            "ahkka\t12\tahka\twuorrat"
        );
    }

    #[test]
    fn missing_field_converts_as_empty() {
        let line = "ahka\n";
        assert_eq!(
            convert_line(line, field(3), &Options::default()),
            "\tahka\n"
        );
    }

    #[test]
    fn crlf_endings_are_kept() {
        assert_eq!(
            convert_line("ahka\tx\r\n", field(1), &Options::default()),
            "ahkka\tahka\tx\r\n"
        );
        assert_eq!(
            convert_line("ahka\r\n", FieldMode::Line, &Options::default()),
            "ahkka\r\n"
        );
    }
}
