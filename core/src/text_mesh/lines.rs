//! Line splitting and classification.
//!
//! The whole input is classified in one pass; the decoder then walks the
//! classified lines once per concern instead of re-reading the stream.

use crate::mesh::Attrib;

/// Literal that prefixes index declarations and index data lines.
pub(crate) const INDEX_TOKEN: &str = "index";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One meaningful line of a text mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `name=definition`, split at the first `=`. Both sides are trimmed.
    Declaration { name: &'a str, definition: &'a str },
    /// `<attribute> <values...>`
    AttribData { attrib: Attrib, values: &'a str },
    /// `index <values...>`
    IndexData { values: &'a str },
}

/// A classified line and its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberedLine<'a> {
    pub number: usize,
    pub line: Line<'a>,
}

/// Iterate over non-blank lines with surrounding whitespace removed.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`, and each ending counts as one
/// line. A leading byte order mark is skipped.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Classify one trimmed line.
///
/// Returns `None` for lines the format ignores.
pub(crate) fn classify(line: &str) -> Option<Line<'_>> {
    if let Some((name, definition)) = line.split_once('=') {
        return Some(Line::Declaration {
            name: name.trim(),
            definition: definition.trim(),
        });
    }

    let (head, values) = match line.split_once(char::is_whitespace) {
        Some((head, values)) => (head, values.trim_start()),
        None => (line, ""),
    };

    if head == INDEX_TOKEN {
        return Some(Line::IndexData { values });
    }

    Attrib::from_name(head).map(|attrib| Line::AttribData { attrib, values })
}

/// Classify every line of `text`, dropping ignored ones.
pub(crate) fn classify_all(text: &str) -> Vec<NumberedLine<'_>> {
    content_lines(text)
        .filter_map(|(number, content)| {
            let line = classify(content);
            if line.is_none() {
                log::trace!("text mesh line {number} ignored: {content}");
            }
            line.map(|line| NumberedLine { number, line })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_lines_handles_all_line_endings() {
        let text = "  a \r\nb\n\nc\rd\r\n\t\r\n";
        let lines: Vec<_> = content_lines(text).collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (4, "c"), (5, "d")]);
    }

    #[test]
    fn test_content_lines_numbers_lone_cr() {
        let lines: Vec<_> = content_lines("a\rb\r\rc\r").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (4, "c")]);
    }

    #[test]
    fn test_content_lines_skips_byte_order_mark() {
        let lines: Vec<_> = content_lines("\u{feff}position=3 float\r\nposition 1 2 3").collect();
        assert_eq!(lines, vec![(1, "position=3 float"), (2, "position 1 2 3")]);
    }

    #[test]
    fn test_classify_declaration() {
        assert_eq!(
            classify("position = 3 float"),
            Some(Line::Declaration {
                name: "position",
                definition: "3 float"
            })
        );
        assert_eq!(
            classify("index=uint16"),
            Some(Line::Declaration {
                name: "index",
                definition: "uint16"
            })
        );
    }

    #[test]
    fn test_classify_data() {
        assert_eq!(
            classify("normal 0 1 0"),
            Some(Line::AttribData {
                attrib: Attrib::Normal,
                values: "0 1 0"
            })
        );
        assert_eq!(
            classify("index\t0 1 2"),
            Some(Line::IndexData { values: "0 1 2" })
        );
        assert_eq!(
            classify("texcoord7"),
            Some(Line::AttribData {
                attrib: Attrib::TexCoord7,
                values: ""
            })
        );
    }

    #[test]
    fn test_classify_ignores_unknown_lines() {
        assert_eq!(classify("# Exported by C4D"), None);
        assert_eq!(classify("vertex 1 2 3"), None);
        assert_eq!(classify("Position 1 2 3"), None);
    }

    #[test]
    fn test_classify_all_keeps_line_numbers() {
        let lines = classify_all("# header\r\nposition=3 float\r\n\r\nposition 1 2 3\r\n");
        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 4]);
    }
}
