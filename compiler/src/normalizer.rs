use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    pub static ref BLOCK_COMMENT_RX: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
}

/// One trimmed, comment-free, non-empty statement line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text:   String,
    /// 1-based line number in the original text.
    pub number: usize,
}

/// Strips `/* */` and `//` comments and drops blank lines.
///
/// Block comments are replaced by the newlines they contained, so `number` still points
/// at the original source line.
pub fn normalize(text: &str) -> Vec<Line> {
    let stripped = BLOCK_COMMENT_RX.replace_all(text, |caps: &Captures| {
        "\n".repeat(caps[0].matches('\n').count())
    });

    let mut lines = Vec::new();
    for (i, raw) in stripped.split('\n').enumerate() {
        let without_comment = match raw.find("//") {
            Some(index) => &raw[..index],
            None => raw,
        };
        let trimmed = without_comment.trim();
        if trimmed.is_empty() {
            continue;
        }
        lines.push(Line {
            text:   trimmed.to_string(),
            number: i + 1,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple() {
        let input = "message Foo {\n  required uint32 count = 1;\n}\n";
        let expected = vec![
            Line { text: "message Foo {".into(),               number: 1 },
            Line { text: "required uint32 count = 1;".into(),  number: 2 },
            Line { text: "}".into(),                           number: 3 },
        ];
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_normalize_strips_line_comments_and_blanks() {
        let input = "// header\n\n   \nsyntax = \"proto2\"; // trailing\n";
        let expected = vec![Line { text: "syntax = \"proto2\";".into(), number: 4 }];
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_normalize_block_comment_keeps_line_numbers() {
        let input = "/* one\n two\n three */\nmessage A {\n/* inline */ }";
        let expected = vec![
            Line { text: "message A {".into(), number: 4 },
            Line { text: "}".into(),           number: 5 },
        ];
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_normalize_handles_crlf() {
        let input = "message A {\r\n}\r\n";
        let lines = normalize(input);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "}");
    }
}
