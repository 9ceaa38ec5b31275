use crate::ParseError;
use datitos_common::is_valid_section_name;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub raw_text: &'a str,
    pub file_path: Option<PathBuf>,
    pub line_number: usize,
}

/// Classification of a single document line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Blank,
    /// `# token: Title`
    Header { name: String, title: String },
    Text(String),
}

pub fn parse(line: Line) -> Result<ParsedLine, ParseError> {
    let trimmed = line.raw_text.trim();

    if trimmed.is_empty() {
        return Ok(ParsedLine::Blank);
    }

    let Some(rest) = trimmed.strip_prefix('#') else {
        return Ok(ParsedLine::Text(trimmed.to_string()));
    };

    if rest.starts_with('#') {
        return Err(ParseError::InvalidSectionHeader {
            message: "nested sections are not supported".to_string(),
            file: file_for(&line),
            line: line.line_number,
        });
    }

    let Some((name, title)) = rest.split_once(':') else {
        return Err(ParseError::InvalidSectionHeader {
            message: "expected `# token: Title`".to_string(),
            file: file_for(&line),
            line: line.line_number,
        });
    };

    let name = name.trim();
    let title = title.trim();

    if name.is_empty() || title.is_empty() {
        return Err(ParseError::InvalidSectionHeader {
            message: "expected `# token: Title`".to_string(),
            file: file_for(&line),
            line: line.line_number,
        });
    }

    if !is_valid_section_name(name) {
        return Err(ParseError::InvalidSectionName {
            name: name.to_string(),
            file: file_for(&line),
            line: line.line_number,
        });
    }

    Ok(ParsedLine::Header {
        name: name.to_string(),
        title: title.to_string(),
    })
}

fn file_for(line: &Line) -> PathBuf {
    line.file_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("<unknown>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw_text: &str) -> Line {
        Line {
            raw_text,
            file_path: None,
            line_number: 1,
        }
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse(line("")).unwrap(), ParsedLine::Blank);
        assert_eq!(parse(line("   ")).unwrap(), ParsedLine::Blank);
    }

    #[test]
    fn test_parse_text_line() {
        assert_eq!(
            parse(line("  The archipelago has nine charted islets.  ")).unwrap(),
            ParsedLine::Text("The archipelago has nine charted islets.".to_string())
        );
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(
            parse(line("# introduction: Introduction")).unwrap(),
            ParsedLine::Header {
                name: "introduction".to_string(),
                title: "Introduction".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_header_without_colon() {
        match parse(line("# introduction")) {
            Err(ParseError::InvalidSectionHeader { line: 1, .. }) => (),
            other => panic!("Expected InvalidSectionHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_header_with_empty_title() {
        assert!(parse(line("# introduction:")).is_err());
        assert!(parse(line("#: Title")).is_err());
    }

    #[test]
    fn test_parse_nested_header() {
        match parse(line("## deeper: Deeper")) {
            Err(ParseError::InvalidSectionHeader { message, .. }) => {
                assert_eq!(message, "nested sections are not supported");
            }
            other => panic!("Expected InvalidSectionHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_header_with_invalid_token() {
        match parse(line("# Bad Token: Title")) {
            Err(ParseError::InvalidSectionName { name, .. }) => {
                assert_eq!(name, "Bad Token");
            }
            other => panic!("Expected InvalidSectionName, got {:?}", other),
        }
    }

    #[test]
    fn test_error_carries_file_path() {
        let result = parse(Line {
            raw_text: "## x: X",
            file_path: Some(PathBuf::from("islets.datitos")),
            line_number: 7,
        });
        match result {
            Err(ParseError::InvalidSectionHeader { file, line, .. }) => {
                assert_eq!(file.to_str().unwrap(), "islets.datitos");
                assert_eq!(line, 7);
            }
            other => panic!("Expected InvalidSectionHeader, got {:?}", other),
        }
    }
}
