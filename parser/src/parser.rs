use crate::line_parser::{self, Line, ParsedLine};
use datitos_common::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{}:{line}: ERROR: Invalid section header: {message}", .file.display())]
    InvalidSectionHeader {
        message: String,
        file: PathBuf,
        line: usize,
    },
    #[error("{}:{line}: ERROR: Invalid section token: `{name}`", .file.display())]
    InvalidSectionName {
        name: String,
        file: PathBuf,
        line: usize,
    },
    #[error("{}:{line}: ERROR: Duplicate section: `{name}`", .file.display())]
    DuplicateSection {
        name: String,
        file: PathBuf,
        line: usize,
    },
    #[error("{}:{line}: ERROR: Content before the first section header", .file.display())]
    ContentOutsideSection { file: PathBuf, line: usize },
    #[error("ERROR: Document contains no sections")]
    EmptyDocument,
}

/// A non-fatal finding, printed before the document runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    pub file: Option<PathBuf>,
    pub line: usize,
}

#[derive(Debug, Default)]
pub struct Parser {
    file_path: Option<PathBuf>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            file_path: Some(path.into()),
        }
    }

    pub fn parse<A>(&mut self, document: A) -> Result<(Database, Vec<Warning>), ParseError>
    where
        A: AsRef<str>,
    {
        let mut database = Database::new();
        let mut warnings = Vec::new();
        // Section currently receiving body lines, with its header line number.
        let mut current: Option<(SectionId, usize)> = None;

        for (index, raw_text) in document.as_ref().lines().enumerate() {
            let line_number = index + 1;
            let line = Line {
                raw_text,
                file_path: self.file_path.clone(),
                line_number,
            };

            match line_parser::parse(line)? {
                ParsedLine::Blank => {}
                ParsedLine::Header { name, title } => {
                    if database.exists(&name) {
                        return Err(ParseError::DuplicateSection {
                            name,
                            file: self.error_file(),
                            line: line_number,
                        });
                    }
                    self.warn_if_empty(&database, current, &mut warnings);
                    let name_id = database.add_string(name);
                    let title_id = database.add_string(title);
                    let section_id = database.add_section(Section::new(name_id, title_id));
                    current = Some((section_id, line_number));
                }
                ParsedLine::Text(text) => match current {
                    Some((section_id, _)) => {
                        let string_id = database.add_string(text);
                        database.sections[section_id].body.push(string_id);
                    }
                    None => {
                        return Err(ParseError::ContentOutsideSection {
                            file: self.error_file(),
                            line: line_number,
                        });
                    }
                },
            }
        }

        if database.sections.is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        self.warn_if_empty(&database, current, &mut warnings);

        Ok((database, warnings))
    }

    fn warn_if_empty(
        &self,
        database: &Database,
        section: Option<(SectionId, usize)>,
        warnings: &mut Vec<Warning>,
    ) {
        if let Some((section_id, line)) = section {
            if database.sections[section_id].body.is_empty() {
                warnings.push(Warning {
                    message: format!(
                        "Section `{}` has no content",
                        database.section_name(section_id)
                    ),
                    file: self.file_path.clone(),
                    line,
                });
            }
        }
    }

    fn error_file(&self) -> PathBuf {
        self.file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("<unknown>"))
    }
}
