use datitos_common::Database;

mod parser;
pub use parser::{ParseError, Parser, Warning};

mod line_parser;

pub fn parse(document: &str) -> Result<(Database, Vec<Warning>), ParseError> {
    let mut parser = Parser::new();
    parser.parse(document)
}
