use std::path::Path;
use std::path::PathBuf;

/// A compatibility test: a document, a scripted input string and the
/// expected transcript, all in one markdown file.
#[derive(Clone)]
pub struct TestCase {
    pub name: String,
    pub document: String,
    pub input: String,
    pub result: String,
    pub path: PathBuf,
    pub disabled: bool,
}

fn parse_name(content: &str) -> String {
    content
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches('#')
        .trim()
        .to_string()
}

fn parse_fenced_block(content: &str, language: &str) -> String {
    content
        .split(&format!("```{}\n", language))
        .nth(1)
        .unwrap_or_default()
        .split("```")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

impl TestCase {
    pub fn from_string<A, B>(content: A, path: B) -> Self
    where
        A: AsRef<str>,
        B: AsRef<Path>,
    {
        let name = parse_name(content.as_ref());
        let document = parse_fenced_block(content.as_ref(), "datitos");
        let input = parse_fenced_block(content.as_ref(), "input");
        let result = parse_fenced_block(content.as_ref(), "result");
        let disabled = content.as_ref().trim().ends_with("!!! disabled");

        TestCase {
            name,
            document,
            input,
            result,
            path: path.as_ref().into(),
            disabled,
        }
    }
}

mod test {
    #[test]
    fn test_case_from_string_with_simple_test() {
        let content = "# Menu Navigation\n\nActivating a menu entry swaps sections.\n\n## Document\n```datitos\n# introduction: Introduction\nWelcome.\n```\n\n## Input\n```input\nq\n```\n\n## Result\n```result\n-> introduction: Introduction\nWelcome.\nQUIT\n```";

        let test_case = super::TestCase::from_string(content, "menu-navigation.md");

        assert_eq!(test_case.name, "Menu Navigation");
        assert_eq!(
            test_case.document,
            "# introduction: Introduction\nWelcome."
        );
        assert_eq!(test_case.input, "q");
        assert_eq!(
            test_case.result,
            "-> introduction: Introduction\nWelcome.\nQUIT"
        );
        assert_eq!(test_case.disabled, false);
    }

    #[test]
    fn test_case_from_string_with_disabled_test() {
        let content = "# Test Name\n\nTest description\n\n## Document\n```datitos\n# a: A\ntext\n```\n\n## Input\n```input\nq\n```\n\n## Result\n```result\ntext\n```\n\n!!! disabled";

        let test_case = super::TestCase::from_string(content, "test.md");

        assert_eq!(test_case.disabled, true);
    }
}
