use datitos_common::{Database, SectionId};

/// A temporary search-result marker. The view derives the marked occurrences
/// at draw time, so expiry is just the deletion of this record; nothing is
/// ever written into the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub section: SectionId,
    pub query: String,
    pub expires_at_ms: u64,
}

/// A highlight waiting for its navigation to complete. Dropped if a newer
/// navigation supersedes the one that scheduled it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHighlight {
    pub section: SectionId,
    pub query: String,
    pub generation: u64,
}

/// First section in catalog order whose title or body contains `query`.
/// Matching is ASCII case-insensitive; only the first match is reported.
pub fn find_first_match(database: &Database, query: &str) -> Option<SectionId> {
    let needle = query.to_ascii_lowercase();
    database.catalog().find(|&section_id| {
        let section = &database.sections[section_id];
        let title = &database.strings[section.title];
        title.to_ascii_lowercase().contains(&needle)
            || section.body.iter().any(|&line| {
                database.strings[line].to_ascii_lowercase().contains(&needle)
            })
    })
}

/// Byte ranges of every non-overlapping occurrence of `query` in `text`,
/// ASCII case-insensitive. Lowercasing is ASCII-only so the ranges index the
/// original text directly.
pub fn occurrences(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_ascii_lowercase();
    let needle = query.to_ascii_lowercase();
    let mut ranges = Vec::new();
    let mut start = 0;

    while let Some(position) = haystack[start..].find(&needle) {
        let begin = start + position;
        ranges.push((begin, begin + needle.len()));
        start = begin + needle.len();
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use datitos_common::Section;

    fn database(sections: &[(&str, &str, &[&str])]) -> Database {
        let mut db = Database::new();
        for (name, title, body) in sections {
            let name_id = db.add_string(name.to_string());
            let title_id = db.add_string(title.to_string());
            let mut section = Section::new(name_id, title_id);
            for line in *body {
                let line_id = db.add_string(line.to_string());
                section.body.push(line_id);
            }
            db.add_section(section);
        }
        db
    }

    #[test]
    fn test_first_match_in_catalog_order() {
        let db = database(&[
            ("intro", "Intro", &["hello world"]),
            ("genesis", "Genesis", &["foo bar"]),
            ("outro", "Outro", &["more bar here"]),
        ]);

        assert_eq!(find_first_match(&db, "bar"), Some(1));
        assert_eq!(find_first_match(&db, "hello"), Some(0));
        assert_eq!(find_first_match(&db, "zzz"), None);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let db = database(&[("intro", "Intro", &["Hello World"])]);
        assert_eq!(find_first_match(&db, "hello"), Some(0));
        assert_eq!(find_first_match(&db, "WORLD"), Some(0));
    }

    #[test]
    fn test_title_text_matches_too() {
        let db = database(&[("intro", "Cartography", &["maps"])]);
        assert_eq!(find_first_match(&db, "carto"), Some(0));
    }

    #[test]
    fn test_occurrences_finds_every_instance() {
        assert_eq!(occurrences("bar in a barn", "bar"), vec![(0, 3), (9, 12)]);
        assert_eq!(occurrences("no match", "bar"), Vec::new());
        assert_eq!(occurrences("BARbar", "bar"), vec![(0, 3), (3, 6)]);
    }

    #[test]
    fn test_occurrences_with_empty_query() {
        assert_eq!(occurrences("anything", ""), Vec::new());
    }
}
