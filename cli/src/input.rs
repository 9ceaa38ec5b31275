/// Commands produced by both input channels: scripted tokens and
/// interactive console lines use the same grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `-> token` — pointer activation of a menu entry.
    Menu(String),
    /// A keyboard chord such as `ctrl+3`, `left`, `right` or `esc`.
    Chord(KeyChord),
    /// `ctrl+f query` — search with the query supplied in-line.
    Search(String),
    /// `w<ms>` — let the given amount of time pass.
    Wait(u64),
    ScrollUp,
    ScrollDown,
    Status,
    Quit,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub modifier: bool,
    pub key: Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Left,
    Right,
    Escape,
    F,
}

/// What a chord asks the controller to do. Unmodified digits and `f`
/// deliberately map to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    JumpTo(usize),
    Next,
    Previous,
    Home,
    OpenSearch,
}

/// The shortcut map: modifier+digit jumps to a catalog index, arrows move
/// sequentially, Escape goes home, modifier+F opens search.
pub fn action_for(chord: KeyChord) -> Option<Action> {
    match (chord.modifier, chord.key) {
        (true, Key::Digit(digit)) if (1..=9).contains(&digit) => {
            Some(Action::JumpTo(digit as usize - 1))
        }
        (false, Key::Left) => Some(Action::Previous),
        (false, Key::Right) => Some(Action::Next),
        (false, Key::Escape) => Some(Action::Home),
        (true, Key::F) => Some(Action::OpenSearch),
        _ => None,
    }
}

/// Parses one input token. `None` means the token is not recognized at all.
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Some(Command::Empty);
    }

    if let Some(target) = trimmed.strip_prefix("->") {
        return Some(Command::Menu(target.trim().to_string()));
    }

    if let Some(query) = trimmed.strip_prefix("ctrl+f ") {
        return Some(Command::Search(query.trim().to_string()));
    }

    if let Some(digits) = trimmed.strip_prefix('w') {
        if let Ok(ms) = digits.parse::<u64>() {
            return Some(Command::Wait(ms));
        }
    }

    match trimmed {
        "u" => return Some(Command::ScrollUp),
        "d" => return Some(Command::ScrollDown),
        "?" => return Some(Command::Status),
        "q" => return Some(Command::Quit),
        _ => {}
    }

    parse_chord(trimmed).map(Command::Chord)
}

fn parse_chord(input: &str) -> Option<KeyChord> {
    let (modifier, key_text) = match input.strip_prefix("ctrl+") {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let key = match key_text {
        "left" => Key::Left,
        "right" => Key::Right,
        "esc" => Key::Escape,
        "f" => Key::F,
        digit if digit.len() == 1 && digit.as_bytes()[0].is_ascii_digit() => {
            Key::Digit(digit.parse().ok()?)
        }
        _ => return None,
    };

    Some(KeyChord { modifier, key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_activation() {
        assert_eq!(
            parse_command("-> genesis"),
            Some(Command::Menu("genesis".to_string()))
        );
        assert_eq!(parse_command("->genesis"), Some(Command::Menu("genesis".to_string())));
    }

    #[test]
    fn test_search_with_inline_query() {
        assert_eq!(
            parse_command("ctrl+f dark matter"),
            Some(Command::Search("dark matter".to_string()))
        );
    }

    #[test]
    fn test_bare_search_chord_opens_search() {
        let command = parse_command("ctrl+f").unwrap();
        match command {
            Command::Chord(chord) => {
                assert_eq!(action_for(chord), Some(Action::OpenSearch));
            }
            other => panic!("Expected Chord, got {:?}", other),
        }
    }

    #[test]
    fn test_wait_token() {
        assert_eq!(parse_command("w100"), Some(Command::Wait(100)));
        assert_eq!(parse_command("w"), None);
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(parse_command("u"), Some(Command::ScrollUp));
        assert_eq!(parse_command("d"), Some(Command::ScrollDown));
        assert_eq!(parse_command("?"), Some(Command::Status));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("  "), Some(Command::Empty));
        assert_eq!(parse_command("banana"), None);
    }

    #[test]
    fn test_digit_chords_jump_to_catalog_index() {
        for digit in 1..=9u8 {
            let chord = KeyChord {
                modifier: true,
                key: Key::Digit(digit),
            };
            assert_eq!(action_for(chord), Some(Action::JumpTo(digit as usize - 1)));
        }
    }

    #[test]
    fn test_modifier_zero_maps_to_nothing() {
        let chord = KeyChord {
            modifier: true,
            key: Key::Digit(0),
        };
        assert_eq!(action_for(chord), None);
    }

    #[test]
    fn test_plain_digits_map_to_nothing() {
        let command = parse_command("3").unwrap();
        match command {
            Command::Chord(chord) => {
                assert!(!chord.modifier);
                assert_eq!(action_for(chord), None);
            }
            other => panic!("Expected Chord, got {:?}", other),
        }
    }

    #[test]
    fn test_arrows_and_escape() {
        let left = parse_command("left").unwrap();
        let right = parse_command("right").unwrap();
        let esc = parse_command("esc").unwrap();

        match (left, right, esc) {
            (Command::Chord(l), Command::Chord(r), Command::Chord(e)) => {
                assert_eq!(action_for(l), Some(Action::Previous));
                assert_eq!(action_for(r), Some(Action::Next));
                assert_eq!(action_for(e), Some(Action::Home));
            }
            other => panic!("Expected chords, got {:?}", other),
        }
    }

    #[test]
    fn test_modified_arrows_map_to_nothing() {
        match parse_command("ctrl+left").unwrap() {
            Command::Chord(chord) => assert_eq!(action_for(chord), None),
            other => panic!("Expected Chord, got {:?}", other),
        }
    }
}
