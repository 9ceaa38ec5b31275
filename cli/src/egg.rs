/// Chord sequence that unlocks the marginalia toast.
const SEQUENCE: [&str; 5] = ["left", "right", "left", "right", "esc"];

/// Watches the raw chord tokens for the hidden sequence. Purely decorative:
/// a hit posts a toast and nothing else.
#[derive(Debug, Default)]
pub struct EggDetector {
    recent: Vec<String>,
}

impl EggDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chord token; true when the sequence just completed.
    pub fn observe(&mut self, token: &str) -> bool {
        self.recent.push(token.to_string());
        if self.recent.len() > SEQUENCE.len() {
            self.recent.remove(0);
        }

        let matched = self.recent.len() == SEQUENCE.len()
            && self.recent.iter().zip(SEQUENCE.iter()).all(|(a, b)| a == b);
        if matched {
            self.recent.clear();
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_fires_on_last_chord() {
        let mut egg = EggDetector::new();
        assert!(!egg.observe("left"));
        assert!(!egg.observe("right"));
        assert!(!egg.observe("left"));
        assert!(!egg.observe("right"));
        assert!(egg.observe("esc"));
    }

    #[test]
    fn test_noise_resets_nothing_but_the_window() {
        let mut egg = EggDetector::new();
        for token in ["left", "right", "ctrl+3", "left", "right", "left", "right"] {
            assert!(!egg.observe(token));
        }
        assert!(egg.observe("esc"));
    }

    #[test]
    fn test_can_fire_twice() {
        let mut egg = EggDetector::new();
        for _ in 0..2 {
            for token in ["left", "right", "left", "right"] {
                assert!(!egg.observe(token));
            }
            assert!(egg.observe("esc"));
        }
    }
}
