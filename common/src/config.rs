use std::path::Path;
use std::str::FromStr;

use crate::Result;
use crate::SectionName;

use serde::{Deserialize, Serialize};

/// Durations for the timed parts of the presentation, in milliseconds.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
#[serde(default)]
pub struct Timing {
    /// Exit cue shown on the outgoing section before it is hidden.
    pub exit_ms: u64,
    /// Gap between hiding the outgoing section and showing the target.
    pub enter_delay_ms: u64,
    /// Lifetime of a notification toast.
    pub toast_ms: u64,
    /// Lifetime of a search highlight.
    pub highlight_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            exit_ms: 300,
            enter_delay_ms: 150,
            toast_ms: 3000,
            highlight_ms: 5000,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct Config {
    #[serde(default)]
    pub timing: Timing,
    /// Section shown by Escape and used as the startup fallback.
    /// Defaults to the first section in the catalog.
    #[serde(default)]
    pub home: Option<SectionName>,
}

impl Config {
    pub fn load<T>(source_path: T) -> Result<Config>
    where
        T: AsRef<Path>,
    {
        let mut filename = source_path.as_ref().to_path_buf();
        filename.push("datitos.toml");
        let contents = match std::fs::read_to_string(&filename) {
            Ok(c) => c,
            Err(err) => {
                eprintln!("Could not read config file `{}`", filename.display());
                return Err(Box::new(err));
            }
        };

        contents.parse()
    }
}

impl FromStr for Config {
    type Err = Box<dyn std::error::Error>;

    fn from_str(s: &str) -> Result<Config> {
        let config: Config = match toml::from_str(s) {
            Ok(c) => c,
            Err(err) => return Err(Box::new(err)),
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = Timing::default();
        assert_eq!(timing.exit_ms, 300);
        assert_eq!(timing.enter_delay_ms, 150);
        assert_eq!(timing.toast_ms, 3000);
        assert_eq!(timing.highlight_ms, 5000);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = "[timing]\nexit_ms = 100\n".parse().unwrap();
        assert_eq!(config.timing.exit_ms, 100);
        assert_eq!(config.timing.enter_delay_ms, 150);
        assert_eq!(config.home, None);
    }

    #[test]
    fn test_parse_home_section() {
        let config: Config = "home = \"introduction\"\n".parse().unwrap();
        assert_eq!(config.home.as_deref(), Some("introduction"));
        assert_eq!(config.timing, Timing::default());
    }

    #[test]
    fn test_parse_empty_config_is_default() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
    }
}
