use tracing::Level;

/// Environment variable consulted when no log level is given on the command line.
pub const LOG_ENV: &str = "HUFFPACK_LOG";

/// Run settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: Level,
    /// Dump the tree and the packed bytes.
    pub verbose: bool,
    /// Frame huffman output with the frequency table. Off means bare wire bytes.
    pub container: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: Level::INFO,
            verbose: false,
            container: true,
        }
    }
}

impl Config {
    /// The command line level wins over the environment; anything
    /// unrecognised falls back to `info`.
    pub fn resolve(cli_level: Option<&str>, env_level: Option<&str>, verbose: bool, raw: bool) -> Self {
        let log_level = cli_level
            .or(env_level)
            .map(parse_level)
            .unwrap_or(Level::INFO);

        Config {
            log_level,
            verbose,
            container: !raw,
        }
    }

    pub fn from_env(cli_level: Option<&str>, verbose: bool, raw: bool) -> Self {
        let env_level = std::env::var(LOG_ENV).ok();
        Self::resolve(cli_level, env_level.as_deref(), verbose, raw)
    }
}

pub fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("loud"), Level::INFO);
    }

    #[test]
    fn test_cli_level_beats_env() {
        let config = Config::resolve(Some("error"), Some("trace"), false, false);
        assert_eq!(config.log_level, Level::ERROR);

        let config = Config::resolve(None, Some("trace"), true, true);
        assert_eq!(config.log_level, Level::TRACE);
        assert!(config.verbose);
        assert!(!config.container);

        assert_eq!(Config::resolve(None, None, false, false), Config::default());
    }
}
