use std::path::PathBuf;
use tracing::Level;

/// The environment variable holding the log level.
pub const LOG_VAR: &str = "PTT_LOG";

/// How the host was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The script to run instead of reading commands interactively.
    pub script: Option<PathBuf>,

    /// Whether new chains start with the standard rules.
    pub prelude: bool,

    pub log_level: Level,

    /// Arguments and settings that were not understood. They are reported once logging is up.
    pub ignored: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script: None,
            prelude: true,
            log_level: Level::WARN,
            ignored: Vec::new(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1), std::env::var(LOG_VAR).ok().as_deref())
    }

    /// Builds the configuration from the arguments after the program name, and the value of
    /// [`LOG_VAR`].
    pub fn parse(args: impl IntoIterator<Item = String>, log: Option<&str>) -> Self {
        let mut config = Self::default();
        for arg in args {
            match arg.as_str() {
                "--no-prelude" => config.prelude = false,
                _ if arg.starts_with("--") || config.script.is_some() => config.ignored.push(arg),
                _ => config.script = Some(PathBuf::from(arg)),
            }
        }

        if let Some(log) = log {
            match log.parse() {
                Ok(level) => config.log_level = level,
                Err(_) => config.ignored.push(format!("{}={}", LOG_VAR, log)),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults() {
        assert_eq!(Config::parse(Vec::new(), None), Config::default());
    }

    #[test]
    fn script_and_flags() {
        let config = Config::parse(args(&["--no-prelude", "proof.ptt", "extra", "--fast"]), Some("debug"));
        assert_eq!(config.script, Some(PathBuf::from("proof.ptt")));
        assert!(!config.prelude);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.ignored, args(&["extra", "--fast"]));
    }

    #[test]
    fn bad_log_level_is_ignored() {
        let config = Config::parse(Vec::new(), Some("loud"));
        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.ignored, args(&["PTT_LOG=loud"]));
    }
}
