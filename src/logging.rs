//! log4rs setup.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const STDERR_PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Logger config used when no YAML file is present: one stderr appender at `level`.
pub fn stderr_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Initialise logging.
///
/// # Arguments
/// * `log_config` - log4rs YAML file, used when it exists
/// * `level` - Threshold for the stderr fallback
///
/// Results go to stdout, so logs never mix with them.
pub fn init(log_config: &Path, level: LevelFilter) -> Result<(), Box<dyn Error>> {
    if log_config.exists() {
        log4rs::init_file(log_config, Default::default())?;
        log::debug!("Logging configured from {}", log_config.display());
        return Ok(());
    }

    log4rs::init_config(stderr_config(level)?)?;
    log::debug!("Logging to stderr at {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_config() {
        for level in [LevelFilter::Off, LevelFilter::Warn, LevelFilter::Trace] {
            let config = stderr_config(level).unwrap();
            assert_eq!(config.root().level(), level);
            assert_eq!(config.root().appenders(), ["stderr"]);
            assert_eq!(config.appenders().len(), 1);
            assert_eq!(config.appenders()[0].name(), "stderr");
        }
    }

    #[test]
    fn test_yaml_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log4rs.yml");
        std::fs::write(
            &path,
            "appenders:\n  stderr:\n    kind: console\n    target: stderr\nroot:\n  level: info\n  appenders:\n    - stderr\n",
        )
        .unwrap();
        let config = log4rs::config::load_config_file(&path, Default::default()).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Info);
        assert_eq!(config.appenders()[0].name(), "stderr");
    }
}
