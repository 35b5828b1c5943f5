//! Command line shared by the demo binaries

use clap::{value_parser, Arg, ArgMatches, Command};
use shape_engine::config::{AppConfig, Config, ConfigError};
use shape_engine::foundation::logging;
use shape_engine::{Application, Engine, EngineError};
use std::path::PathBuf;

/// Default configuration file, looked up relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "shapes.toml";

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    /// Configuration file (TOML or RON)
    pub config: PathBuf,
    /// Run this many frames without a window
    pub headless: Option<u32>,
    /// Overrides the configured log level
    pub log_level: Option<String>,
}

fn command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (.toml or .ron)")
                .default_value(DEFAULT_CONFIG_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .value_name("FRAMES")
                .help("Run without a window for the given number of frames")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter, e.g. info or shape_engine=debug (RUST_LOG still wins)"),
        )
}

fn options_from(matches: &ArgMatches) -> CliOptions {
    CliOptions {
        config: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        headless: matches.get_one::<u32>("headless").copied(),
        log_level: matches.get_one::<String>("log-level").cloned(),
    }
}

/// Parse the process arguments
pub fn parse(name: &'static str, about: &'static str) -> CliOptions {
    options_from(&command(name, about).get_matches())
}

impl CliOptions {
    /// Load the configuration, falling back to defaults when the file is absent
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        AppConfig::load_or_default(&self.config)
    }
}

/// Load config, start logging and run the application windowed or headless
pub fn run<A: Application>(
    options: &CliOptions,
    title: &str,
    app: &mut A,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = options.load_config()?;
    let level = options
        .log_level
        .clone()
        .unwrap_or_else(|| config.debug.log_level.clone());
    logging::init(&level);

    let config = config.with_title(title);
    match options.headless {
        Some(frames) => {
            let backend = Engine::run_headless(config, app, frames)?;
            let stats = backend.stats();
            log::info!(
                "Headless run finished: {} frames, {} draw calls, {} buffers created",
                stats.frames,
                stats.draw_calls,
                stats.buffers_created
            );
        }
        None => Engine::run_windowed(config, app).map_err(|e: EngineError| {
            log::error!("Engine stopped with an error: {e}");
            e
        })?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> CliOptions {
        options_from(&command("test", "test").get_matches_from(args))
    }

    #[test]
    fn test_defaults() {
        let options = parse_from(&["test"]);
        assert_eq!(options.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(options.headless, None);
        assert_eq!(options.log_level, None);
    }

    #[test]
    fn test_all_flags() {
        let options = parse_from(&["test", "--config", "demo.ron", "--headless", "5", "-l", "debug"]);
        assert_eq!(options.config, PathBuf::from("demo.ron"));
        assert_eq!(options.headless, Some(5));
        assert_eq!(options.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_bad_frame_count_rejected() {
        let result = command("test", "test").try_get_matches_from(["test", "--headless", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let options = parse_from(&["test", "--config", "definitely_missing_shapes.toml"]);
        assert_eq!(options.load_config().unwrap(), AppConfig::default());
    }
}
