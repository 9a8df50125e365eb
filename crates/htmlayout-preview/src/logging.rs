use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "warn",
/// "htmlayout=debug"). When neither `filter` nor `RUST_LOG` is set, the level
/// comes from `verbose`: 0 warn, 1 info, 2 debug, 3+ trace.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub verbose: u8,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            verbose: 0,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match (&config.filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => builder.parse_filters(filter),
            (None, Ok(filter)) => builder.parse_filters(&filter),
            (None, Err(_)) => builder.filter_level(config.level()),
        };

        // stderr keeps the printed layout pipeable.
        builder
            .target(env_logger::Target::Stderr)
            .write_style(config.write_style)
            .format_timestamp(None)
            .init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        let level = |verbose| LoggingConfig { verbose, ..Default::default() }.level();
        assert_eq!(level(0), LevelFilter::Warn);
        assert_eq!(level(1), LevelFilter::Info);
        assert_eq!(level(2), LevelFilter::Debug);
        assert_eq!(level(7), LevelFilter::Trace);
    }
}
