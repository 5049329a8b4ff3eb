use std::collections::HashMap;
use std::path::PathBuf;

use log::*;
use serde::{Deserialize, Serialize};

use infra::persistence::{self, Store};

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    pub db: SledConfig,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SledConfig {
    pub path: PathBuf,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl SledConfig {
    pub(crate) fn build(&self) -> Result<Store, persistence::Error> {
        debug!("Open document store at {:?}", self.path);
        Store::open(&self.path)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    #[serde(default)]
    modules: HashMap<String, LogLevel>,
    #[serde(default)]
    timestamp_nanos: bool,
}

impl LogLevel {
    fn to_filter(&self) -> log::LevelFilter {
        match self {
            &LogLevel::Off => log::LevelFilter::Off,
            &LogLevel::Error => log::LevelFilter::Error,
            &LogLevel::Warn => log::LevelFilter::Warn,
            &LogLevel::Info => log::LevelFilter::Info,
            &LogLevel::Debug => log::LevelFilter::Debug,
            &LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level.as_ref() {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(&module, level.to_filter());
        }

        b.default_format_timestamp_nanos(self.timestamp_nanos);

        return b;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            [db]
            path = "orders.db"
            "#,
        )
        .expect("parse config");

        assert_eq!(config.db.path, PathBuf::from("orders.db"));
    }

    #[test]
    fn parses_logger_settings() {
        let logger: EnvLogger = toml::from_str(
            r#"
            level = "info"
            [modules]
            "mealcart::orders" = "debug"
            "#,
        )
        .expect("parse logger");

        assert!(logger.level.is_some());
        assert_eq!(logger.modules.len(), 1);
    }
}
