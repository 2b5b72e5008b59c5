use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::{init_config, Config, Handle};
use std::sync::RwLock;

lazy_static! {
    #[doc(hidden)]
    static ref HANDLE: RwLock<Option<Handle>> = RwLock::new(None);
}

#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum LogConfigError {
    IOError(std::io::Error),
    Config(log4rs::config::runtime::ConfigErrors),
    SetLogger(log::SetLoggerError),
    #[display(fmt = "Log handle is poisoned.")]
    #[from(ignore)]
    Poisoned,
}

impl std::error::Error for LogConfigError {}

/// Build logging config.
/// * `level` - The level of root logger
/// * `log_file` - Append logs to this file too
pub fn build_config(level: LevelFilter, log_file: Option<&str>) -> Result<Config, LogConfigError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();
    let mut config = Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root = Root::builder().appender("stdout");
    if let Some(log_file) = log_file {
        let file = FileAppender::builder()
            .append(true)
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}",
            )))
            .build(log_file)?;
        config = config.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }
    Ok(config
        .logger(Logger::builder().build("hyper", LevelFilter::Warn))
        .logger(Logger::builder().build("reqwest", LevelFilter::Warn))
        .logger(Logger::builder().build("rustls", LevelFilter::Warn))
        .build(root.build(level))?)
}

/// Initialize logging, or replace the config if already initialized.
pub fn init_with_level(level: LevelFilter, log_file: Option<&str>) -> Result<(), LogConfigError> {
    let config = build_config(level, log_file)?;
    let mut h = HANDLE.write().map_err(|_| LogConfigError::Poisoned)?;
    if let Some(h) = h.as_ref() {
        h.set_config(config);
    } else {
        let handle = init_config(config)?;
        h.replace(handle);
    }
    Ok(())
}

pub fn init_default() -> Result<(), LogConfigError> {
    init_with_level(LevelFilter::Info, None)
}

#[test]
fn test_build_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movigo.log");
    let config = build_config(LevelFilter::Debug, path.to_str()).unwrap();
    assert_eq!(config.appenders().len(), 2);
    assert_eq!(config.root().level(), LevelFilter::Debug);
    assert!(path.exists());
    let config = build_config(LevelFilter::Info, None).unwrap();
    assert_eq!(config.appenders().len(), 1);
    assert_eq!(config.loggers().len(), 3);
}
