use crate::db::MovigoDbConfig;
use crate::opts::CommandOpts;
use crate::server::cors::{CorsContext, CorsHost};
use crate::settings::SettingStore;
use crate::tmdb::TMDB_BASE;
use std::convert::TryFrom;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Default listen address
pub const DEFAULT_SERVER: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
pub const DEFAULT_CORS_ENTRY: &str = "http://127.0.0.1:3000";
pub const DEFAULT_LOG_FILE: &str = "movigo.log";

/// Merge command line options, settings and defaults
#[derive(Clone)]
pub struct OptHelper<'a> {
    opt: &'a CommandOpts,
    settings: &'a SettingStore,
}

impl<'a> OptHelper<'a> {
    pub fn new(opt: &'a CommandOpts, settings: &'a SettingStore) -> Self {
        Self { opt, settings }
    }

    pub fn server(&self) -> SocketAddr {
        match self.opt.server {
            Some(server) => server,
            None => self
                .settings
                .get_str("server")
                .and_then(|s| SocketAddr::from_str(&s).ok())
                .unwrap_or_else(|| SocketAddr::from(DEFAULT_SERVER)),
        }
    }

    pub fn db(&self) -> MovigoDbConfig {
        let mut cfg = match self.settings.get("db") {
            Some(db) => MovigoDbConfig::new(db).unwrap_or_default(),
            None => MovigoDbConfig::default(),
        };
        if let Some(path) = &self.opt.db {
            cfg.set_path(path);
        }
        if let Some(schema) = &self.opt.schema {
            cfg.set_schema(schema);
        }
        cfg
    }

    pub fn tmdb_base(&self) -> String {
        match &self.opt.tmdb_base {
            Some(base) => base.clone(),
            None => self
                .settings
                .get_str("tmdb_base")
                .unwrap_or_else(|| TMDB_BASE.to_owned()),
        }
    }

    pub fn language(&self) -> String {
        match &self.opt.language {
            Some(language) => language.clone(),
            None => self
                .settings
                .get_str("language")
                .unwrap_or_else(|| String::from("en-US")),
        }
    }

    pub fn cors_allow_all(&self) -> bool {
        self.opt.cors_allow_all || self.settings.get_bool("cors_allow_all").unwrap_or(false)
    }

    pub fn cors_entries(&self) -> Vec<CorsHost> {
        if !self.opt.cors_entries.is_empty() {
            return self.opt.cors_entries.clone();
        }
        match self.settings.get("cors_entries") {
            Some(entries) => entries
                .members()
                .filter_map(|e| e.as_str())
                .filter_map(|e| CorsHost::try_from(e).ok())
                .collect(),
            None => CorsHost::try_from(DEFAULT_CORS_ENTRY)
                .map(|h| vec![h])
                .unwrap_or_default(),
        }
    }

    pub fn cors(&self) -> CorsContext {
        CorsContext::new(self.cors_allow_all(), self.cors_entries())
    }

    /// Returns [None] if log file is disabled.
    pub fn log_file(&self) -> Option<String> {
        if self.opt.no_log_file {
            return None;
        }
        match &self.opt.log_file {
            Some(file) => Some(file.clone()),
            None => Some(
                self.settings
                    .get_str("log_file")
                    .unwrap_or_else(|| String::from(DEFAULT_LOG_FILE)),
            ),
        }
    }

    /// Request timeout of TMDB API client
    pub fn client_timeout(&self) -> Option<Duration> {
        self.opt
            .client_timeout
            .or_else(|| self.settings.get_u64("client_timeout"))
            .map(Duration::from_millis)
    }

    pub fn verbose(&self) -> bool {
        self.opt.verbose
    }
}
