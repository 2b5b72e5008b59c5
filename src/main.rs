#[macro_use]
extern crate async_trait;
extern crate derive_more;
extern crate json;
#[macro_use]
extern crate lazy_static;
extern crate regex;
extern crate reqwest;
extern crate tokio;

/// Token storage
mod db;
mod error;
/// Used to extend some thirdparty library
mod ext;
mod log_cfg;
mod opthelper;
mod opts;
mod server;
mod settings;
mod settings_list;
/// TMDB API v3 client
mod tmdb;

use db::{open_and_init_database, Token};
use log::LevelFilter;
use opthelper::OptHelper;
use opts::{Command, CommandOpts, ConfigCommand};
use server::context::ServerContext;
use server::service::start_server;
use settings::SettingStore;
use std::sync::Arc;
use tmdb::TmdbClient;

/// The environment variable which holds TMDB API v3 auth key
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_V3_KEY";

pub struct Main {
    pub cmd: Option<CommandOpts>,
    pub settings: Option<SettingStore>,
}

impl Main {
    pub fn deal_config_cmd(&self, cmd: &CommandOpts, subcmd: ConfigCommand) -> i32 {
        let s = match self.settings.as_ref() {
            Some(s) => s,
            None => return 1,
        };
        match subcmd {
            ConfigCommand::Fix => match cmd.config() {
                Some(conf) => match s.save(&conf) {
                    Ok(_) => 0,
                    Err(e) => {
                        log::error!("Failed to save config file {}: {}", conf, e);
                        1
                    }
                },
                None => 0,
            },
            ConfigCommand::Help => {
                println!("All available settings:");
                s.basic.print_help();
                0
            }
        }
    }

    pub async fn deal_server_cmd(&self, cmd: &CommandOpts) -> i32 {
        let settings = match self.settings.as_ref() {
            Some(s) => s,
            None => return 1,
        };
        let helper = OptHelper::new(cmd, settings);
        let api_key = match std::env::var(TMDB_API_KEY_ENV) {
            Ok(key) if !key.is_empty() => key,
            _ => {
                log::error!("Environment variable {} is not set.", TMDB_API_KEY_ENV);
                return 1;
            }
        };
        let db = match open_and_init_database(&helper.db()).await {
            Ok(db) => Arc::new(db),
            Err(e) => {
                log::error!("Failed to open database: {}", e);
                return 1;
            }
        };
        let token = match Token::generate() {
            Ok(token) => token,
            Err(e) => {
                log::error!("Failed to generate token: {}", e);
                return 1;
            }
        };
        if let Err(e) = db.add_token(&token).await {
            log::error!("Failed to save token: {}", e);
            return 1;
        }
        log::info!("Issued a bootstrap token at {}.", token.created_at);
        let tmdb = match TmdbClient::new(
            &api_key,
            &helper.tmdb_base(),
            &helper.language(),
            helper.client_timeout(),
        ) {
            Ok(tmdb) => tmdb,
            Err(e) => {
                log::error!("Failed to create TMDB client: {}", e);
                return 1;
            }
        };
        let ctx = Arc::new(ServerContext::new(helper.cors(), tmdb));
        let addr = helper.server();
        let server = match start_server(&addr, ctx) {
            Ok(server) => server,
            Err(e) => {
                log::error!("Failed to start server: {}", e);
                return 1;
            }
        };
        log::info!("Listening on http://{}", server.local_addr());
        let server = server.with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
            }
        });
        let re = match server.await {
            Ok(_) => 0,
            Err(e) => {
                log::error!("Server error: {}", e);
                1
            }
        };
        log::info!("Server stopped.");
        drop(db);
        re
    }

    pub fn new() -> Self {
        Self {
            cmd: None,
            settings: None,
        }
    }

    pub async fn run(&mut self) -> i32 {
        if let Err(e) = log_cfg::init_default() {
            eprintln!("Failed to initialize logging: {}", e);
            return 1;
        }
        self.cmd = opts::parse_cmd();
        let cmd = match self.cmd.clone() {
            Some(cmd) => cmd,
            None => return 1,
        };
        if cmd.cmd == Command::None {
            return 0;
        }
        let mut settings = SettingStore::default();
        if let Some(conf) = cmd.config() {
            let fix_invalid = cmd.config_cmd == Some(ConfigCommand::Fix);
            if let Err(e) = settings.read(&conf, fix_invalid) {
                log::error!("Can not read config file {}: {}", conf, e);
                return 1;
            }
        }
        self.settings = Some(settings);
        match cmd.cmd {
            Command::Config => match cmd.config_cmd {
                Some(subcmd) => self.deal_config_cmd(&cmd, subcmd),
                None => 1,
            },
            Command::Server => {
                if let Some(settings) = self.settings.as_ref() {
                    let helper = OptHelper::new(&cmd, settings);
                    let level = if helper.verbose() {
                        LevelFilter::Debug
                    } else {
                        LevelFilter::Info
                    };
                    let log_file = helper.log_file();
                    if let Err(e) = log_cfg::init_with_level(level, log_file.as_deref()) {
                        log::error!("Failed to initialize logging: {}", e);
                        return 1;
                    }
                }
                self.deal_server_cmd(&cmd).await
            }
            Command::None => 0,
        }
    }
}

#[tokio::main]
async fn main() {
    let mut m = Main::new();
    std::process::exit(m.run().await);
}
