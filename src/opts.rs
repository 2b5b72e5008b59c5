use crate::server::cors::CorsHost;
use getopts::Options;
use std::convert::TryFrom;
use std::env;
use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

/// Command Line command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Do something for the config
    Config,
    /// Run as a server
    Server,
    /// Already handled when parsing options, just need return 0.
    None,
}

/// Subcommand for config
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigCommand {
    /// Fix the config file
    Fix,
    /// Print all available settings
    Help,
}

#[derive(Clone, Debug)]
/// Command Line Options
pub struct CommandOpts {
    /// Command
    pub cmd: Command,
    /// Config location
    pub _config: Option<String>,
    /// Config command
    pub config_cmd: Option<ConfigCommand>,
    /// Verbose logging
    pub verbose: bool,
    /// Server listen address
    pub server: Option<SocketAddr>,
    /// The path of database file
    pub db: Option<String>,
    /// The path of SQL script which creates the tables
    pub schema: Option<String>,
    /// The path of log file
    pub log_file: Option<String>,
    /// Do not write log file
    pub no_log_file: bool,
    /// Origins allowed to access the server
    pub cors_entries: Vec<CorsHost>,
    /// Allow all origins
    pub cors_allow_all: bool,
    /// The base url of TMDB API v3
    pub tmdb_base: Option<String>,
    /// The language passed to TMDB
    pub language: Option<String>,
    /// Request timeout in milliseconds
    pub client_timeout: Option<u64>,
}

impl CommandOpts {
    pub fn new(cmd: Command) -> Self {
        Self {
            cmd,
            _config: None,
            config_cmd: None,
            verbose: false,
            server: None,
            db: None,
            schema: None,
            log_file: None,
            no_log_file: false,
            cors_entries: Vec::new(),
            cors_allow_all: false,
            tmdb_base: None,
            language: None,
            client_timeout: None,
        }
    }

    pub fn new_with_command<S: AsRef<str> + ?Sized>(cmd: &S) -> Option<Self> {
        match cmd.as_ref() {
            "config" => Some(CommandOpts::new(Command::Config)),
            "server" | "s" => Some(CommandOpts::new(Command::Server)),
            _ => None,
        }
    }

    /// The location of config file.
    ///
    /// Falls back to `movigo.json` in the current directory.
    pub fn config(&self) -> Option<String> {
        match &self._config {
            Some(config) => {
                if Path::new(config).exists() {
                    Some(config.clone())
                } else {
                    log::error!("Warning: The specified config file not found.");
                    None
                }
            }
            None => {
                if Path::new("movigo.json").exists() {
                    Some(String::from("movigo.json"))
                } else {
                    None
                }
            }
        }
    }
}

pub fn print_usage(prog: &str, opts: &Options) {
    let brief = format!(
        "Usage:
{} [server/s] [options] [address]  Run as a server
{} config fix [options]  Fix the config file
{} config help [options]  Print all available settings",
        prog, prog, prog,
    );
    println!("{}", opts.usage(brief.as_str()));
}

/// Prase [u64] from string
pub fn parse_u64<T: AsRef<str>>(s: Option<T>) -> Result<Option<u64>, ParseIntError> {
    match s {
        Some(s) => {
            let s = s.as_ref();
            let s = s.trim();
            let c = s.parse::<u64>()?;
            Ok(Some(c))
        }
        None => Ok(None),
    }
}

fn build_options() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "Print help message.");
    opts.optopt("c", "config", "The location of config file.", "FILE");
    opts.optflag("v", "verbose", "Verbose logging.");
    opts.optopt("s", "server", "Server listen address.", "ADDR");
    opts.optopt("", "db", "The path of database file.", "FILE");
    opts.optopt(
        "",
        "schema",
        "The path of SQL script which creates the tables.",
        "FILE",
    );
    opts.optopt("", "log-file", "The path of log file.", "FILE");
    opts.optflag("", "no-log-file", "Do not write log file.");
    opts.optmulti(
        "",
        "cors-entry",
        "Origin allowed to access the server. Can be specified multiple times.",
        "ORIGIN",
    );
    opts.optflag("", "cors-allow-all", "Allow all origins to access the server.");
    opts.optopt("", "tmdb-base", "The base url of TMDB API v3.", "URL");
    opts.optopt("", "language", "The language passed to TMDB, e.g. en-US.", "LANG");
    opts.optopt(
        "",
        "client-timeout",
        "Request timeout in milliseconds for TMDB API.",
        "MS",
    );
    opts
}

/// Parse command line.
///
/// Returns [None] if failed to parse.
pub fn parse_args(prog: &str, args: &[String]) -> Option<CommandOpts> {
    let opts = build_options();
    let result = match opts.parse(args) {
        Ok(m) => m,
        Err(err) => {
            log::error!("{}", err);
            return None;
        }
    };
    if result.opt_present("h") {
        print_usage(prog, &opts);
        return Some(CommandOpts::new(Command::None));
    }
    let mut free = result.free.iter();
    let mut re = match free.next() {
        Some(cmd) => match CommandOpts::new_with_command(cmd) {
            Some(re) => re,
            None => {
                log::error!("Unknown command.");
                print_usage(prog, &opts);
                return None;
            }
        },
        None => CommandOpts::new(Command::Server),
    };
    match re.cmd {
        Command::Config => {
            re.config_cmd = match free.next().map(|s| s.as_str()) {
                Some("fix") => Some(ConfigCommand::Fix),
                Some("help") => Some(ConfigCommand::Help),
                Some(_) => {
                    log::error!("Unknown config subcommand.");
                    print_usage(prog, &opts);
                    return None;
                }
                None => {
                    log::error!("No detailed command specified.");
                    print_usage(prog, &opts);
                    return None;
                }
            };
        }
        Command::Server => {
            if let Some(address) = free.next() {
                match SocketAddr::from_str(address) {
                    Ok(address) => re.server = Some(address),
                    Err(e) => {
                        log::error!("Failed to parse address: {}", e);
                        return None;
                    }
                }
            }
        }
        Command::None => {}
    }
    re._config = result.opt_str("config");
    re.verbose = result.opt_present("verbose");
    if let Some(address) = result.opt_str("server") {
        match SocketAddr::from_str(&address) {
            Ok(address) => re.server = Some(address),
            Err(e) => {
                log::error!("Failed to parse address: {}", e);
                return None;
            }
        }
    }
    re.db = result.opt_str("db");
    re.schema = result.opt_str("schema");
    re.log_file = result.opt_str("log-file");
    re.no_log_file = result.opt_present("no-log-file");
    for entry in result.opt_strs("cors-entry") {
        match CorsHost::try_from(entry.as_str()) {
            Ok(host) => re.cors_entries.push(host),
            Err(e) => {
                log::error!("Failed to parse CORS entry {}: {}", entry, e);
                return None;
            }
        }
    }
    re.cors_allow_all = result.opt_present("cors-allow-all");
    re.tmdb_base = result.opt_str("tmdb-base");
    re.language = result.opt_str("language");
    match parse_u64(result.opt_str("client-timeout")) {
        Ok(r) => re.client_timeout = r,
        Err(e) => {
            log::error!("Failed to parse client timeout: {}", e);
            return None;
        }
    }
    Some(re)
}

pub fn parse_cmd() -> Option<CommandOpts> {
    let argv: Vec<String> = env::args().collect();
    let prog = argv.first().map(|s| s.as_str()).unwrap_or("movigo");
    parse_args(prog, argv.get(1..).unwrap_or(&[]))
}
