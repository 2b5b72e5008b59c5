use crate::db::check_db_config;
use crate::server::cors::CorsHost;
use crate::settings::JsonValueType;
use crate::settings::SettingDes;
use json::JsonValue;
use std::convert::TryFrom;
use std::net::SocketAddr;
use std::str::FromStr;

fn check_socket_addr(obj: &JsonValue) -> bool {
    obj.as_str()
        .map(|s| SocketAddr::from_str(s).is_ok())
        .unwrap_or(false)
}

fn check_url(obj: &JsonValue) -> bool {
    obj.as_str()
        .map(|s| url::Url::parse(s).is_ok())
        .unwrap_or(false)
}

fn check_cors_entries(obj: &JsonValue) -> bool {
    obj.members().all(|o| match o.as_str() {
        Some(s) => CorsHost::try_from(s).is_ok(),
        None => false,
    })
}

fn check_u64(obj: &JsonValue) -> bool {
    obj.as_u64().is_some()
}

pub fn get_settings_list() -> Vec<SettingDes> {
    vec![
        SettingDes::new("server", "Server listen address.", JsonValueType::Str, Some(check_socket_addr)).unwrap(),
        SettingDes::new("db", "Database settings. For example: {\"type\": \"sqlite\", \"path\": \"client-access.db\", \"schema\": \"init-tables.sql\"}", JsonValueType::Object, Some(check_db_config)).unwrap(),
        SettingDes::new("tmdb_base", "The base url of TMDB API v3.", JsonValueType::Str, Some(check_url)).unwrap(),
        SettingDes::new("language", "The language passed to TMDB, e.g. en-US.", JsonValueType::Str, None).unwrap(),
        SettingDes::new("cors_entries", "Origins allowed to access the server.", JsonValueType::Array, Some(check_cors_entries)).unwrap(),
        SettingDes::new("cors_allow_all", "Allow all origins to access the server.", JsonValueType::Boolean, None).unwrap(),
        SettingDes::new("log_file", "The path of log file.", JsonValueType::Str, None).unwrap(),
        SettingDes::new("client_timeout", "Request timeout in milliseconds for TMDB API.", JsonValueType::Number, Some(check_u64)).unwrap(),
    ]
}
