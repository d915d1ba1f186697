//! Server configuration from the environment

use std::net::SocketAddr;

use tracing::warn;

const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `CHESS_DUEL_BIND`
    pub bind: SocketAddr,
    /// `CHESS_DUEL_VALIDATE`: keep an authoritative game per room and refuse illegal moves.
    pub validate_moves: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.parse().expect("default bind address is valid"),
            validate_moves: true,
        }
    }
}

impl Config {
    /// Reads the process environment. `main` loads `.env` into it first.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("CHESS_DUEL_BIND") {
            match raw.parse() {
                Ok(addr) => config.bind = addr,
                Err(e) => warn!(value = %raw, error = %e, "invalid CHESS_DUEL_BIND, using default"),
            }
        }

        if let Some(raw) = lookup("CHESS_DUEL_VALIDATE") {
            match parse_bool(&raw) {
                Some(flag) => config.validate_moves = flag,
                None => warn!(value = %raw, "invalid CHESS_DUEL_VALIDATE, using default"),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
