//! Runtime configuration for the Matchday server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Access-token lifetime (minutes).
    pub access_ttl_min: i64,
    /// Refresh-token lifetime (days).
    pub refresh_ttl_days: u64,
    /// Jokers a user may play per round unless the round overrides it.
    pub default_joker_limit: i32,
    /// Overall-standings Redis cache TTL (seconds).
    pub standings_cache_ttl: u64,
}

impl Settings {
    fn from_env() -> Self {
        let access_ttl_min = env::var("ACCESS_TTL_MIN")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(15);

        let refresh_ttl_days = env::var("REFRESH_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let default_joker_limit = env::var("DEFAULT_JOKER_LIMIT")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(1);

        let standings_cache_ttl = env::var("STANDINGS_CACHE_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Settings {
            access_ttl_min,
            refresh_ttl_days,
            default_joker_limit,
            standings_cache_ttl,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
