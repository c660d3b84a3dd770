use crate::errors::*;

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &'static str = "https://www.mysoccerleague.com/";
pub const DEFAULT_LEAGUE_ID: u32 = 91;
pub const DEFAULT_SEASON_ID: u32 = 0;

/// Everything needed to talk to the assignment site. Built once per process and cloned into
/// every independent run.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig
{
    pub base_url: String,
    pub league_id: u32,
    pub season_id: u32,
    pub user_agent: String,
    /// Overall timeout of one HTTP request
    pub fetch_timeout: Duration,
    pub retry_attempts: u32,
    /// Pause between two attempts of the same step
    pub retry_delay: Duration,
}

impl Default for SiteConfig
{
    fn default() -> SiteConfig
    {
        SiteConfig {
            base_url: String::from(DEFAULT_BASE_URL),
            league_id: DEFAULT_LEAGUE_ID,
            season_id: DEFAULT_SEASON_ID,
            user_agent: String::from("Chrome"),
            fetch_timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(3),
        }
    }
}

impl SiteConfig
{
    pub fn from_env() -> SiteConfig
    {
        let defaults = SiteConfig::default();

        SiteConfig {
            base_url: env::var("MSL_BASE_URL")
                .unwrap_or(defaults.base_url),
            league_id: env_or("MSL_LEAGUE_ID", defaults.league_id),
            season_id: env_or("MSL_SEASON_ID", defaults.season_id),
            user_agent: env::var("MSL_USER_AGENT")
                .unwrap_or(defaults.user_agent),
            fetch_timeout: Duration::from_secs(env_or("MSL_FETCH_TIMEOUT_SECS", defaults.fetch_timeout.as_secs())),
            retry_attempts: env_or("MSL_RETRY_ATTEMPTS", defaults.retry_attempts),
            retry_delay: Duration::from_secs(env_or("MSL_RETRY_DELAY_SECS", defaults.retry_delay.as_secs())),
        }
    }
}

/// Login for the assignment site. Debug output never shows the password.
#[derive(Clone, PartialEq, new)]
pub struct Credentials
{
    pub username: String,
    pub password: String,
}

impl Credentials
{
    pub fn from_env() -> Result<Credentials>
    {
        let username = env::var("MSL_USERNAME")
            .map_err(|_| ErrorKind::Config(String::from("MSL_USERNAME is not set")))?;
        let password = env::var("MSL_PASSWORD")
            .map_err(|_| ErrorKind::Config(String::from("MSL_PASSWORD is not set")))?;

        Ok(Credentials::new(username, password))
    }
}

impl ::std::fmt::Debug for Credentials
{
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result
    {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Reads `key` and parses it, falling back to `default` when unset or unparsable.
pub fn env_or<T>(key: &str, default: T) -> T
    where T: FromStr
{
    match env::var(key)
    {
        Ok(value) => match value.trim().parse::<T>()
        {
            Ok(parsed) => parsed,
            Err(_) =>
            {
                warn!("Ignoring unparsable {}: '{}'", key, value);
                default
            },
        },
        Err(_) => default,
    }
}

/// Like `env_or`, but a value that is set and does not parse is a `Config` error.
pub fn env_parse<T>(key: &str, default: T) -> Result<T>
    where T: FromStr<Err = Error>
{
    match env::var(key)
    {
        Err(_) => Ok(default),
        Ok(value) => value.parse::<T>()
            .chain_err(|| ErrorKind::Config(format!("Bad {}: '{}'", key, value))),
    }
}
