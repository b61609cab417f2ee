use anyhow::{Context as _, bail};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Settings read from the process environment (and `.env`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BotConfig {
    pub discord_token: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub blacklist_enabled: bool,
}

impl BotConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let discord_token = lookup("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|value| *value > 0)
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let blacklist_enabled = match lookup("RYUJIN_BLACKLIST") {
            Some(raw) => parse_flag(&raw)?,
            None => true,
        };

        Ok(Self {
            discord_token,
            database_url,
            database_max_connections,
            blacklist_enabled,
        })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid RYUJIN_BLACKLIST value: {other}"),
    }
}
