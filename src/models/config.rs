use std::env;

use serenity::all::GuildId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} has an invalid value `{1}`")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    /// Register the command in this guild only, globally when unset.
    pub guild_id: Option<GuildId>,
    pub debug: bool,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let Some(discord_token) = lookup("DISCORD_TOKEN").filter(|token| !token.is_empty()) else {
            return Err(ConfigError::Missing("DISCORD_TOKEN"));
        };

        let guild_id = match lookup("GUILD_ID").filter(|id| !id.is_empty()) {
            Some(id) => match id.parse::<u64>() {
                Ok(value) if value != 0 => Some(GuildId::new(value)),
                _ => return Err(ConfigError::Invalid("GUILD_ID", id)),
            },
            None => None,
        };

        let debug = lookup("DEBUG").is_some_and(|value| value == "true");

        Ok(BotConfig {
            discord_token,
            guild_id,
            debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(values: &[(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = values.iter().copied().collect();
        move |key| map.get(key).map(|value| value.to_string())
    }

    #[test]
    fn test_token_is_required() {
        assert_eq!(
            BotConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
    }

    #[test]
    fn test_optional_values() {
        let config = BotConfig::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("GUILD_ID", "1371174955907285082"),
            ("DEBUG", "true"),
        ]))
        .unwrap();

        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.guild_id, Some(GuildId::new(1371174955907285082)));
        assert!(config.debug);

        let config = BotConfig::from_lookup(lookup(&[("DISCORD_TOKEN", "abc")])).unwrap();
        assert_eq!(config.guild_id, None);
        assert!(!config.debug);
    }

    #[test]
    fn test_invalid_guild_id() {
        assert_eq!(
            BotConfig::from_lookup(lookup(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "0")]))
                .unwrap_err(),
            ConfigError::Invalid("GUILD_ID", "0".to_string())
        );
        assert_eq!(
            ConfigError::Invalid("GUILD_ID", "0".to_string()).to_string(),
            "GUILD_ID has an invalid value `0`"
        );
    }
}
