use crate::models::config::BotConfig;

pub fn log_level(config: &BotConfig) -> tracing::Level {
    if config.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

pub fn init(config: &BotConfig) {
    tracing_subscriber::fmt().with_max_level(log_level(config)).init();
}
