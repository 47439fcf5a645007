use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Parser, Debug, Clone)]
#[command(name = "signup-bot")]
#[command(about = "Telegram bot collecting graduation ceremony registrations")]
#[command(version)]
pub struct Cli {
    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "telbot.db")]
    pub database: PathBuf,

    /// Conversation transcript file
    #[arg(long, env = "TRANSCRIPT_LOG", default_value = "bot.log")]
    pub transcript_log: PathBuf,

    /// Hex SHA-256 of salt followed by the export password
    #[arg(long, env = "EXPORT_PASSWORD_SHA256", hide_env_values = true)]
    pub export_password_digest: String,

    /// Salt prepended to the export password before hashing
    #[arg(long, env = "EXPORT_PASSWORD_SALT", default_value = "", hide_env_values = true)]
    pub export_password_salt: String,

    /// Long-poll timeout in seconds
    #[arg(long, env = "POLL_TIMEOUT_SECS", default_value = "60")]
    pub poll_timeout: u64,

    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

/// Runtime settings resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub api_base: String,
    pub database: PathBuf,
    pub transcript_log: PathBuf,
    pub export_password_digest: String,
    pub export_password_salt: String,
    pub poll_timeout: Duration,
}

impl From<Cli> for BotConfig {
    fn from(cli: Cli) -> Self {
        Self {
            bot_token: cli.bot_token,
            api_base: cli.api_base.trim_end_matches('/').to_string(),
            database: cli.database,
            transcript_log: cli.transcript_log,
            export_password_digest: cli.export_password_digest,
            export_password_salt: cli.export_password_salt,
            poll_timeout: Duration::from_secs(cli.poll_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

    #[test]
    fn test_defaults_apply() {
        let cli = Cli::try_parse_from([
            "signup-bot",
            "--bot-token",
            "123:abc",
            "--export-password-digest",
            DIGEST,
        ])
        .unwrap();
        let config = BotConfig::from(cli);

        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.database, PathBuf::from("telbot.db"));
        assert_eq!(config.transcript_log, PathBuf::from("bot.log"));
        assert_eq!(config.export_password_salt, "");
        assert_eq!(config.poll_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_trailing_slash_is_dropped_from_api_base() {
        let cli = Cli::try_parse_from([
            "signup-bot",
            "--bot-token",
            "t",
            "--export-password-digest",
            DIGEST,
            "--api-base",
            "http://localhost:8081/",
            "--poll-timeout",
            "5",
            "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        let config = BotConfig::from(cli);
        assert_eq!(config.api_base, "http://localhost:8081");
        assert_eq!(config.poll_timeout, Duration::from_secs(5));
    }
}
