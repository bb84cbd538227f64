use std::env;

use log::{debug, error, info};
use url::Url;

use crate::error::{BotError, Result};

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_COMMAND_PREFIX: &str = "!";
/// chromedriver listens here unless told otherwise.
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub command_prefix: String,
    pub webdriver_url: Url,
}

impl Config {
    /// Load configuration from the environment and an optional `.env` file.
    ///
    /// # Errors
    ///
    /// Fails when `DISCORD_TOKEN` or `OPENAI_API_KEY` is missing, or when
    /// `COMMAND_PREFIX` or `WEBDRIVER_URL` holds an unusable value.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let discord_token = required("DISCORD_TOKEN")?;
        let openai_api_key = required("OPENAI_API_KEY")?;

        let openai_model = optional("OPENAI_MODEL", DEFAULT_OPENAI_MODEL);
        let command_prefix = parse_command_prefix(env::var("COMMAND_PREFIX").ok())?;
        let webdriver_url =
            parse_webdriver_url(&optional("WEBDRIVER_URL", DEFAULT_WEBDRIVER_URL))?;

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!("OpenAI API key length: {} characters", openai_api_key.len());
        debug!("OpenAI model: {openai_model}");
        debug!("Command prefix: {command_prefix}");
        debug!("WebDriver URL: {webdriver_url}");

        Ok(Self {
            discord_token,
            openai_api_key,
            openai_model,
            command_prefix,
            webdriver_url,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|e| {
        error!("Failed to load {name} from environment: {e}");
        BotError::EnvVar(e)
    })
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_command_prefix(raw: Option<String>) -> Result<String> {
    match raw {
        None => Ok(DEFAULT_COMMAND_PREFIX.to_string()),
        Some(prefix) if prefix.trim().is_empty() => Err(BotError::Config(
            "COMMAND_PREFIX must not be empty".to_string(),
        )),
        Some(prefix) => Ok(prefix.trim().to_string()),
    }
}

fn parse_webdriver_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| BotError::Config(format!("WEBDRIVER_URL '{raw}' is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(BotError::Config(format!(
            "WEBDRIVER_URL must use http or https, got '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_defaults_to_bang() {
        assert_eq!(parse_command_prefix(None).ok().as_deref(), Some("!"));
    }

    #[test]
    fn blank_prefix_is_rejected() {
        let err = parse_command_prefix(Some("   ".to_string()));
        assert!(matches!(err, Err(BotError::Config(_))));
    }

    #[test]
    fn prefix_is_trimmed() {
        let prefix = parse_command_prefix(Some(" ? ".to_string()));
        assert_eq!(prefix.ok().as_deref(), Some("?"));
    }

    #[test]
    fn default_webdriver_url_parses() -> Result<()> {
        let url = parse_webdriver_url(DEFAULT_WEBDRIVER_URL)?;
        assert_eq!(url.port(), Some(9515));
        Ok(())
    }

    #[test]
    fn webdriver_url_requires_http_scheme() {
        assert!(matches!(
            parse_webdriver_url("ftp://localhost:9515"),
            Err(BotError::Config(_))
        ));
        assert!(matches!(
            parse_webdriver_url("not a url"),
            Err(BotError::Config(_))
        ));
    }
}
