use fantoccini::error::{CmdError, NewSessionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("OpenAI API error ({status}): {message}")]
    OpenAiApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("OpenAI response error: {0}")]
    OpenAiResponse(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Browser session error: {0}")]
    BrowserSession(Box<NewSessionError>),

    #[error("Browser command error: {0}")]
    Browser(Box<CmdError>),

    #[error("Scrape error: {0}")]
    Scrape(String),
}

/// Failure categories, used to decide between degrading and aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Fatal at startup.
    Configuration,
    /// Talking to Discord failed.
    Delivery,
    /// The generation API failed or answered with something unusable.
    Upstream,
    /// Browser automation or page parsing failed.
    Scrape,
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

impl From<NewSessionError> for BotError {
    fn from(err: NewSessionError) -> Self {
        BotError::BrowserSession(Box::new(err))
    }
}

impl From<CmdError> for BotError {
    fn from(err: CmdError) -> Self {
        BotError::Browser(Box::new(err))
    }
}

impl BotError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::Config(_) | BotError::EnvVar(_) => ErrorCategory::Configuration,
            BotError::Serenity(_) => ErrorCategory::Delivery,
            BotError::OpenAiApi { .. } | BotError::OpenAiResponse(_) | BotError::Reqwest(_) => {
                ErrorCategory::Upstream
            }
            BotError::BrowserSession(_) | BotError::Browser(_) | BotError::Scrape(_) => {
                ErrorCategory::Scrape
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
