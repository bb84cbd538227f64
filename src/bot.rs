//! Discord bot core logic and event handling.

use log::{debug, info, warn};
use poise::{
    Framework, FrameworkContext, FrameworkOptions, PrefixFrameworkOptions, builtins,
    serenity_prelude::{ClientBuilder, Context, CreateMessage, FullEvent, GatewayIntents, Member},
};
use tokio::sync::Mutex;

use crate::chatbot::handle_bot_mention;
use crate::commands::all_commands;
use crate::config::Config;
use crate::error::{BotError, Result};
use crate::openai::OpenAiClient;
use crate::snow::WebDriverLauncher;

/// Shared application context handed to every handler and command.
pub struct Data {
    openai_client: OpenAiClient,
    browser: WebDriverLauncher,
    command_prefix: String,
    snowcheck_lock: Mutex<()>,
}

impl Data {
    #[must_use]
    pub fn openai_client(&self) -> &OpenAiClient {
        &self.openai_client
    }

    #[must_use]
    pub fn browser(&self) -> &WebDriverLauncher {
        &self.browser
    }

    #[must_use]
    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Held for the duration of a snow check.
    #[must_use]
    pub fn snowcheck_lock(&self) -> &Mutex<()> {
        &self.snowcheck_lock
    }
}

/// Welcome text DMed to new server members.
#[must_use]
pub fn welcome_text(name: &str) -> String {
    format!("Welcome to the server {name}")
}

/// Run the Discord bot.
///
/// # Errors
///
/// Returns configuration errors and errors from the Discord client.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing OpenAI client");
    let openai_client = OpenAiClient::new(config.openai_api_key.clone(), config.openai_model);
    debug!("Using model {}", openai_client.model());

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let data = Data {
        openai_client,
        browser: WebDriverLauncher::new(config.webdriver_url),
        command_prefix: config.command_prefix.clone(),
        snowcheck_lock: Mutex::new(()),
    };

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: all_commands(),
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(config.command_prefix),
                // Mentions belong to the chatbot, not to command dispatch.
                mention_as_prefix: false,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                debug!("Registering commands globally");
                builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully");
                Ok(data)
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn event_handler(
    ctx: &Context,
    event: &FullEvent,
    _framework: FrameworkContext<'_, Data, BotError>,
    data: &Data,
) -> Result<()> {
    match event {
        FullEvent::Ready { data_about_bot } => {
            info!("We are ready to go in, {}", data_about_bot.user.name);
        }
        FullEvent::Message { new_message } => {
            let bot_user_id = ctx.cache.current_user().id;
            handle_bot_mention(ctx, new_message, data, bot_user_id).await?;
        }
        FullEvent::GuildMemberAddition { new_member } => {
            welcome_member(ctx, new_member).await;
        }
        _ => {}
    }
    Ok(())
}

/// DM a welcome to a new member. Delivery failures are logged and dropped.
async fn welcome_member(ctx: &Context, member: &Member) {
    let message = CreateMessage::new().content(welcome_text(&member.user.name));

    match member.user.direct_message(&ctx.http, message).await {
        Ok(_) => info!("Welcomed new member {}", member.user.tag()),
        Err(e) => warn!("Failed to DM new member {}: {e}", member.user.name),
    }
}
