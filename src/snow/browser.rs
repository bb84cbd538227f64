//! Headless browser access for client-side rendered pages.

use std::future::Future;
use std::time::Duration;

use fantoccini::{Client, ClientBuilder, Locator};
use log::debug;
use serde_json::json;
use url::Url;

use crate::error::{BotError, Result};

const CHROME_ARGS: [&str; 5] = [
    "--headless=new",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "user-agent=Mozilla/5.0",
];

/// A live browser session. Dropping it without [`Browser::quit`] leaks the browser process.
pub trait Browser: Send {
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<()>> + Send;

    /// Wait up to `timeout` for an element whose text contains `text`.
    fn wait_for_text(
        &mut self,
        text: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Rendered HTML of the current page.
    fn page_source(&mut self) -> impl Future<Output = Result<String>> + Send;

    fn quit(self) -> impl Future<Output = Result<()>> + Send;
}

/// Starts browser sessions.
pub trait BrowserLauncher: Sync {
    type Session: Browser;

    fn launch(&self) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// Launches headless Chrome through a `WebDriver` server such as chromedriver.
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    webdriver_url: Url,
}

impl WebDriverLauncher {
    #[must_use]
    pub fn new(webdriver_url: Url) -> Self {
        Self { webdriver_url }
    }
}

impl BrowserLauncher for WebDriverLauncher {
    type Session = WebDriverSession;

    async fn launch(&self) -> Result<WebDriverSession> {
        debug!("Starting headless Chrome via {}", self.webdriver_url);

        let mut capabilities = serde_json::Map::new();
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": CHROME_ARGS }),
        );

        let mut builder = ClientBuilder::rustls()
            .map_err(|e| BotError::Scrape(format!("failed to load TLS root certificates: {e}")))?;
        builder.capabilities(capabilities);
        let client = builder.connect(self.webdriver_url.as_str()).await?;

        debug!("Browser session started");
        Ok(WebDriverSession { client })
    }
}

pub struct WebDriverSession {
    client: Client,
}

impl Browser for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!("Navigating to {url}");
        self.client.goto(url).await?;
        Ok(())
    }

    async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Result<()> {
        let xpath = format!("//*[contains(text(), '{text}')]");
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::XPath(&xpath))
            .await?;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    async fn quit(self) -> Result<()> {
        self.client.close().await?;
        debug!("Browser session closed");
        Ok(())
    }
}
