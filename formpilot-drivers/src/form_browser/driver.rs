use crate::form_browser::{pacing::PacingEngine, page::FormPage};
use anyhow::{anyhow, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct FormDriver {
    pub client: Client,
    pub pacing: PacingEngine,
}

impl FormDriver {
    /// Create a new driver connected to a running WebDriver service
    /// (typically chromedriver on `http://localhost:9515`).
    ///
    /// A connection failure is fatal for the run; the returned error carries
    /// a remediation hint for the operator.
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = vec![
            json!("--start-maximized"),
            json!("--no-sandbox"),
            json!("--disable-dev-shm-usage"),
        ];
        if headless {
            args.push(json!("--headless"));
            args.push(json!("--disable-gpu"));
        }
        chrome_opts.insert("args".to_string(), json!(args));

        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .map_err(|e| {
                anyhow!(
                    "could not reach the WebDriver service at {webdriver_url}: {e}. \
                     Make sure chromedriver is running and Chrome is installed."
                )
            })?;

        Ok(Self {
            client,
            pacing: PacingEngine::new(),
        })
    }

    /// Navigate to `url` and return a [`FormPage`] for it.
    pub async fn goto(&mut self, url: &str) -> Result<FormPage> {
        let mut page = FormPage::new(self.client.clone(), self.pacing.clone());
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
