//! Browser session
//!
//! Launches Chrome over the DevTools protocol and owns the single page the
//! scenarios drive.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::error::UiError;
use crate::config::UiConfig;

/// One launched browser with one page
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a browser sized to the configured window
    pub async fn launch(config: &UiConfig) -> Result<Self, UiError> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.window_width, config.window_height)
            .viewport(None);

        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder.build().map_err(UiError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| UiError::Launch(e.to_string()))?;

        // CDP events must be drained for the browser to make progress
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(e.into());
            }
        };

        info!(
            "Launched browser ({}x{}, {})",
            config.window_width,
            config.window_height,
            if config.headless { "headless" } else { "headed" }
        );

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub async fn current_url(&self) -> Result<String, UiError> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    /// Names of all cookies visible to the page
    pub async fn cookie_names(&self) -> Result<Vec<String>, UiError> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies.into_iter().map(|c| c.name).collect())
    }

    /// Close the browser and stop the event handler
    pub async fn quit(mut self) -> Result<(), UiError> {
        let closed = self.browser.close().await;
        if closed.is_ok() {
            if let Err(e) = self.browser.wait().await {
                warn!("Browser process did not exit cleanly: {}", e);
            }
        }
        self.handler.abort();
        closed?;
        debug!("Browser closed");
        Ok(())
    }
}
