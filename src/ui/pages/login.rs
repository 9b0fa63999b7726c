//! Login page object

use chromiumoxide::Page;
use tracing::debug;

use super::{timeout_as, PageContext};
use crate::ui::error::UiError;
use crate::ui::locator::Locator;
use crate::ui::wait::Wait;

pub struct LoginPage<'a> {
    ctx: PageContext<'a>,
}

impl<'a> LoginPage<'a> {
    pub const USERNAME_INPUT: Locator = Locator::Id("email");
    pub const PASSWORD_INPUT: Locator = Locator::Id("password");
    pub const LOGIN_BUTTON: Locator = Locator::Css("button[type='submit']");
    pub const ERROR_MESSAGE: Locator = Locator::ClassName("error-message");
    pub const FORGOT_PASSWORD_LINK: Locator = Locator::LinkText("Forgot Password?");
    pub const REMEMBER_ME_CHECKBOX: Locator = Locator::Id("rememberMe");

    pub fn new(page: &'a Page, wait: Wait) -> Self {
        Self {
            ctx: PageContext::new(page, wait),
        }
    }

    /// Load the login page and wait for the username field
    pub async fn navigate_to_login(&self, url: &str) -> Result<(), UiError> {
        debug!("Opening login page {}", url);
        self.ctx.page().goto(url).await?;
        self.ctx.wait_for_presence(&Self::USERNAME_INPUT).await?;
        Ok(())
    }

    pub async fn enter_username(&self, username: &str) -> Result<(), UiError> {
        self.ctx.fill(&Self::USERNAME_INPUT, username).await
    }

    pub async fn enter_password(&self, password: &str) -> Result<(), UiError> {
        self.ctx.fill(&Self::PASSWORD_INPUT, password).await
    }

    pub async fn click_login(&self) -> Result<(), UiError> {
        self.ctx
            .wait_for_clickable(&Self::LOGIN_BUTTON)
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Tick the remember-me box once it is present
    pub async fn click_remember_me(&self) -> Result<(), UiError> {
        self.ctx
            .wait_for_presence(&Self::REMEMBER_ME_CHECKBOX)
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn click_forgot_password(&self) -> Result<(), UiError> {
        self.ctx
            .wait_for_clickable(&Self::FORGOT_PASSWORD_LINK)
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Fill both fields and submit
    pub async fn login(&self, username: &str, password: &str) -> Result<(), UiError> {
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.click_login().await
    }

    /// Error banner text, or `None` if none shows up within the wait
    pub async fn get_error_message(&self) -> Result<Option<String>, UiError> {
        let shown = self
            .ctx
            .wait_for_presence(&Self::ERROR_MESSAGE)
            .await
            .map(Some);
        if timeout_as(shown, None)?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.ctx.text(&Self::ERROR_MESSAGE).await?))
    }

    /// Whether the browser reached the dashboard within the wait
    pub async fn is_logged_in(&self) -> Result<bool, UiError> {
        let reached = self.ctx.wait_for_url("/dashboard").await.map(|_| true);
        timeout_as(reached, false)
    }
}
