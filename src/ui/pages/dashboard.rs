//! Dashboard page object

use chromiumoxide::Page;

use super::PageContext;
use crate::ui::error::UiError;
use crate::ui::locator::Locator;
use crate::ui::wait::Wait;

pub struct DashboardPage<'a> {
    ctx: PageContext<'a>,
}

impl<'a> DashboardPage<'a> {
    pub const USER_PROFILE: Locator = Locator::ClassName("user-profile");
    pub const LOGOUT_BUTTON: Locator = Locator::Id("logout");

    pub fn new(page: &'a Page, wait: Wait) -> Self {
        Self {
            ctx: PageContext::new(page, wait),
        }
    }

    /// Name shown in the user profile widget
    pub async fn get_user_name(&self) -> Result<String, UiError> {
        self.ctx.wait_for_presence(&Self::USER_PROFILE).await?;
        self.ctx.text(&Self::USER_PROFILE).await
    }

    pub async fn logout(&self) -> Result<(), UiError> {
        self.ctx
            .wait_for_clickable(&Self::LOGOUT_BUTTON)
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Wait for the post-logout redirect to the login page
    pub async fn wait_for_login_redirect(&self) -> Result<String, UiError> {
        self.ctx.wait_for_url("/login").await
    }
}
