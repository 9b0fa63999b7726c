//! Login functionality scenarios
//!
//! TC-AUTH-001 .. TC-AUTH-010 plus the data-driven invalid input case.
//! Every scenario starts from a freshly launched browser on the login page.

use anyhow::Result;
use tracing::info;

use super::driver::BrowserSession;
use super::pages::{DashboardPage, LoginPage};
use super::wait::Wait;
use crate::assert::check;
use crate::config::UiConfig;

/// Username/password pairs for TC-AUTH-DDT
pub const INVALID_INPUTS: [(&str, &str); 4] = [
    ("", ""),
    ("test", "short"),
    ("invalid-email", "Test@1234"),
    ("test@example.com", " "),
];

pub const SQL_INJECTION: &str = "admin' OR '1'='1";
pub const XSS_PAYLOAD: &str = "<script>alert('XSS')</script>";

/// Label for one invalid input pair
pub fn input_label(username: &str, password: &str) -> String {
    format!("username={username:?} password={password:?}")
}

/// Per-scenario handles: the session, both page objects and test data
pub struct Fixture<'a> {
    pub session: &'a BrowserSession,
    pub login: LoginPage<'a>,
    pub dashboard: DashboardPage<'a>,
    config: &'a UiConfig,
}

impl<'a> Fixture<'a> {
    pub fn new(session: &'a BrowserSession, config: &'a UiConfig) -> Self {
        let wait = Wait::from_secs(config.wait_timeout_secs);
        Self {
            session,
            login: LoginPage::new(session.page(), wait),
            dashboard: DashboardPage::new(session.page(), wait),
            config,
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.config.base_url.trim_end_matches('/'))
    }

    async fn open_login(&self) -> Result<()> {
        self.login.navigate_to_login(&self.login_url()).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.session.current_url().await?)
    }
}

/// TC-AUTH-001: Valid User Login
pub async fn valid_login(fx: &Fixture<'_>) -> Result<()> {
    info!("Running Valid User Login");
    fx.open_login().await?;

    fx.login
        .login(&fx.config.username, &fx.config.password)
        .await?;

    check!(
        fx.login.is_logged_in().await?,
        "Login failed with valid credentials"
    );
    check!(
        fx.current_url().await?.contains("/dashboard"),
        "Not redirected to dashboard"
    );
    Ok(())
}

/// TC-AUTH-002: Invalid Username Login Attempt
pub async fn invalid_username(fx: &Fixture<'_>) -> Result<()> {
    info!("Running Invalid Username Login Attempt");
    fx.open_login().await?;

    fx.login
        .login("invalid@example.com", &fx.config.password)
        .await?;

    let message = fx.login.get_error_message().await?;
    check!(message.is_some(), "No error message displayed");
    let message = message.unwrap_or_default().to_lowercase();
    check!(message.contains("invalid"), "Error message not appropriate");

    check!(
        fx.current_url().await?.contains("/login"),
        "User was redirected unexpectedly"
    );
    Ok(())
}

/// TC-AUTH-003: Invalid Password Login Attempt
pub async fn invalid_password(fx: &Fixture<'_>) -> Result<()> {
    info!("Running Invalid Password Login Attempt");
    fx.open_login().await?;

    fx.login
        .login(&fx.config.username, "WrongPassword@123")
        .await?;

    check!(
        fx.login.get_error_message().await?.is_some(),
        "No error message displayed"
    );
    check!(
        fx.current_url().await?.contains("/login"),
        "User was redirected unexpectedly"
    );
    Ok(())
}

/// Shared body of the empty-field cases
async fn expect_validation_error(fx: &Fixture<'_>, field: &str) -> Result<()> {
    fx.login.click_login().await?;

    let message = fx.login.get_error_message().await?;
    check!(message.is_some(), "No validation error displayed");
    let message = message.unwrap_or_default().to_lowercase();
    check!(
        message.contains("required") || message.contains(field),
        "Validation message does not mention '{}': {}",
        field,
        message
    );
    Ok(())
}

/// TC-AUTH-004: Empty Username Field
pub async fn empty_username(fx: &Fixture<'_>) -> Result<()> {
    info!("Running Empty Username Field");
    fx.open_login().await?;

    fx.login.enter_password(&fx.config.password).await?;
    expect_validation_error(fx, "username").await
}

/// TC-AUTH-005: Empty Password Field
pub async fn empty_password(fx: &Fixture<'_>) -> Result<()> {
    info!("Running Empty Password Field");
    fx.open_login().await?;

    fx.login.enter_username(&fx.config.username).await?;
    expect_validation_error(fx, "password").await
}

/// TC-AUTH-006: SQL Injection in Username Field
pub async fn sql_injection_username(fx: &Fixture<'_>) -> Result<()> {
    info!("Running SQL Injection in Username Field");
    fx.open_login().await?;

    fx.login.login(SQL_INJECTION, "anything").await?;

    check!(
        !fx.login.is_logged_in().await?,
        "SQL injection was successful (SECURITY ISSUE!)"
    );
    Ok(())
}

/// TC-AUTH-007: XSS Attack in Username Field
pub async fn xss_attack_username(fx: &Fixture<'_>) -> Result<()> {
    info!("Running XSS Attack in Username Field");
    fx.open_login().await?;

    fx.login.login(XSS_PAYLOAD, &fx.config.password).await?;

    check!(!fx.login.is_logged_in().await?, "XSS input allowed login");
    Ok(())
}

/// TC-AUTH-008: Remember Me Functionality
pub async fn remember_me(fx: &Fixture<'_>) -> Result<()> {
    info!("Running Remember Me Functionality");
    fx.open_login().await?;

    fx.login.enter_username(&fx.config.username).await?;
    fx.login.enter_password(&fx.config.password).await?;
    fx.login.click_remember_me().await?;
    fx.login.click_login().await?;

    check!(fx.login.is_logged_in().await?, "Login failed");

    let cookies = fx.session.cookie_names().await?;
    check!(
        cookies
            .iter()
            .any(|name| name.to_lowercase().contains("remember")),
        "Remember me cookie not set"
    );
    Ok(())
}

/// TC-AUTH-010: Logout Functionality
pub async fn logout(fx: &Fixture<'_>) -> Result<()> {
    info!("Running Logout Functionality");
    fx.open_login().await?;

    fx.login
        .login(&fx.config.username, &fx.config.password)
        .await?;
    check!(fx.login.is_logged_in().await?, "Login failed");

    fx.dashboard.logout().await?;
    fx.dashboard.wait_for_login_redirect().await?;

    check!(
        fx.current_url().await?.contains("/login"),
        "Not redirected to login after logout"
    );
    Ok(())
}

/// TC-AUTH-DDT: one invalid username/password combination
pub async fn multiple_invalid_inputs(
    fx: &Fixture<'_>,
    username: &str,
    password: &str,
) -> Result<()> {
    info!("Running Multiple Invalid Inputs [{}]", input_label(username, password));
    fx.open_login().await?;

    if !username.is_empty() {
        fx.login.enter_username(username).await?;
    }
    if !password.is_empty() {
        fx.login.enter_password(password).await?;
    }
    fx.login.click_login().await?;

    check!(
        !fx.login.is_logged_in().await?,
        "Logged in with invalid inputs: {}/{}",
        username,
        password
    );
    Ok(())
}
