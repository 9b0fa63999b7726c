//! REST API scenarios
//!
//! ## Scenario groups
//!
//! - Users (TC-API-001 .. 007), run with a logged-in client
//! - Products (TC-API-008)
//! - Auth (TC-API-009 .. 011)
//! - RateLimiting (TC-API-012)
//! - Performance (TC-API-PERF)
//!
//! Every scenario gets a fresh [`ApiClient`]; nothing is shared between
//! scenarios.

mod auth;
mod performance;
mod products;
mod rate_limit;
mod users;

pub use performance::LoadTest;
pub use rate_limit::RateLimitTest;

use anyhow::{bail, Result};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::executor::{ScenarioSuite, Variant, Verdict};
use crate::http::ApiClient;
use crate::models::{Suite, TestCase};

/// API suite fixture
pub struct ApiSuite {
    config: ApiConfig,
}

impl ApiSuite {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Plain client without credentials
    fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config.base_url)
    }

    /// Client logged in with the configured credentials
    ///
    /// The token is only set when login answers 200; scenarios then see the
    /// server's unauthenticated responses and fail on their own assertions.
    async fn authenticated_client(&self) -> Result<ApiClient> {
        let mut client = self.client()?;

        let response = client
            .post(
                "/auth/login",
                auth::credentials(&self.config.email, &self.config.password).into(),
            )
            .await?;

        if response.status() == 200 {
            match response.json()?.get("accessToken").and_then(|t| t.as_str()) {
                Some(token) => {
                    client.set_auth_token(token)?;
                    debug!("Fixture logged in as {}", self.config.email);
                }
                None => warn!("Login succeeded without an accessToken"),
            }
        } else {
            warn!("Fixture login failed with status {}", response.status());
        }

        Ok(client)
    }
}

impl ScenarioSuite for ApiSuite {
    fn suite(&self) -> Suite {
        Suite::Api
    }

    fn target(&self) -> &str {
        &self.config.base_url
    }

    async fn run_case(&self, case: TestCase, _variant: Option<&Variant>) -> Result<Verdict> {
        match case {
            TestCase::GetUserById => {
                users::get_user_by_id(&self.authenticated_client().await?).await?
            }
            TestCase::GetUserNotFound => {
                users::get_user_not_found(&self.authenticated_client().await?).await?
            }
            TestCase::CreateUser => {
                users::create_user(&self.authenticated_client().await?).await?
            }
            TestCase::CreateUserDuplicateEmail => {
                users::create_user_duplicate_email(&self.authenticated_client().await?).await?
            }
            TestCase::CreateUserInvalidEmail => {
                users::create_user_invalid_email(&self.authenticated_client().await?).await?
            }
            TestCase::UpdateUser => {
                users::update_user(&self.authenticated_client().await?).await?
            }
            TestCase::DeleteUser => {
                users::delete_user(&self.authenticated_client().await?).await?
            }
            TestCase::ProductsPagination => products::products_pagination(&self.client()?).await?,
            TestCase::LoginSuccess => {
                auth::login_success(&self.client()?, &self.config.email, &self.config.password)
                    .await?
            }
            TestCase::LoginInvalidCredentials => {
                auth::login_invalid_credentials(&self.client()?, &self.config.email).await?
            }
            TestCase::UnauthorizedAccess => auth::unauthorized_access(&self.client()?).await?,
            TestCase::RateLimitExceeded => {
                return RateLimitTest::new()
                    .max_requests(self.config.max_requests)
                    .pause(Duration::from_millis(self.config.rate_limit_pause_ms))
                    .run(&self.client()?)
                    .await;
            }
            TestCase::ResponseTimeUnderLoad => {
                return LoadTest::new()
                    .num_requests(self.config.load_requests)
                    .run(&self.client()?)
                    .await;
            }
            other => bail!("{} is not an API scenario", other.code()),
        }

        Ok(Verdict::Pass)
    }
}
