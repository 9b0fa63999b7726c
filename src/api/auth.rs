//! Authentication scenarios
//!
//! TC-API-009 .. TC-API-011: login success, bad credentials and access
//! without a token.

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::assert::{check, check_eq, error_envelope, expect_status, has_key, str_field};
use crate::http::ApiClient;

/// Login request body
pub fn credentials(email: &str, password: &str) -> serde_json::Value {
    json!({ "email": email, "password": password })
}

/// TC-API-009: POST Login - Success
pub async fn login_success(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    info!("Running POST Login - Success");
    let response = client
        .post("/auth/login", credentials(email, password).into())
        .await?;

    expect_status(&response, 200)?;
    check!(
        response.elapsed_secs() < 1.0,
        "Response time exceeded 1000ms ({:.3}s)",
        response.elapsed_secs()
    );

    let data = response.json()?;
    for key in ["accessToken", "refreshToken", "tokenType"] {
        check!(has_key(&data, key), "{} missing", key);
    }
    check_eq!(data["tokenType"], "Bearer", "tokenType");
    check!(has_key(&data, "expiresIn"), "expiresIn missing");
    check!(has_key(&data, "user"), "user missing");

    let token = str_field(&data, "accessToken")?;
    check_eq!(token.matches('.').count(), 2, "Invalid JWT format");

    let user = &data["user"];
    check_eq!(user["email"], email, "user.email");
    check!(!has_key(user, "password"), "Password should not be returned");

    Ok(())
}

/// TC-API-010: POST Login - Invalid Credentials
pub async fn login_invalid_credentials(client: &ApiClient, email: &str) -> Result<()> {
    info!("Running POST Login - Invalid Credentials");
    let response = client
        .post("/auth/login", credentials(email, "WrongPassword").into())
        .await?;

    expect_status(&response, 401)?;

    let error = error_envelope(&response)?;
    check_eq!(error["code"], "INVALID_CREDENTIALS", "error.code");

    // Generic message only, no hint which field was wrong
    let message = str_field(&error, "message")?.to_lowercase();
    check!(message.contains("invalid"), "unexpected message: {}", message);

    Ok(())
}

/// TC-API-011: Unauthorized Access - No Token
pub async fn unauthorized_access(client: &ApiClient) -> Result<()> {
    info!("Running Unauthorized Access - No Token");
    let response = client.get("/users/12345", &[]).await?;

    expect_status(&response, 401)?;
    check!(
        response.has_header("WWW-Authenticate"),
        "WWW-Authenticate header missing"
    );

    let error = error_envelope(&response)?;
    check_eq!(error["code"], "UNAUTHORIZED", "error.code");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_auth_scenarios_against_mock() {
        let mock = MockApi::start().await;
        let client = ApiClient::new(mock.base_url()).unwrap();

        assert_ok!(login_success(&client, MockApi::EMAIL, MockApi::PASSWORD).await);
        assert_ok!(login_invalid_credentials(&client, MockApi::EMAIL).await);
        assert_ok!(unauthorized_access(&client).await);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let mock = MockApi::start().await;
        let client = ApiClient::new(mock.base_url()).unwrap();

        let err = login_success(&client, MockApi::EMAIL, "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected 200, got 401");
    }
}
