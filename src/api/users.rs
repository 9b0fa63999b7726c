//! User endpoint scenarios
//!
//! TC-API-001 .. TC-API-007: read, create, update and delete users.
//! All scenarios expect a client that already carries a bearer token.

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::assert::{
    check, check_eq, error_envelope, expect_status, field, has_key, str_field,
};
use crate::http::ApiClient;

/// User known to exist on the target environment
pub const EXISTING_USER_ID: u64 = 12345;

/// User id that must not exist
pub const MISSING_USER_ID: u64 = 999_999;

/// Email already registered on the target environment
pub const EXISTING_EMAIL: &str = "existinguser@example.com";

/// Unique address derived from the current unix time
fn unique_email(prefix: &str) -> String {
    format!("{prefix}_{}@example.com", chrono::Utc::now().timestamp())
}

/// Render a JSON id as a path segment
fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// TC-API-001: GET User By ID - Success
pub async fn get_user_by_id(client: &ApiClient) -> Result<()> {
    info!("Running GET User By ID - Success");
    let response = client.get(&format!("/users/{EXISTING_USER_ID}"), &[]).await?;

    expect_status(&response, 200)?;
    check_eq!(
        response.header("Content-Type").unwrap_or_default(),
        "application/json",
        "Content-Type"
    );
    check!(
        response.elapsed_secs() < 0.5,
        "Response time exceeded 500ms ({:.3}s)",
        response.elapsed_secs()
    );

    let data = response.json()?;
    check_eq!(data["id"], EXISTING_USER_ID, "id");
    check!(has_key(&data, "email"), "email missing");
    check!(has_key(&data, "firstName"), "firstName missing");
    check!(has_key(&data, "lastName"), "lastName missing");
    check!(!has_key(&data, "password"), "Password should not be exposed");

    check!(data["id"].is_i64() || data["id"].is_u64(), "id is not an integer");
    let email = str_field(&data, "email")?;
    check!(email.contains('@'), "Invalid email format");

    Ok(())
}

/// TC-API-002: GET User By ID - Not Found
pub async fn get_user_not_found(client: &ApiClient) -> Result<()> {
    info!("Running GET User By ID - Not Found");
    let response = client.get(&format!("/users/{MISSING_USER_ID}"), &[]).await?;

    expect_status(&response, 404)?;

    let error = error_envelope(&response)?;
    check_eq!(error["code"], "USER_NOT_FOUND", "error.code");
    check!(has_key(&error, "message"), "error.message missing");
    check!(has_key(&error, "timestamp"), "error.timestamp missing");

    Ok(())
}

/// TC-API-003: POST Create User - Success
pub async fn create_user(client: &ApiClient) -> Result<()> {
    info!("Running POST Create User - Success");
    let new_user = json!({
        "email": unique_email("newuser"),
        "firstName": "Jane",
        "lastName": "Smith",
        "password": "SecurePass@123",
        "phone": "+1987654321"
    });

    let response = client.post("/users", new_user.clone().into()).await?;

    expect_status(&response, 201)?;
    check!(response.has_header("Location"), "Location header missing");
    check!(
        response.elapsed_secs() < 1.0,
        "Response time exceeded 1000ms ({:.3}s)",
        response.elapsed_secs()
    );

    let data = response.json()?;
    check!(has_key(&data, "id"), "id missing");
    check_eq!(data["email"], new_user["email"], "email");
    check_eq!(data["firstName"], new_user["firstName"], "firstName");
    check!(!has_key(&data, "password"), "Password should not be returned");
    check_eq!(data["status"], "active", "status");

    check!(has_key(&data, "createdAt"), "createdAt missing");
    check!(has_key(&data, "updatedAt"), "updatedAt missing");

    Ok(())
}

/// TC-API-004: POST Create User - Duplicate Email
pub async fn create_user_duplicate_email(client: &ApiClient) -> Result<()> {
    info!("Running POST Create User - Duplicate Email");
    let duplicate_user = json!({
        "email": EXISTING_EMAIL,
        "firstName": "Test",
        "lastName": "User",
        "password": "SecurePass@123"
    });

    let response = client.post("/users", duplicate_user.into()).await?;

    expect_status(&response, 409)?;

    let error = error_envelope(&response)?;
    check_eq!(error["code"], "EMAIL_ALREADY_EXISTS", "error.code");
    check!(has_key(&error, "field"), "error.field missing");
    check_eq!(error["field"], "email", "error.field");

    Ok(())
}

/// TC-API-005: POST Create User - Invalid Email Format
pub async fn create_user_invalid_email(client: &ApiClient) -> Result<()> {
    info!("Running POST Create User - Invalid Email Format");
    let invalid_user = json!({
        "email": "invalid-email",
        "firstName": "Test",
        "lastName": "User",
        "password": "SecurePass@123"
    });

    let response = client.post("/users", invalid_user.into()).await?;

    expect_status(&response, 400)?;

    let error = error_envelope(&response)?;
    check_eq!(error["code"], "VALIDATION_ERROR", "error.code");
    let details = field(&error, "details")?;
    let mentions_email = details
        .as_array()
        .map(|items| items.iter().any(|d| d["field"] == "email"))
        .unwrap_or(false);
    check!(mentions_email, "no validation detail for field 'email'");

    Ok(())
}

/// TC-API-006: PUT Update User - Success
pub async fn update_user(client: &ApiClient) -> Result<()> {
    info!("Running PUT Update User - Success");
    let update_data = json!({
        "firstName": "John",
        "lastName": "Updated",
        "phone": "+1111111111"
    });

    let response = client
        .put(&format!("/users/{EXISTING_USER_ID}"), update_data.clone().into())
        .await?;

    expect_status(&response, 200)?;

    let data = response.json()?;
    check_eq!(data["firstName"], update_data["firstName"], "firstName");
    check_eq!(data["lastName"], update_data["lastName"], "lastName");
    check_eq!(data["phone"], update_data["phone"], "phone");

    check!(has_key(&data, "updatedAt"), "updatedAt missing");

    Ok(())
}

/// TC-API-007: DELETE User - Success
///
/// Creates a throwaway user first, deletes it, then confirms it is gone.
pub async fn delete_user(client: &ApiClient) -> Result<()> {
    info!("Running DELETE User - Success");
    let new_user = json!({
        "email": unique_email("todelete"),
        "firstName": "Delete",
        "lastName": "Me",
        "password": "SecurePass@123"
    });

    let create_response = client.post("/users", new_user.into()).await?;
    let created = create_response.json()?;
    let user_id = id_segment(field(&created, "id")?);
    debug!("Created user {} for deletion", user_id);

    let delete_response = client.delete(&format!("/users/{user_id}")).await?;

    expect_status(&delete_response, 204)?;
    check!(delete_response.is_empty(), "Response body should be empty");

    let get_response = client.get(&format!("/users/{user_id}"), &[]).await?;
    check_eq!(
        get_response.status(),
        404,
        "User should not exist after deletion"
    );

    Ok(())
}
