//! Product listing scenario
//!
//! TC-API-008: pagination structure and sort order.

use anyhow::Result;
use tracing::{debug, info};

use crate::assert::{check, check_eq, expect_status, field, has_key, str_field, AssertionFailure};
use crate::http::ApiClient;

/// Page size requested by the pagination scenario
pub const PAGE_LIMIT: usize = 10;

/// TC-API-008: GET Products List - Pagination
pub async fn products_pagination(client: &ApiClient) -> Result<()> {
    info!("Running GET Products List - Pagination");
    let limit = PAGE_LIMIT.to_string();
    let params = [("page", "1"), ("limit", limit.as_str()), ("sort", "name:asc")];

    let response = client.get("/products", &params).await?;

    expect_status(&response, 200)?;

    let data = response.json()?;

    check!(has_key(&data, "data"), "data missing");
    check!(has_key(&data, "pagination"), "pagination missing");
    check!(has_key(&data, "links"), "links missing");

    let pagination = &data["pagination"];
    check_eq!(pagination["page"], 1, "pagination.page");
    check_eq!(pagination["limit"], PAGE_LIMIT as u64, "pagination.limit");
    for key in ["totalPages", "totalItems", "hasNext", "hasPrevious"] {
        check!(has_key(pagination, key), "pagination.{} missing", key);
    }

    check!(has_key(&data["links"], "self"), "links.self missing");

    let products = field(&data, "data")?.as_array().ok_or_else(|| {
        anyhow::Error::new(AssertionFailure::new(format!(
            "data is not an array: {}",
            data["data"]
        )))
    })?;
    check!(
        products.len() <= PAGE_LIMIT,
        "Should not exceed limit ({} > {})",
        products.len(),
        PAGE_LIMIT
    );

    if products.len() > 1 {
        let names = products
            .iter()
            .map(|p| str_field(p, "name"))
            .collect::<Result<Vec<_>>>()?;
        debug!("Product names: {:?}", names);

        let mut sorted = names.clone();
        sorted.sort();
        check!(names == sorted, "Products not sorted correctly");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use serde_json::json;

    #[tokio::test]
    async fn test_pagination_against_mock() {
        let mock = MockApi::start().await;
        let client = ApiClient::new(mock.base_url()).unwrap();
        products_pagination(&client).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsorted_products_fail() {
        let mock = MockApi::builder().unsorted_products().start().await;
        let client = ApiClient::new(mock.base_url()).unwrap();

        let err = products_pagination(&client).await.unwrap_err();
        assert!(AssertionFailure::is_assertion(&err));
        assert_eq!(err.to_string(), "Products not sorted correctly");
    }

    #[tokio::test]
    async fn test_products_without_names_fail() {
        let mock = MockApi::builder()
            .products_data(json!([{"id": 1}, {"id": 2}]))
            .start()
            .await;
        let client = ApiClient::new(mock.base_url()).unwrap();

        let err = products_pagination(&client).await.unwrap_err();
        assert!(AssertionFailure::is_assertion(&err));
        assert_eq!(err.to_string(), "missing field 'name'");
    }

    #[tokio::test]
    async fn test_non_array_data_fails() {
        let mock = MockApi::builder()
            .products_data(json!({"unexpected": "object"}))
            .start()
            .await;
        let client = ApiClient::new(mock.base_url()).unwrap();

        let err = products_pagination(&client).await.unwrap_err();
        assert!(AssertionFailure::is_assertion(&err));
        assert!(err.to_string().starts_with("data is not an array"));
    }
}
