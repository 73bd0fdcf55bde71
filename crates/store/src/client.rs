//! Record-store client contract and the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use procura_shared::config::BackendConfig;

use crate::error::StoreError;
use crate::filter::ListQuery;

/// Page size used while walking the backend's paged list endpoint.
const DEFAULT_PAGE_SIZE: usize = 500;

/// Client contract for the generic record store.
///
/// Implementations must be shareable across tasks; components hold an
/// `Arc<dyn RecordStore>` handed to them at construction so tests can
/// substitute the in-memory double.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates a record in a collection, returning the stored record.
    async fn create(&self, collection: &str, record: Value) -> Result<Value, StoreError>;

    /// Lists records in a collection matching a query.
    ///
    /// An empty result is not an error.
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError>;

    /// Fetches a single record by id.
    async fn get_one(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    /// Applies a partial update to a record, returning the updated record.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<Value, StoreError>;

    /// Deletes a record by id.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// One page of a paged list response returned by the backend.
#[derive(Debug, Default, Deserialize)]
struct ListPage {
    #[serde(default)]
    page: u64,
    #[serde(default, rename = "totalPages")]
    total_pages: u64,
    #[serde(default)]
    items: Vec<Value>,
}

/// Parses a decoded list body into a page.
///
/// A 2xx response with an empty body decodes to [`Value::Null`]; that is
/// an empty page, not a malformed one.
fn parse_list_page(body: Value) -> Result<ListPage, StoreError> {
    if body.is_null() {
        return Ok(ListPage::default());
    }
    Ok(serde_json::from_value(body)?)
}

/// Whether more pages follow the given one.
fn has_more_pages(page: &ListPage) -> bool {
    !page.items.is_empty() && page.page < page.total_pages
}

/// HTTP implementation of [`RecordStore`].
///
/// Speaks the backend's JSON-over-HTTP record API, authenticated with a
/// bearer token obtained externally. No retries and no timeout beyond the
/// configured client timeout; a hanging backend call hangs the caller.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpStore {
    /// Creates an HTTP store from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{collection}/records", self.base_url)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{id}", self.collection_url(collection))
    }

    async fn decode(response: reqwest::Response) -> Result<Value, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_page(
        &self,
        collection: &str,
        query: &ListQuery,
        page: u64,
        per_page: usize,
    ) -> Result<ListPage, StoreError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        if let Some(filter) = &query.filter {
            params.push(("filter", filter.render()));
        }
        if let Some(sort) = &query.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(fields) = &query.fields {
            params.push(("fields", fields.join(",")));
        }

        let response = self
            .client
            .get(self.collection_url(collection))
            .bearer_auth(&self.token)
            .query(&params)
            .send()
            .await?;

        let body = Self::decode(response).await?;
        parse_list_page(body)
    }
}

#[async_trait]
impl RecordStore for HttpStore {
    async fn create(&self, collection: &str, record: Value) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .bearer_auth(&self.token)
            .json(&record)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError> {
        // An explicit limit fits in one request.
        if let Some(limit) = query.limit {
            let page = self.fetch_page(collection, &query, 1, limit).await?;
            return Ok(page.items);
        }

        // Without a limit the caller wants every matching record; a large
        // collection spans multiple pages, so walk them until exhausted.
        let mut items = Vec::new();
        let mut page_number = 1;
        loop {
            let page = self
                .fetch_page(collection, &query, page_number, DEFAULT_PAGE_SIZE)
                .await?;
            let more = has_more_pages(&page);
            items.extend(page.items);
            if !more {
                return Ok(items);
            }
            page_number += 1;
        }
    }

    async fn get_one(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let response = self
            .client
            .get(self.record_url(collection, id))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Self::decode(response).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<Value, StoreError> {
        let response = self
            .client
            .patch(self.record_url(collection, id))
            .bearer_auth(&self.token)
            .json(&patch)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Self::decode(response).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.record_url(collection, id))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Self::decode(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_shared::config::BackendConfig;

    fn test_config() -> BackendConfig {
        BackendConfig {
            base_url: "http://localhost:8090/".to_string(),
            token: "token".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let store = HttpStore::from_config(&test_config()).expect("client should build");
        assert_eq!(
            store.collection_url("users"),
            "http://localhost:8090/api/collections/users/records"
        );
        assert_eq!(
            store.record_url("users", "u123456789abcde"),
            "http://localhost:8090/api/collections/users/records/u123456789abcde"
        );
    }

    #[test]
    fn test_list_page_parses_paging_fields() {
        let page = parse_list_page(serde_json::json!({
            "page": 2,
            "totalPages": 5,
            "items": [{"id": "r1"}, {"id": "r2"}]
        }))
        .expect("should parse");
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_list_page_tolerates_missing_items() {
        let page = parse_list_page(serde_json::json!({"page": 1})).expect("should parse");
        assert!(page.items.is_empty());
        assert!(!has_more_pages(&page));
    }

    #[test]
    fn test_list_page_empty_body_is_empty_page() {
        let page = parse_list_page(Value::Null).expect("empty body should parse");
        assert!(page.items.is_empty());
        assert!(!has_more_pages(&page));
    }

    #[test]
    fn test_page_walk_stops_on_last_page() {
        let mid = parse_list_page(serde_json::json!({
            "page": 1, "totalPages": 3, "items": [{"id": "r1"}]
        }))
        .expect("should parse");
        assert!(has_more_pages(&mid));

        let last = parse_list_page(serde_json::json!({
            "page": 3, "totalPages": 3, "items": [{"id": "r3"}]
        }))
        .expect("should parse");
        assert!(!has_more_pages(&last));

        // A page that unexpectedly comes back empty also stops the walk.
        let empty = parse_list_page(serde_json::json!({
            "page": 2, "totalPages": 3, "items": []
        }))
        .expect("should parse");
        assert!(!has_more_pages(&empty));
    }
}
