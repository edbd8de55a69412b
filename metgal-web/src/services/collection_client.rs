//! Met collection API client
//!
//! Three read-only endpoints: department list, identifier search and object
//! detail. One attempt per call; no retries, no caching.

use async_trait::async_trait;
use metgal_common::{Department, FilterCriteria, ObjectId, ObjectRecord};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("metgal/", env!("CARGO_PKG_VERSION"));

/// Collection API errors (the upstream failures of a request)
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Read access to the remote collection
///
/// `fetch_object` returns `Ok(None)` when the remote reports the object as
/// absent; that is a normal outcome, not an error.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// All departments, in remote order
    async fn list_departments(&self) -> Result<Vec<Department>, CollectionError>;

    /// Identifiers of every object that has images (unfiltered listing)
    async fn search_all_with_images(&self) -> Result<Vec<ObjectId>, CollectionError>;

    /// Identifiers matching keyword, department and geolocation
    async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<ObjectId>, CollectionError>;

    /// Detail record for one object
    async fn fetch_object(&self, id: ObjectId) -> Result<Option<ObjectRecord>, CollectionError>;
}

#[derive(Debug, Deserialize)]
struct DepartmentsResponse {
    departments: Vec<Department>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total: u64,
    /// `null` when nothing matched
    #[serde(rename = "objectIDs", default)]
    object_ids: Option<Vec<ObjectId>>,
}

/// reqwest implementation of [`CollectionApi`]
pub struct MetCollectionClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MetCollectionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CollectionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CollectionError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn run_search(&self, params: &[(&str, &str)]) -> Result<Vec<ObjectId>, CollectionError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(url = %url, params = ?params, "Querying collection search");

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| CollectionError::NetworkError(e.to_string()))?;

        let body: SearchResponse = read_json(response).await?;
        let ids = body.object_ids.unwrap_or_default();

        tracing::debug!(total = body.total, matches = ids.len(), "Collection search complete");
        Ok(ids)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CollectionError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(CollectionError::ApiError(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| CollectionError::ParseError(e.to_string()))
}

#[async_trait]
impl CollectionApi for MetCollectionClient {
    async fn list_departments(&self) -> Result<Vec<Department>, CollectionError> {
        let url = format!("{}/departments", self.base_url);
        tracing::debug!(url = %url, "Fetching departments");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CollectionError::NetworkError(e.to_string()))?;

        let body: DepartmentsResponse = read_json(response).await?;
        Ok(body.departments)
    }

    async fn search_all_with_images(&self) -> Result<Vec<ObjectId>, CollectionError> {
        self.run_search(&[("q", ""), ("hasImages", "true")]).await
    }

    async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<ObjectId>, CollectionError> {
        let mut params = vec![("q", criteria.keyword.as_deref().unwrap_or(""))];
        if let Some(department) = criteria.department.as_deref() {
            params.push(("departmentId", department));
        }
        if let Some(location) = criteria.geolocation.as_deref() {
            params.push(("geoLocation", location));
        }

        self.run_search(&params).await
    }

    async fn fetch_object(&self, id: ObjectId) -> Result<Option<ObjectRecord>, CollectionError> {
        let url = format!("{}/objects/{}", self.base_url, id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CollectionError::NetworkError(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        read_json(response).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> MetCollectionClient {
        MetCollectionClient::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_departments() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/departments")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"departments":[
                    {"departmentId":1,"displayName":"The American Wing"},
                    {"departmentId":3,"displayName":"Ancient Near Eastern Art"}
                ]}"#,
            )
            .create_async()
            .await;

        let departments = client_for(&server).list_departments().await.unwrap();

        mock.assert_async().await;
        assert_eq!(departments.len(), 2);
        assert_eq!(departments[1].department_id, 3);
        assert_eq!(departments[0].display_name, "The American Wing");
    }

    #[tokio::test]
    async fn test_list_departments_server_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/departments")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let result = client_for(&server).list_departments().await;
        assert!(matches!(result, Err(CollectionError::ApiError(502, _))));
    }

    #[tokio::test]
    async fn test_search_all_with_images_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "".into()),
                Matcher::UrlEncoded("hasImages".into(), "true".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"total":3,"objectIDs":[10,20,30]}"#)
            .create_async()
            .await;

        let ids = client_for(&server).search_all_with_images().await.unwrap();

        mock.assert_async().await;
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_search_sends_only_present_filters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "vase".into()),
                Matcher::UrlEncoded("departmentId".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"total":1,"objectIDs":[42]}"#)
            .create_async()
            .await;

        let criteria = FilterCriteria::new(Some("1".into()), Some("vase".into()), None);
        let ids = client_for(&server).search(&criteria).await.unwrap();

        mock.assert_async().await;
        assert_eq!(ids, vec![42]);
    }

    #[tokio::test]
    async fn test_search_null_object_ids_is_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total":0,"objectIDs":null}"#)
            .create_async()
            .await;

        let criteria = FilterCriteria::new(None, Some("zzzz".into()), Some("Atlantis".into()));
        let ids = client_for(&server).search(&criteria).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_object_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/objects/45734")
            .with_status(200)
            .with_body(r#"{"objectID":45734,"title":"Quail and Millet","culture":"Japan"}"#)
            .create_async()
            .await;

        let record = client_for(&server).fetch_object(45734).await.unwrap().unwrap();
        assert_eq!(record.object_id, 45734);
        assert_eq!(record.title_text(), Some("Quail and Millet"));
    }

    #[tokio::test]
    async fn test_fetch_object_not_found_is_none() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/objects/999")
            .with_status(404)
            .with_body(r#"{"message":"ObjectID not found"}"#)
            .create_async()
            .await;

        let result = client_for(&server).fetch_object(999).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_object_malformed_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/objects/5")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = client_for(&server).fetch_object(5).await;
        assert!(matches!(result, Err(CollectionError::ParseError(_))));
    }
}
