//! Local place search
//!
//! A local search runs up to three dependent requests, strictly in order:
//! location discovery, then point-of-interest details, then descriptions.
//! When discovery finds no locations the search is answered by a general
//! web search instead.

use super::client::{LocationId, SearchClient};
use super::models::{LocalQuery, SearchQuery};
use crate::error::ToolResult;
use crate::results::{format_places, PlaceResult};
use tracing::{debug, info};

/// What location discovery produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationDiscovery {
    Found(Vec<LocationId>),
    Empty,
}

impl From<Vec<LocationId>> for LocationDiscovery {
    fn from(ids: Vec<LocationId>) -> Self {
        if ids.is_empty() {
            LocationDiscovery::Empty
        } else {
            LocationDiscovery::Found(ids)
        }
    }
}

/// Text produced by a local search, tagged with the path that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSearchOutcome {
    /// Formatted place blocks
    Places(String),
    /// Output of the general web search used as fallback
    WebFallback(String),
}

impl LocalSearchOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LocalSearchOutcome::WebFallback(_))
    }

    pub fn into_text(self) -> String {
        match self {
            LocalSearchOutcome::Places(text) | LocalSearchOutcome::WebFallback(text) => text,
        }
    }
}

/// Orchestrates the local search requests over one [`SearchClient`]
pub struct LocalSearch<'a> {
    client: &'a SearchClient,
}

impl<'a> LocalSearch<'a> {
    pub fn new(client: &'a SearchClient) -> Self {
        Self { client }
    }

    /// Run discovery and dispatch on its outcome
    pub async fn run(&self, query: &LocalQuery) -> ToolResult<LocalSearchOutcome> {
        let discovery = LocationDiscovery::from(self.client.discover_locations(query).await?);

        match discovery {
            LocationDiscovery::Empty => {
                info!(query = %query.text, "No locations found, falling back to web search");
                let fallback = SearchQuery::fallback_for(query);
                let text = self.client.web_search(&fallback).await?;
                Ok(LocalSearchOutcome::WebFallback(text))
            }
            LocationDiscovery::Found(ids) => {
                let places = self.places(&ids).await?;
                Ok(LocalSearchOutcome::Places(format_places(&places)))
            }
        }
    }

    /// Fetch details and descriptions for `ids` and join them by id
    pub async fn places(&self, ids: &[LocationId]) -> ToolResult<Vec<PlaceResult>> {
        let details = self.client.place_details(ids).await?;
        let descriptions = self.client.place_descriptions(ids).await?;

        debug!(
            ids = ids.len(),
            places = details.results.len(),
            descriptions = descriptions.len(),
            "Fetched place details"
        );

        Ok(details
            .results
            .iter()
            .map(|poi| poi.normalize(&descriptions))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::ratelimit::RateLimiter;
    use crate::results::NO_DESCRIPTION;
    use crate::search::client::tests::client_for;
    use crate::search::models::{LocalSearchArgs, WebSearchArgs};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn local(query: &str) -> LocalQuery {
        LocalQuery::validate(&LocalSearchArgs::new(query)).unwrap()
    }

    async fn mount_locations(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .and(query_param("result_filter", "locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_discovery_outcome() {
        assert_eq!(LocationDiscovery::from(vec![]), LocationDiscovery::Empty);
        assert_eq!(
            LocationDiscovery::from(vec!["x".to_string()]),
            LocationDiscovery::Found(vec!["x".to_string()])
        );
    }

    #[tokio::test]
    async fn test_empty_discovery_matches_web_search_exactly() {
        let server = MockServer::start().await;
        mount_locations(&server, json!({"locations": {"results": []}})).await;
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "web": {"results": [{"title": "Pizza place", "description": "d", "url": "https://p"}]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, RateLimiter::new(10, 100));
        let outcome = LocalSearch::new(&client).run(&local("pizza")).await.unwrap();
        assert!(outcome.is_fallback());

        let direct = client
            .web_search(
                &SearchQuery::validate(&WebSearchArgs {
                    count: 5,
                    ..WebSearchArgs::new("pizza")
                })
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.into_text(), direct);
    }

    #[tokio::test]
    async fn test_fallback_can_return_no_results() {
        let server = MockServer::start().await;
        mount_locations(&server, json!({})).await;
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server, RateLimiter::new(10, 100));
        let outcome = LocalSearch::new(&client).run(&local("nowhere")).await.unwrap();
        assert_eq!(outcome, LocalSearchOutcome::WebFallback("No results found".to_string()));
    }

    #[tokio::test]
    async fn test_missing_description_uses_placeholder() {
        let server = MockServer::start().await;
        mount_locations(&server, json!({"locations": {"results": [{"id": "loc-1"}]}})).await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/pois"))
            .and(query_param("ids", "loc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "id": "loc-1",
                    "name": "Corner Deli",
                    "address": {"streetAddress": "5 Elm St", "addressLocality": "Springfield"},
                    "phone": "555-0100",
                    "rating": {"ratingValue": 4.2, "ratingCount": 87},
                    "priceRange": "$$"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/descriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"descriptions": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RateLimiter::new(10, 100));
        let outcome = LocalSearch::new(&client).run(&local("deli")).await.unwrap();

        assert!(!outcome.is_fallback());
        assert_eq!(
            outcome.into_text(),
            format!(
                "Name: Corner Deli\n\
                 Address: 5 Elm St, Springfield\n\
                 Phone: 555-0100\n\
                 Rating: 4.2 (87 reviews)\n\
                 Price Range: $$\n\
                 Hours: N/A\n\
                 Description: {}",
                NO_DESCRIPTION
            )
        );
        // discovery, details and descriptions each take a slot
        assert_eq!(client.limiter().usage().period_count, 3);
    }

    #[tokio::test]
    async fn test_places_joined_in_detail_order() {
        let server = MockServer::start().await;
        mount_locations(&server, json!({"locations": {"results": [{"id": "a"}, {"id": "b"}]}})).await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/pois"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": "b", "name": "B"}, {"id": "a", "name": "A"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/descriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "descriptions": {"a": "First", "b": "Second"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, RateLimiter::new(10, 100));
        let text = LocalSearch::new(&client).run(&local("shops")).await.unwrap().into_text();

        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Name: B\n"));
        assert!(blocks[0].ends_with("Description: Second"));
        assert!(blocks[1].ends_with("Description: First"));
    }

    #[tokio::test]
    async fn test_empty_details_yield_no_local_results() {
        let server = MockServer::start().await;
        mount_locations(&server, json!({"locations": {"results": [{"id": "a"}]}})).await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/pois"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/descriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server, RateLimiter::new(10, 100));
        let outcome = LocalSearch::new(&client).run(&local("x")).await.unwrap();
        assert_eq!(outcome, LocalSearchOutcome::Places("No local results found".to_string()));
    }

    #[tokio::test]
    async fn test_discovery_failure_does_not_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RateLimiter::new(10, 100));
        let err = LocalSearch::new(&client).run(&local("x")).await.unwrap_err();
        assert!(matches!(err, SearchError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_description_failure_fails_whole_search() {
        let server = MockServer::start().await;
        mount_locations(&server, json!({"locations": {"results": [{"id": "a"}]}})).await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/pois"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{"id": "a"}]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/descriptions"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = client_for(&server, RateLimiter::new(10, 100));
        let err = LocalSearch::new(&client).run(&local("x")).await.unwrap_err();
        match err {
            SearchError::Upstream { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chained_calls_count_against_quota() {
        let server = MockServer::start().await;
        mount_locations(&server, json!({"locations": {"results": [{"id": "a"}]}})).await;
        Mock::given(method("GET"))
            .and(path("/res/v1/local/pois"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(0)
            .mount(&server)
            .await;

        // one slot per second: discovery succeeds, the detail call is refused
        let client = client_for(&server, RateLimiter::new(1, 100));
        let err = LocalSearch::new(&client).run(&local("x")).await.unwrap_err();
        assert!(matches!(err, SearchError::RateLimitExceeded { .. }));
    }
}
