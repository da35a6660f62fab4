//! Rate-limited client for the Brave Search API

use super::api::{Descriptions, DescriptionsResponse, PoiResponse, WebSearchResponse};
use super::models::{Freshness, LocalQuery, ResultType, SearchQuery};
use crate::config::Settings;
use crate::error::{SearchError, ToolResult};
use crate::network::{ApiRequest, HttpClient};
use crate::ratelimit::RateLimiter;
use crate::results::{format_web_results, SearchResult};
use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

const WEB_SEARCH_PATH: &str = "/res/v1/web/search";
const POIS_PATH: &str = "/res/v1/local/pois";
const DESCRIPTIONS_PATH: &str = "/res/v1/local/descriptions";

/// Opaque identifier of a location result
pub type LocationId = String;

/// Client for the web search and local detail endpoints.
///
/// Every request takes a slot from the shared [`RateLimiter`] before it is
/// sent, and any non-2xx answer becomes [`SearchError::Upstream`].
#[derive(Clone)]
pub struct SearchClient {
    http: HttpClient,
    limiter: RateLimiter,
    web_search_url: Url,
    pois_url: Url,
    descriptions_url: Url,
    api_key: String,
    search_lang: String,
}

impl SearchClient {
    /// Create a client against `base_url` authenticating with `api_key`
    pub fn new(
        http: HttpClient,
        limiter: RateLimiter,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            http,
            limiter,
            web_search_url: base.join(WEB_SEARCH_PATH)?,
            pois_url: base.join(POIS_PATH)?,
            descriptions_url: base.join(DESCRIPTIONS_PATH)?,
            api_key: api_key.into(),
            search_lang: "en".to_string(),
        })
    }

    /// Create a client from validated settings
    pub fn from_settings(
        settings: &Settings,
        http: HttpClient,
        limiter: RateLimiter,
    ) -> anyhow::Result<Self> {
        let api_key = settings
            .api
            .api_key
            .clone()
            .context("BRAVE_API_KEY environment variable is required")?;
        let client = Self::new(http, limiter, &settings.api.base_url, api_key)?
            .with_search_lang(settings.api.search_lang.clone());
        Ok(client)
    }

    /// Set the language sent with location discovery
    pub fn with_search_lang(mut self, lang: impl Into<String>) -> Self {
        self.search_lang = lang.into();
        self
    }

    /// The limiter this client draws from
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    fn request(&self, url: &Url) -> ApiRequest {
        ApiRequest::get(url.as_str())
            .header("Accept", "application/json")
            .header("Accept-Encoding", "gzip")
            .header("X-Subscription-Token", self.api_key.as_str())
    }

    /// Build the web search request for a validated query
    pub fn web_request(&self, query: &SearchQuery) -> ApiRequest {
        let mut request = self
            .request(&self.web_search_url)
            .param("q", &query.text)
            .param("count", query.count)
            .param("offset", query.offset)
            .param("safesearch", query.safety_level.as_str());

        if query.result_type != ResultType::All {
            request = request.param("result_filter", query.result_type.as_str());
        }
        if query.freshness != Freshness::All {
            request = request.param("freshness", query.freshness.as_str());
        }
        request
    }

    /// Build the location discovery request for a validated local query
    pub fn locations_request(&self, query: &LocalQuery) -> ApiRequest {
        self.request(&self.web_search_url)
            .param("q", &query.text)
            .param("search_lang", &self.search_lang)
            .param("result_filter", "locations")
            .param("count", query.count)
            .param("safesearch", query.safety_level.as_str())
    }

    fn ids_request(&self, url: &Url, ids: &[LocationId]) -> ApiRequest {
        ids.iter()
            .fold(self.request(url), |request, id| request.param("ids", id))
    }

    /// Take a quota slot, send, and decode a success body
    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ToolResult<T> {
        self.limiter.acquire()?;

        let url = request.url.clone();
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            warn!(url = %url, status = response.status, "Brave API returned an error");
            return Err(SearchError::Upstream {
                status: response.status,
                body: response.text,
            });
        }

        Ok(response.json::<T>()?)
    }

    /// Run a web search and return normalized results
    pub async fn search(&self, query: &SearchQuery) -> ToolResult<Vec<SearchResult>> {
        let body: WebSearchResponse = self.send(self.web_request(query)).await?;
        let results = body.normalize(query.result_type);
        debug!(
            query = %query.text,
            result_type = query.result_type.as_str(),
            count = results.len(),
            "Web search returned results"
        );
        Ok(results)
    }

    /// Run a web search and render it as text
    pub async fn web_search(&self, query: &SearchQuery) -> ToolResult<String> {
        let results = self.search(query).await?;
        Ok(format_web_results(&results))
    }

    /// Ask for location results only and collect their identifiers
    pub async fn discover_locations(&self, query: &LocalQuery) -> ToolResult<Vec<LocationId>> {
        let body: WebSearchResponse = self.send(self.locations_request(query)).await?;
        let ids = body.location_ids();
        debug!(query = %query.text, count = ids.len(), "Location discovery finished");
        Ok(ids)
    }

    /// Fetch point-of-interest records for `ids`
    pub async fn place_details(&self, ids: &[LocationId]) -> ToolResult<PoiResponse> {
        self.send(self.ids_request(&self.pois_url, ids)).await
    }

    /// Fetch descriptions for `ids`
    pub async fn place_descriptions(&self, ids: &[LocationId]) -> ToolResult<Descriptions> {
        let body: DescriptionsResponse = self
            .send(self.ids_request(&self.descriptions_url, ids))
            .await?;
        Ok(body.into())
    }
}
