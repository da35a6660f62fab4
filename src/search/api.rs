//! Brave Search API response shapes and their normalization
//!
//! The API omits fields freely, so every field here is optional and
//! normalization fills the gaps.

use super::models::{Category, ResultType};
use crate::results::{PlaceAddress, PlaceResult, SearchResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Body of `/res/v1/web/search`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebSearchResponse {
    pub web: Option<ResultSection>,
    pub news: Option<ResultSection>,
    pub videos: Option<ResultSection>,
    pub locations: Option<LocationSection>,
}

impl WebSearchResponse {
    fn section(&self, category: Category) -> Option<&ResultSection> {
        match category {
            Category::Web => self.web.as_ref(),
            Category::News => self.news.as_ref(),
            Category::Videos => self.videos.as_ref(),
        }
    }

    /// Results of one category, in provider order
    pub fn normalize_category(&self, category: Category) -> Vec<SearchResult> {
        self.section(category)
            .map(|section| section.results.iter().map(RawResult::normalize).collect())
            .unwrap_or_default()
    }

    /// Results of every category `result_type` admits, web then news then videos
    pub fn normalize(&self, result_type: ResultType) -> Vec<SearchResult> {
        Category::ORDERED
            .into_iter()
            .filter(|category| result_type.includes(*category))
            .flat_map(|category| self.normalize_category(category))
            .collect()
    }

    /// Identifiers of location results; entries without one are dropped
    pub fn location_ids(&self) -> Vec<String> {
        self.locations
            .as_ref()
            .map(|section| {
                section
                    .results
                    .iter()
                    .filter_map(|loc| loc.id.clone())
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResultSection {
    pub results: Vec<RawResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawResult {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published: Option<String>,
}

impl RawResult {
    fn normalize(&self) -> SearchResult {
        SearchResult::new(
            self.title.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.url.clone().unwrap_or_default(),
        )
        .with_published(self.published.clone().unwrap_or_default())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocationSection {
    pub results: Vec<RawLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    pub id: Option<String>,
}

/// Body of `/res/v1/local/pois`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PoiResponse {
    pub results: Vec<RawPoi>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPoi {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<RawAddress>,
    pub phone: Option<String>,
    pub rating: Option<RawRating>,
    pub price_range: Option<String>,
    pub opening_hours: Option<Vec<String>>,
}

impl RawPoi {
    /// Build the place record, taking its description from `descriptions`
    pub fn normalize(&self, descriptions: &Descriptions) -> PlaceResult {
        let address = self
            .address
            .as_ref()
            .map(RawAddress::normalize)
            .unwrap_or_default();
        let rating = self.rating.as_ref();

        PlaceResult {
            id: self.id.clone(),
            name: self.name.clone(),
            address,
            phone: self.phone.clone(),
            rating_value: rating.and_then(|r| value_text(&r.rating_value)),
            rating_count: rating.and_then(|r| value_text(&r.rating_count)),
            price_range: self.price_range.clone(),
            opening_hours: self.opening_hours.clone().unwrap_or_default(),
            description: self
                .id
                .as_deref()
                .and_then(|id| descriptions.get(id))
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAddress {
    pub street_address: Option<String>,
    pub address_locality: Option<String>,
    pub address_region: Option<String>,
    pub postal_code: Option<String>,
}

impl RawAddress {
    fn normalize(&self) -> PlaceAddress {
        PlaceAddress {
            street_address: self.street_address.clone().unwrap_or_default(),
            locality: self.address_locality.clone().unwrap_or_default(),
            region: self.address_region.clone().unwrap_or_default(),
            postal_code: self.postal_code.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawRating {
    pub rating_value: Value,
    pub rating_count: Value,
}

/// Body of `/res/v1/local/descriptions`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DescriptionsResponse {
    pub descriptions: HashMap<String, Option<String>>,
}

/// Free-text descriptions keyed by location id
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Descriptions(HashMap<String, String>);

impl Descriptions {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<DescriptionsResponse> for Descriptions {
    fn from(response: DescriptionsResponse) -> Self {
        Self(
            response
                .descriptions
                .into_iter()
                .filter_map(|(id, text)| text.map(|text| (id, text)))
                .collect(),
        )
    }
}

/// Scalar JSON rendered as text; null or missing is `None`
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> WebSearchResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_categories_concatenate_in_fixed_order() {
        let body = response(json!({
            "videos": {"results": [{"title": "V", "description": "v", "url": "https://v"}]},
            "news": {"results": [{"title": "N", "description": "n", "url": "https://n", "published": "1h"}]},
            "web": {"results": [{"title": "W", "description": "w", "url": "https://w"}]}
        }));

        let titles: Vec<_> = body
            .normalize(ResultType::All)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["W", "N", "V"]);
    }

    #[test]
    fn test_result_type_restricts_categories() {
        let body = response(json!({
            "web": {"results": [{"title": "W", "description": "w", "url": "https://w"}]},
            "news": {"results": [{"title": "N", "description": "n", "url": "https://n"}]}
        }));

        let news = body.normalize(ResultType::News);
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "N");
        assert!(body.normalize(ResultType::Videos).is_empty());
    }

    #[test]
    fn test_missing_fields_normalize_to_empty() {
        let body = response(json!({"web": {"results": [{"url": "https://w", "published": null}]}}));
        let results = body.normalize(ResultType::Web);
        assert_eq!(results[0], SearchResult::new("", "", "https://w"));
    }

    #[test]
    fn test_location_ids_keep_order_and_duplicates() {
        let body = response(json!({
            "locations": {"results": [
                {"id": "b"}, {"title": "no id"}, {"id": "a"}, {"id": ""}, {"id": "b"}
            ]}
        }));
        assert_eq!(body.location_ids(), vec!["b", "a", "b"]);
        assert!(response(json!({})).location_ids().is_empty());
    }

    #[test]
    fn test_poi_normalization_joins_description() {
        let pois: PoiResponse = serde_json::from_value(json!({
            "results": [{
                "id": "loc-1",
                "name": "Cafe",
                "address": {"streetAddress": "1 Main St", "postalCode": "12345"},
                "rating": {"ratingValue": 4.5, "ratingCount": 12},
                "openingHours": ["Mo 8-5", "Tu 8-5"]
            }]
        }))
        .unwrap();
        let descriptions: Descriptions = serde_json::from_value::<DescriptionsResponse>(
            json!({"descriptions": {"loc-1": "Cozy", "other": null}}),
        )
        .unwrap()
        .into();

        let place = pois.results[0].normalize(&descriptions);
        assert_eq!(place.address.compose(), "1 Main St, 12345");
        assert_eq!(place.rating_value.as_deref(), Some("4.5"));
        assert_eq!(place.rating_count.as_deref(), Some("12"));
        assert_eq!(place.opening_hours.len(), 2);
        assert_eq!(place.description.as_deref(), Some("Cozy"));
        assert_eq!(descriptions.len(), 1);
    }

    #[test]
    fn test_poi_without_description_entry() {
        let poi: RawPoi = serde_json::from_value(json!({"id": "loc-9", "name": "Shop"})).unwrap();
        let place = poi.normalize(&Descriptions::default());
        assert_eq!(place.description, None);
        assert_eq!(place.rating_value, None);
    }
}
