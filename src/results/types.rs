//! Normalized result records

use serde::{Deserialize, Serialize};

/// A web, news, or video result in provider-independent form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub url: String,
    /// Publication date as the provider reports it
    pub published_at: Option<String>,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            published_at: None,
        }
    }

    /// Set the publication date; an empty date counts as absent
    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        let published = published.into();
        self.published_at = (!published.is_empty()).then_some(published);
        self
    }
}

/// Postal address parts of a place, any of which may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceAddress {
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
}

impl PlaceAddress {
    /// Non-empty parts joined with ", ", or `N/A` when every part is empty
    pub fn compose(&self) -> String {
        let parts: Vec<&str> = [
            &self.street_address,
            &self.locality,
            &self.region,
            &self.postal_code,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            "N/A".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// A point of interest joined with its description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: PlaceAddress,
    pub phone: Option<String>,
    pub rating_value: Option<String>,
    pub rating_count: Option<String>,
    pub price_range: Option<String>,
    pub opening_hours: Vec<String>,
    pub description: Option<String>,
}
