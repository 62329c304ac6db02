//! Product image lookup against an Open Food Facts–compatible search API.

use serde::Deserialize;
use std::time::Duration;

use super::{build_http_client, status_error};
use crate::config::FoodConfig;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Default, Deserialize)]
struct Product {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image_front_url: Option<String>,
}

impl Product {
    fn image(&self) -> Option<&str> {
        [&self.image_url, &self.image_front_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .map(str::trim)
            .find(|url| !url.is_empty())
    }
}

/// Looks up a representative image URL for a food name.
#[derive(Debug, Clone)]
pub struct FoodImageClient {
    http: reqwest::Client,
    base_url: String,
}

impl FoodImageClient {
    pub fn new(config: &FoodConfig, timeout: Duration) -> Self {
        Self {
            http: build_http_client(timeout),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Image URL for `name`, or `None` when nothing was found or the request
    /// failed. Failures are logged, never returned.
    pub async fn lookup(&self, name: &str) -> Option<String> {
        match self.try_lookup(name).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                tracing::debug!(name, "no food image found");
                None
            }
            Err(err) => {
                tracing::warn!(name, error = %err, "food image lookup failed");
                None
            }
        }
    }

    async fn try_lookup(&self, name: &str) -> Result<Option<String>, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let url = format!("{}/cgi/search.pl", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("search_terms", name),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", "1"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        let parsed = response.json::<SearchResponse>().await?;
        Ok(first_image_url(&parsed))
    }
}

fn first_image_url(response: &SearchResponse) -> Option<String> {
    response
        .products
        .iter()
        .find_map(Product::image)
        .map(str::to_string)
}
