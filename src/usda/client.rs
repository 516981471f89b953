//! HTTP client for the FoodData Central REST API

use crate::config::{clamp_search_limit, UsdaConfig};
use crate::types::{FoodDetail, FoodSummary, NutritionError, Result};
use crate::usda::wire::{FoodResponse, SearchRequest, SearchResponse};
use crate::usda::FoodSource;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub struct UsdaClient {
    config: UsdaConfig,
    http: Client,
}

impl UsdaClient {
    pub fn new(config: UsdaConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(concat!("nutrimcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                NutritionError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { config, http })
    }

    /// Turn a response into `T`, mapping non-2xx statuses to
    /// [`NutritionError::Upstream`] with the body kept verbatim
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("USDA API returned {}", status);
            return Err(NutritionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FoodSource for UsdaClient {
    async fn search_foods(&self, query: &str, limit: u32) -> Result<Vec<FoodSummary>> {
        let page_size = clamp_search_limit(limit.into());
        let url = self.config.endpoint("foods/search");
        debug!("Searching USDA for '{}' (page size {})", query, page_size);

        let response = self
            .http
            .post(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .json(&SearchRequest::new(query, page_size, &self.config.data_types))
            .send()
            .await?;

        let data: SearchResponse = Self::decode(response).await?;
        if data.foods.is_empty() {
            return Err(NutritionError::NoResults(query.to_string()));
        }

        debug!("USDA search '{}' returned {} foods", query, data.foods.len());
        Ok(data.foods.into_iter().map(FoodSummary::from).collect())
    }

    async fn get_food_detail(&self, fdc_id: i64) -> Result<FoodDetail> {
        let url = self.config.endpoint(&format!("food/{}", fdc_id));
        debug!("Fetching USDA food {}", fdc_id);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await?;

        let data: FoodResponse = Self::decode(response).await?;
        Ok(data.into_detail(fdc_id))
    }
}
