use crate::domain::ports::ObservationSource;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches salary observations from an endpoint returning a plain JSON
/// numeric array (`GET /salary-data`). The array is validated server-side
/// and used as-is; only the shape of the body is checked here.
pub struct JsonArraySource {
    client: Client,
    url: String,
}

impl JsonArraySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ObservationSource for JsonArraySource {
    async fn fetch(&self) -> Result<Vec<f64>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::ServerError {
                status: status.as_u16(),
                message: format!("salary data request returned {}", status),
            });
        }

        response
            .json::<Vec<f64>>()
            .await
            .map_err(|e| DashboardError::ParseError {
                message: format!("salary data was not a JSON numeric array: {}", e),
            })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
