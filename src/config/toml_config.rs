use crate::core::histogram::{BinningStrategy, DEFAULT_BUCKET_WIDTH};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PREDICT_ENDPOINT: &str = "http://localhost:5000/predict";
pub const DEFAULT_SALARY_DATA_ENDPOINT: &str = "http://localhost:5000/salary-data";

/// Dashboard configuration, loadable from a TOML file. CLI flags override
/// individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_predict_endpoint")]
    pub predict: String,
    #[serde(default = "default_salary_data_endpoint")]
    pub salary_data: String,
}

/// Chart settings. `bucket_width` and `buckets` select between the two
/// binning modes; width wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    pub bucket_width: Option<f64>,
    pub buckets: Option<usize>,
}

fn default_predict_endpoint() -> String {
    DEFAULT_PREDICT_ENDPOINT.to_string()
}

fn default_salary_data_endpoint() -> String {
    DEFAULT_SALARY_DATA_ENDPOINT.to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            predict: default_predict_endpoint(),
            salary_data: default_salary_data_endpoint(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointsConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DashboardConfig =
            toml::from_str(&content).map_err(|e| DashboardError::ConfigError {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoints.predict", &self.endpoints.predict)?;
        validate_url("endpoints.salary_data", &self.endpoints.salary_data)?;

        if let Some(width) = self.chart.bucket_width {
            if !(width > 0.0) {
                return Err(DashboardError::InvalidConfigValueError {
                    field: "chart.bucket_width".to_string(),
                    value: width.to_string(),
                    reason: "Bucket width must be positive".to_string(),
                });
            }
        }
        if let Some(buckets) = self.chart.buckets {
            if buckets == 0 {
                return Err(DashboardError::InvalidConfigValueError {
                    field: "chart.buckets".to_string(),
                    value: buckets.to_string(),
                    reason: "Bucket count must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl ConfigProvider for DashboardConfig {
    fn predict_endpoint(&self) -> &str {
        &self.endpoints.predict
    }

    fn salary_data_endpoint(&self) -> &str {
        &self.endpoints.salary_data
    }

    fn binning(&self) -> BinningStrategy {
        if let Some(width) = self.chart.bucket_width {
            BinningStrategy::FixedWidth { width }
        } else if let Some(buckets) = self.chart.buckets {
            BinningStrategy::FixedCount { buckets }
        } else {
            BinningStrategy::FixedWidth {
                width: DEFAULT_BUCKET_WIDTH,
            }
        }
    }
}
