use crate::core::histogram::BinningStrategy;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces a flat sequence of salary observations from some external
/// resource (remote JSON array, CSV file, ...).
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<f64>>;

    /// Human-readable origin, used in log lines and error states.
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn predict_endpoint(&self) -> &str;
    fn salary_data_endpoint(&self) -> &str;
    fn binning(&self) -> BinningStrategy;
}
