pub mod chart;
pub mod fetch;
pub mod form;
pub mod histogram;
pub mod predict;
pub mod smoothing;

pub use crate::domain::model::{Bucket, PredictionRequest, SmoothedPoint};
pub use crate::domain::ports::{ConfigProvider, ObservationSource};
pub use crate::utils::error::Result;
