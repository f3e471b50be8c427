pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{Cli, Command, DashboardConfig};
pub use core::chart::{ChartPanel, ChartState};
pub use core::form::{FormPhase, PredictionForm};
pub use core::predict::PredictionClient;
pub use utils::error::{DashboardError, Result};
