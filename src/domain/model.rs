use crate::utils::error::Result;
use crate::utils::validation::{validate_positive, validate_required, Validate};
use serde::{Deserialize, Serialize};

/// Advisory age hints shown to the user; the service accepts anything.
pub const AGE_HINT_MIN: u32 = 21;
pub const AGE_HINT_MAX: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Education levels, serialized with the labels the prediction service was
/// trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Education {
    #[serde(rename = "High School")]
    #[value(name = "high-school")]
    HighSchool,
    #[serde(rename = "Bachelor's Degree")]
    Bachelor,
    #[serde(rename = "Master's Degree")]
    Master,
    #[serde(rename = "PhD")]
    #[value(name = "phd")]
    PhD,
}

/// One form submission payload. Created fresh per submit, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub age: u32,
    pub gender: Gender,
    pub education: Education,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(rename = "experience")]
    pub experience_years: f64,
}

impl Validate for PredictionRequest {
    fn validate(&self) -> Result<()> {
        validate_required("jobTitle", &self.job_title)?;
        validate_positive("experience", self.experience_years)?;
        Ok(())
    }
}

/// One contiguous sub-range of the observed salary domain. Buckets within a
/// dataset are equal-width, ordered ascending, and contiguous.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl Bucket {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// One point of the smoothed overlay, aligned one-to-one with buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedPoint {
    pub position: f64,
    pub value: f64,
}
