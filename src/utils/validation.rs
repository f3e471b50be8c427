use crate::utils::error::{DashboardError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DashboardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::ValidationError {
            message: format!("{} is required", field_name),
        });
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a non-negative finite number".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("endpoint", "http://localhost:5000/predict").is_ok());
        assert!(validate_url("endpoint", "https://example.com/salary-data").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_empty_and_bad_scheme() {
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
        assert!(validate_url("endpoint", "not a url").is_err());
    }

    #[test]
    fn test_validate_required_rejects_blank() {
        assert!(validate_required("jobTitle", "").is_err());
        assert!(validate_required("jobTitle", "   ").is_err());
        assert!(validate_required("jobTitle", "Data Analyst").is_ok());
    }

    #[test]
    fn test_validate_positive_rejects_negative_and_nan() {
        assert!(validate_positive("experience", -1.0).is_err());
        assert!(validate_positive("experience", f64::NAN).is_err());
        assert!(validate_positive("experience", 0.0).is_ok());
        assert!(validate_positive("experience", 5.5).is_ok());
    }
}
