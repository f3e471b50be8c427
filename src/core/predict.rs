use crate::domain::model::PredictionRequest;
use crate::utils::error::{DashboardError, Result};
use reqwest::Client;
use serde::Deserialize;

/// Successful response schema. The service returns the estimate under
/// `salary`; older deployments used `prediction`. Anything else is malformed.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    salary: Option<f64>,
    prediction: Option<f64>,
}

impl PredictionResponse {
    fn amount(&self) -> Option<f64> {
        self.salary.or(self.prediction).filter(|v| v.is_finite())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Thin wrapper around the one `POST /predict` call. No retry; no timeout
/// beyond transport defaults.
pub struct PredictionClient {
    client: Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Posts the form payload and extracts the predicted amount. Non-2xx
    /// responses become `ServerError` carrying the server message when one
    /// was provided; a 2xx body without a numeric estimate is a `ParseError`.
    pub async fn predict(&self, request: &PredictionRequest) -> Result<f64> {
        tracing::debug!("Posting prediction request to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Prediction response status: {}", status);

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Server error".to_string());
            return Err(DashboardError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body: PredictionResponse =
            response
                .json()
                .await
                .map_err(|e| DashboardError::ParseError {
                    message: format!("prediction response was not valid JSON: {}", e),
                })?;

        body.amount().ok_or_else(|| DashboardError::ParseError {
            message: "prediction response missing numeric salary field".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Education, Gender};
    use httpmock::prelude::*;

    fn sample_request() -> PredictionRequest {
        PredictionRequest {
            age: 30,
            gender: Gender::Male,
            education: Education::Bachelor,
            job_title: "Software Engineer".to_string(),
            experience_years: 5.0,
        }
    }

    #[tokio::test]
    async fn test_predict_extracts_salary_field() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/predict")
                .json_body_partial(r#"{"jobTitle": "Software Engineer", "experience": 5.0}"#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"salary": 75000.0}));
        });

        let client = PredictionClient::new(server.url("/predict"));
        let amount = client.predict(&sample_request()).await.unwrap();

        mock.assert();
        assert_eq!(amount, 75000.0);
    }

    #[tokio::test]
    async fn test_predict_accepts_prediction_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"prediction": 61234.5}));
        });

        let client = PredictionClient::new(server.url("/predict"));
        let amount = client.predict(&sample_request()).await.unwrap();
        assert_eq!(amount, 61234.5);
    }

    #[tokio::test]
    async fn test_predict_server_error_carries_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(500)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"message": "model unavailable"}));
        });

        let client = PredictionClient::new(server.url("/predict"));
        let err = client.predict(&sample_request()).await.unwrap_err();
        match err {
            DashboardError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "model unavailable");
            }
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_predict_server_error_without_message_is_generic() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(502);
        });

        let client = PredictionClient::new(server.url("/predict"));
        let err = client.predict(&sample_request()).await.unwrap_err();
        match err {
            DashboardError::ServerError { message, .. } => assert_eq!(message, "Server error"),
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_predict_malformed_body_is_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"estimate": "lots"}));
        });

        let client = PredictionClient::new(server.url("/predict"));
        let err = client.predict(&sample_request()).await.unwrap_err();
        assert!(matches!(err, DashboardError::ParseError { .. }));
    }

    #[tokio::test]
    async fn test_predict_unreachable_endpoint() {
        // Nothing listens on the discard port.
        let client = PredictionClient::new("http://127.0.0.1:9/predict");
        let err = client.predict(&sample_request()).await.unwrap_err();
        assert!(matches!(err, DashboardError::ApiError(_)));
    }
}
