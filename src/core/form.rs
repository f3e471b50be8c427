use crate::core::predict::PredictionClient;
use crate::domain::model::PredictionRequest;
use crate::utils::error::DashboardError;
use crate::utils::format::format_inr;
use crate::utils::validation::Validate;

/// Lifecycle of the prediction form. Submitting disables further submits;
/// a finished attempt (either way) re-enables them.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Succeeded(f64),
    Failed(String),
}

impl FormPhase {
    pub fn allows_submit(&self) -> bool {
        !matches!(self, FormPhase::Submitting)
    }
}

pub struct PredictionForm {
    client: PredictionClient,
    phase: FormPhase,
}

impl PredictionForm {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            phase: FormPhase::Idle,
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn can_submit(&self) -> bool {
        self.phase.allows_submit()
    }

    /// Runs one submission attempt. A request with missing required fields
    /// never leaves the current phase (the submit is blocked, mirroring
    /// field-level required validation). Prior results and errors are
    /// cleared when the new attempt starts.
    ///
    /// There is no timeout: a hung request leaves the form in `Submitting`
    /// indefinitely. Known limitation, intentionally not patched here.
    pub async fn submit(&mut self, request: &PredictionRequest) -> &FormPhase {
        if !self.can_submit() {
            tracing::debug!("Submit ignored: a request is already in flight");
            return &self.phase;
        }
        if let Err(e) = request.validate() {
            tracing::debug!("Submit blocked by field validation: {}", e);
            return &self.phase;
        }

        self.phase = FormPhase::Submitting;

        self.phase = match self.client.predict(request).await {
            Ok(amount) => FormPhase::Succeeded(amount),
            Err(e) => {
                tracing::warn!("Prediction attempt failed: {}", e);
                FormPhase::Failed(failure_message(&e))
            }
        };
        &self.phase
    }

    /// The user-facing result line for a successful prediction.
    pub fn display_result(&self) -> Option<String> {
        match self.phase {
            FormPhase::Succeeded(amount) => {
                Some(format!("Estimated Salary: {}", format_inr(amount)))
            }
            _ => None,
        }
    }
}

/// Maps a failed attempt onto one of three user-facing messages: the server
/// answered with an error, the server never answered, or the request could
/// not even be constructed.
fn failure_message(error: &DashboardError) -> String {
    match error {
        DashboardError::ServerError { message, .. } => {
            format!("Prediction failed: {}", message)
        }
        e if e.is_unreachable() => {
            "Could not connect to the prediction server. Please ensure it is running.".to_string()
        }
        _ => "An unexpected error occurred. Please try again.".to_string(),
    }
}
