use crate::client::{ClientError, PredictionResult};
use crate::sample::{Field, NormalizedSample, TelemetrySample};
use crate::validate::{normalize, ValidationError};

/// Lifecycle of the single allowed request. Exactly one state is live at a
/// time; terminal states return to Idle on the next edit or reset.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(String),
}

impl RequestState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, RequestState::Submitting)
    }
}

/// Why begin_submit declined to start a request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitGuard {
    /// A request is already outstanding; the caller must wait for it.
    InFlight,
    /// The form did not validate; nothing was sent.
    Invalid(ValidationError),
}

/// Owns the form, the request lifecycle, and the last settled result.
///
/// The controller is synchronous: `begin_submit` hands the caller a
/// validated sample and `finish_submit` takes the outcome back, so the
/// network await lives with the caller and the state machine stays testable
/// without a server. The in-flight guard lives here, not in the UI, so the
/// invariant holds even for programmatic submission.
#[derive(Debug, Default)]
pub struct DashboardController {
    sample: TelemetrySample,
    state: RequestState,
    last_result: Option<PredictionResult>,
    validation_error: Option<ValidationError>,
}

impl Default for RequestState {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl DashboardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&self) -> &TelemetrySample {
        &self.sample
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Most recent successful prediction, kept visible across later edits
    /// and failures until replaced or reset.
    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    /// True while edits and submission must be locked out.
    pub fn is_busy(&self) -> bool {
        self.state.is_submitting()
    }

    /// Apply one field edit. Ignored while a request is outstanding; a
    /// terminal state falls back to Idle, clearing any surfaced error.
    pub fn edit_field(&mut self, field: Field, value: String) {
        if self.is_busy() {
            return;
        }
        self.sample.set(field, value);
        self.validation_error = None;
        self.state = RequestState::Idle;
    }

    /// Populate the form with the fixed example sample. Does not touch the
    /// request state.
    pub fn load_sample(&mut self) {
        if self.is_busy() {
            return;
        }
        self.sample = TelemetrySample::sample_data();
        self.validation_error = None;
    }

    /// Clear everything: form, result, errors. Always lands in Idle.
    pub fn reset(&mut self) {
        if self.is_busy() {
            return;
        }
        self.sample.clear();
        self.last_result = None;
        self.validation_error = None;
        self.state = RequestState::Idle;
    }

    /// Validate the form and, if it passes, transition to Submitting and
    /// return the sample to send. On validation failure the state stays
    /// Idle and the error is retained for display.
    pub fn begin_submit(&mut self) -> Result<NormalizedSample, SubmitGuard> {
        if self.state.is_submitting() {
            tracing::debug!("submit ignored: request already in flight");
            return Err(SubmitGuard::InFlight);
        }
        match normalize(&self.sample) {
            Ok(normalized) => {
                self.validation_error = None;
                self.state = RequestState::Submitting;
                Ok(normalized)
            }
            Err(err) => {
                tracing::debug!(%err, "submission blocked by validation");
                self.validation_error = Some(err.clone());
                self.state = RequestState::Idle;
                Err(SubmitGuard::Invalid(err))
            }
        }
    }

    /// Settle the outstanding request. A success becomes the new displayed
    /// result; a failure is surfaced verbatim and the form re-enables.
    pub fn finish_submit(&mut self, outcome: Result<PredictionResult, ClientError>) {
        debug_assert!(self.state.is_submitting(), "no request outstanding");
        match outcome {
            Ok(result) => {
                tracing::info!(
                    prediction = result.prediction,
                    risk = result.risk_tier.as_str(),
                    "prediction received"
                );
                self.last_result = Some(result.clone());
                self.state = RequestState::Succeeded(result);
            }
            Err(err) => {
                tracing::warn!(%err, "prediction failed");
                self.state = RequestState::Failed(err.to_string());
            }
        }
    }
}
