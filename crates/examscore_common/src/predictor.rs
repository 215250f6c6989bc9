//! Prediction orchestrator: parse, range-check, scale, infer, round.
//!
//! The scaler and model are injected at construction and only ever read,
//! so one `Predictor` is shared by every request without locking.

use crate::artifacts::{FeatureScaler, ModelArtifact, Regressor, ScalerArtifact};
use crate::error::{ArtifactError, ValidationError};
use crate::request::PredictionRequest;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

/// Successful prediction with the inputs it was computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Predicted score, rounded to 2 decimal places
    pub score: f64,
    pub inputs: PredictionRequest,
}

#[derive(Clone)]
pub struct Predictor {
    scaler: Arc<dyn FeatureScaler>,
    model: Arc<dyn Regressor>,
}

impl Predictor {
    pub fn new(scaler: Arc<dyn FeatureScaler>, model: Arc<dyn Regressor>) -> Self {
        Self { scaler, model }
    }

    pub fn from_artifacts(scaler: ScalerArtifact, model: ModelArtifact) -> Self {
        Self::new(Arc::new(scaler), Arc::new(model))
    }

    /// Run one form submission through the full pipeline.
    ///
    /// Scaling and inference only happen once every field has parsed and
    /// passed its range check.
    pub fn predict(
        &self,
        fields: &HashMap<String, String>,
    ) -> Result<PredictionResult, ValidationError> {
        let inputs = PredictionRequest::parse(fields)?;
        inputs.validate()?;

        let raw = self.infer(&inputs).map_err(|e| {
            error!("Prediction failed: {}", e);
            ValidationError::ProcessingFailed(e)
        })?;

        Ok(PredictionResult {
            score: round_to_cents(raw),
            inputs,
        })
    }

    fn infer(&self, inputs: &PredictionRequest) -> Result<f64, ArtifactError> {
        let scaled = self.scaler.transform(&inputs.features())?;
        self.model.predict(&scaled)
    }
}

/// Round half away from zero to 2 decimal places
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
