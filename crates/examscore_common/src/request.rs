//! Form parsing and range validation

use crate::error::ValidationError;
use crate::features::{Feature, FEATURES, FEATURE_COUNT};
use serde::Serialize;
use std::collections::HashMap;

/// Parsed form submission. Lives for one request only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub hours_studied: f64,
    pub previous_scores: f64,
    pub extracurricular_activities: f64,
    pub sleep_hours: f64,
    pub sample_question_papers_practiced: f64,
}

impl PredictionRequest {
    /// Parse all five fields from raw form values.
    ///
    /// Surrounding whitespace is ignored. Fields are read in model order and
    /// the first failure decides the error: an absent field is
    /// `MissingField`, a present but unparseable one (including empty) is
    /// `NotNumeric`.
    pub fn parse(fields: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let mut values = [0.0; FEATURE_COUNT];
        let mut missing = Vec::new();
        let mut bad = Vec::new();
        let mut missing_first = false;

        for (slot, feature) in values.iter_mut().zip(FEATURES) {
            let name = feature.field_name();
            match fields.get(name) {
                None => {
                    if missing.is_empty() && bad.is_empty() {
                        missing_first = true;
                    }
                    missing.push(name);
                }
                Some(raw) => match raw.trim().parse::<f64>() {
                    Ok(v) => *slot = v,
                    Err(_) => bad.push(name),
                },
            }
        }

        if missing_first {
            return Err(ValidationError::MissingField { fields: missing });
        }
        if !bad.is_empty() {
            return Err(ValidationError::NotNumeric { fields: bad });
        }

        Ok(Self::from_features(values))
    }

    /// Check every field against its interval; reports all offenders at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bad: Vec<&'static str> = FEATURES
            .iter()
            .zip(self.features())
            .filter(|(feature, value)| !feature.accepts(*value))
            .map(|(feature, _)| feature.field_name())
            .collect();

        if bad.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange { fields: bad })
        }
    }

    /// Feature vector in model order
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.hours_studied,
            self.previous_scores,
            self.extracurricular_activities,
            self.sleep_hours,
            self.sample_question_papers_practiced,
        ]
    }

    pub fn from_features(values: [f64; FEATURE_COUNT]) -> Self {
        let [hours_studied, previous_scores, extracurricular_activities, sleep_hours, sample_question_papers_practiced] =
            values;
        Self {
            hours_studied,
            previous_scores,
            extracurricular_activities,
            sleep_hours,
            sample_question_papers_practiced,
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::HoursStudied => self.hours_studied,
            Feature::PreviousScores => self.previous_scores,
            Feature::ExtracurricularActivities => self.extracurricular_activities,
            Feature::SleepHours => self.sleep_hours,
            Feature::SampleQuestionPapersPracticed => self.sample_question_papers_practiced,
        }
    }
}
