//! Feature table: form names, declared ranges, and vector order.

use std::ops::RangeInclusive;

/// Number of features the scaler and model are fitted on
pub const FEATURE_COUNT: usize = 5;

/// One input feature as submitted by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    HoursStudied,
    PreviousScores,
    ExtracurricularActivities,
    SleepHours,
    SampleQuestionPapersPracticed,
}

/// Features in the order the scaler and model expect them.
pub const FEATURES: [Feature; FEATURE_COUNT] = [
    Feature::HoursStudied,
    Feature::PreviousScores,
    Feature::ExtracurricularActivities,
    Feature::SleepHours,
    Feature::SampleQuestionPapersPracticed,
];

impl Feature {
    /// Form field name
    pub fn field_name(self) -> &'static str {
        match self {
            Feature::HoursStudied => "Hours_Studied",
            Feature::PreviousScores => "Previous_Scores",
            Feature::ExtracurricularActivities => "Extracurricular_Activities",
            Feature::SleepHours => "Sleep_Hours",
            Feature::SampleQuestionPapersPracticed => "Sample_Question_Papers_Practiced",
        }
    }

    /// Human label shown on the form
    pub fn label(self) -> &'static str {
        match self {
            Feature::HoursStudied => "Hours Studied",
            Feature::PreviousScores => "Previous Scores",
            Feature::ExtracurricularActivities => "Extracurricular Activities",
            Feature::SleepHours => "Sleep Hours",
            Feature::SampleQuestionPapersPracticed => "Sample Question Papers Practiced",
        }
    }

    /// Closed interval of accepted values
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Feature::HoursStudied => 0.0..=24.0,
            Feature::PreviousScores => 0.0..=100.0,
            Feature::ExtracurricularActivities => 0.0..=40.0,
            Feature::SleepHours => 0.0..=12.0,
            Feature::SampleQuestionPapersPracticed => 0.0..=100.0,
        }
    }

    /// NaN is never in range.
    pub fn accepts(self, value: f64) -> bool {
        self.range().contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_matches_form() {
        let names: Vec<&str> = FEATURES.iter().map(|f| f.field_name()).collect();
        assert_eq!(
            names,
            vec![
                "Hours_Studied",
                "Previous_Scores",
                "Extracurricular_Activities",
                "Sleep_Hours",
                "Sample_Question_Papers_Practiced",
            ]
        );
    }

    #[test]
    fn test_ranges_are_inclusive() {
        assert!(Feature::HoursStudied.accepts(0.0));
        assert!(Feature::HoursStudied.accepts(24.0));
        assert!(!Feature::HoursStudied.accepts(24.01));
        assert!(!Feature::SleepHours.accepts(-0.5));
        assert!(Feature::ExtracurricularActivities.accepts(40.0));
    }

    #[test]
    fn test_nan_and_infinity_rejected() {
        for feature in FEATURES {
            assert!(!feature.accepts(f64::NAN), "{:?} accepted NaN", feature);
            assert!(!feature.accepts(f64::INFINITY));
        }
    }
}
