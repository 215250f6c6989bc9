//! Fitted artifacts: feature scaler and regression model.
//!
//! Both are read once at startup from JSON files and never mutated after.
//! The file formats mirror the fitted attributes of the usual sklearn
//! estimators so an exported model can be dropped in as-is.

use crate::error::ArtifactError;
use crate::features::FEATURE_COUNT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Transforms a raw feature vector into the space the model was fitted on
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError>;
}

/// Maps a scaled feature vector to a single score
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64, ArtifactError>;
}

/// Scaler file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// `(x - mean) / scale`
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMaxScaler { min: Vec<f64>, scale: Vec<f64> },
}

/// Model file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    #[serde(alias = "ridge", alias = "lasso")]
    LinearRegression { coefficients: Vec<f64>, intercept: f64 },
}

impl ScalerArtifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let scaler: Self = read_json(path)?;
        scaler.check()?;
        info!("Loaded scaler ({}) from {}", scaler.kind(), path.display());
        Ok(scaler)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScalerArtifact::StandardScaler { .. } => "standard_scaler",
            ScalerArtifact::MinMaxScaler { .. } => "min_max_scaler",
        }
    }

    fn check(&self) -> Result<(), ArtifactError> {
        match self {
            ScalerArtifact::StandardScaler { mean, scale } => {
                check_vector("scaler mean", mean)?;
                check_vector("scaler scale", scale)
            }
            ScalerArtifact::MinMaxScaler { min, scale } => {
                check_vector("scaler min", min)?;
                check_vector("scaler scale", scale)
            }
        }
    }
}

impl FeatureScaler for ScalerArtifact {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        check_len("scaler input", features)?;

        let scaled: Vec<f64> = match self {
            ScalerArtifact::StandardScaler { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale))
                // Constant features were fitted with a zero scale; sklearn divides by 1.
                .map(|(x, (m, s))| if *s == 0.0 { x - m } else { (x - m) / s })
                .collect(),
            ScalerArtifact::MinMaxScaler { min, scale } => features
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        };

        Ok(scaled)
    }
}

impl ModelArtifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let model: Self = read_json(path)?;
        model.check()?;
        info!("Loaded model ({}) from {}", model.kind(), path.display());
        Ok(model)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::LinearRegression { .. } => "linear_regression",
        }
    }

    fn check(&self) -> Result<(), ArtifactError> {
        match self {
            ModelArtifact::LinearRegression {
                coefficients,
                intercept,
            } => {
                check_vector("model coefficients", coefficients)?;
                if !intercept.is_finite() {
                    return Err(ArtifactError::NonFinite {
                        what: "model intercept",
                    });
                }
                Ok(())
            }
        }
    }
}

impl Regressor for ModelArtifact {
    fn predict(&self, features: &[f64]) -> Result<f64, ArtifactError> {
        check_len("model input", features)?;

        let output = match self {
            ModelArtifact::LinearRegression {
                coefficients,
                intercept,
            } => {
                features
                    .iter()
                    .zip(coefficients)
                    .map(|(x, w)| x * w)
                    .sum::<f64>()
                    + intercept
            }
        };

        if !output.is_finite() {
            return Err(ArtifactError::NonFinite {
                what: "model output",
            });
        }
        Ok(output)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn check_len(what: &'static str, values: &[f64]) -> Result<(), ArtifactError> {
    if values.len() != FEATURE_COUNT {
        return Err(ArtifactError::ShapeMismatch {
            what,
            expected: FEATURE_COUNT,
            actual: values.len(),
        });
    }
    Ok(())
}

fn check_vector(what: &'static str, values: &[f64]) -> Result<(), ArtifactError> {
    check_len(what, values)?;
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactError::NonFinite { what });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn shipped(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../artifacts")
            .join(name)
    }

    #[test]
    fn test_load_standard_scaler() {
        let file = write_temp(
            r#"{"kind": "standard_scaler", "mean": [1, 2, 3, 4, 5], "scale": [1, 2, 1, 1, 0.5]}"#,
        );
        let scaler = ScalerArtifact::load(file.path()).unwrap();
        assert_eq!(scaler.kind(), "standard_scaler");

        let out = scaler.transform(&[2.0, 6.0, 3.0, 4.0, 6.0]).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_standard_scaler_zero_scale_is_identity_divisor() {
        let scaler = ScalerArtifact::StandardScaler {
            mean: vec![1.0; 5],
            scale: vec![0.0, 1.0, 1.0, 1.0, 1.0],
        };
        let out = scaler.transform(&[3.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(out[0], 2.0);
    }

    #[test]
    fn test_min_max_scaler() {
        let scaler = ScalerArtifact::MinMaxScaler {
            min: vec![0.0, -0.5, 0.0, 0.0, 0.0],
            scale: vec![1.0 / 24.0, 0.01, 0.025, 1.0 / 12.0, 0.01],
        };
        let out = scaler.transform(&[12.0, 50.0, 40.0, 6.0, 100.0]).unwrap();
        assert_relative_eq!(out[0], 0.5);
        assert_relative_eq!(out[1], 0.0);
        assert_relative_eq!(out[2], 1.0);
        assert_relative_eq!(out[3], 0.5);
        assert_relative_eq!(out[4], 1.0);
    }

    #[test]
    fn test_linear_model_predict() {
        let model = ModelArtifact::LinearRegression {
            coefficients: vec![1.0, 2.0, 0.0, -1.0, 0.5],
            intercept: 10.0,
        };
        let out = model.predict(&[1.0, 1.0, 5.0, 2.0, 4.0]).unwrap();
        assert_relative_eq!(out, 13.0);
    }

    #[test]
    fn test_model_kind_aliases() {
        let file = write_temp(r#"{"kind": "ridge", "coefficients": [1, 1, 1, 1, 1], "intercept": 0}"#);
        let model = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(model.kind(), "linear_regression");
    }

    #[test]
    fn test_wrong_vector_length_rejected() {
        let file = write_temp(r#"{"kind": "standard_scaler", "mean": [1, 2, 3], "scale": [1, 1, 1]}"#);
        match ScalerArtifact::load(file.path()).unwrap_err() {
            ArtifactError::ShapeMismatch {
                what,
                expected,
                actual,
            } => {
                assert_eq!(what, "scaler mean");
                assert_eq!(expected, 5);
                assert_eq!(actual, 3);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        let file = write_temp("{not json");
        assert!(matches!(
            ModelArtifact::load(file.path()),
            Err(ArtifactError::Decode { .. })
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let file = write_temp(r#"{"kind": "random_forest", "coefficients": [], "intercept": 0}"#);
        assert!(matches!(
            ModelArtifact::load(file.path()),
            Err(ArtifactError::Decode { .. })
        ));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = ScalerArtifact::load(Path::new("/nonexistent/scaler.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/scaler.json"));
    }

    #[test]
    fn test_transform_rejects_wrong_input_shape() {
        let scaler = ScalerArtifact::StandardScaler {
            mean: vec![0.0; 5],
            scale: vec![1.0; 5],
        };
        assert!(matches!(
            scaler.transform(&[1.0, 2.0]),
            Err(ArtifactError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_non_finite_output_rejected() {
        let model = ModelArtifact::LinearRegression {
            coefficients: vec![f64::MAX; 5],
            intercept: 0.0,
        };
        assert!(matches!(
            model.predict(&[f64::MAX; 5]),
            Err(ArtifactError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_shipped_artifacts_load() {
        let scaler = ScalerArtifact::load(&shipped("scaler.json")).unwrap();
        let model = ModelArtifact::load(&shipped("model.json")).unwrap();

        let scaled = scaler.transform(&[5.0, 70.0, 1.0, 7.0, 3.0]).unwrap();
        let score = model.predict(&scaled).unwrap();
        assert!((0.0..=120.0).contains(&score), "implausible score {}", score);
    }
}
