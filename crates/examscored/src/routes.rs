//! Page routes for examscored
//!
//! Every handled outcome renders HTML; validation and processing errors go
//! back into the form page with a 200. Only an oversized body gets a bare 413.

use crate::pages::{form_page, landing_page, FormView};
use crate::server::AppState;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use examscore_common::ValidationError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Page Routes
// ============================================================================

pub fn page_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(index))
        .route("/home", get(home))
}

async fn index() -> Html<String> {
    Html(landing_page(None))
}

async fn home() -> Html<String> {
    Html(form_page(FormView::Blank))
}

/// Unknown routes land on the index page with a 404
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(landing_page(None)))
}

// ============================================================================
// Prediction Routes
// ============================================================================

pub fn predict_routes() -> Router<AppStateArc> {
    Router::new().route("/predict_datapoint", get(home).post(predict_datapoint))
}

async fn predict_datapoint(
    State(state): State<AppStateArc>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    // An unreadable body has no fields, so it fails as a missing-field submission.
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("Form body over limit: {}", rejection);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
        Err(rejection) => {
            warn!("Unreadable form submission: {}", rejection);
            HashMap::new()
        }
    };

    match state.predictor.predict(&fields) {
        Ok(result) => {
            info!("Predicted score {:.2}", result.score);
            Html(form_page(FormView::Prediction(&result))).into_response()
        }
        Err(e) => {
            match &e {
                ValidationError::NotNumeric { fields }
                | ValidationError::OutOfRange { fields }
                | ValidationError::MissingField { fields } => {
                    debug!("Rejected submission ({}): {}", e.kind(), fields.join(", "));
                }
                // Cause already logged by the predictor
                ValidationError::ProcessingFailed(_) => {}
            }
            Html(form_page(FormView::Error(&e.to_string()))).into_response()
        }
    }
}
