use std::sync::Arc;
use axum::{routing::{get, post}, Router};

use crate::handlers::*;
use crate::services::PatientService;

/// Mounted under `/api`; the two webhook routes are called by the voice platform.
pub fn create_patient_router(service: Arc<PatientService>) -> Router {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/{id}", get(get_patient))
        .route("/patients/{id}/calls", get(get_patient_calls))
        .route("/precall", post(pre_call))
        .route("/getPatientInfo", post(get_patient_info))
        .with_state(service)
}
