use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_models::{AppError, Call, Patient};

use crate::models::{
    CreatePatientRequest, PatientInfoRequest, PatientInfoResponse, PreCallRequest, PreCallResponse,
};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(service): State<Arc<PatientService>>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let patients = service.list_patients().await?;
    Ok(Json(patients))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(service): State<Arc<PatientService>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let patient = service.create_patient(request).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let patient = service.get_patient(&patient_id).await?;
    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn get_patient_calls(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Call>>, AppError> {
    let calls = service.list_patient_calls(&patient_id).await?;
    Ok(Json(calls))
}

#[axum::debug_handler]
pub async fn pre_call(
    State(service): State<Arc<PatientService>>,
    Json(request): Json<PreCallRequest>,
) -> Result<Json<PreCallResponse>, AppError> {
    let context = service.pre_call(request).await?;
    Ok(Json(context))
}

#[axum::debug_handler]
pub async fn get_patient_info(
    State(service): State<Arc<PatientService>>,
    Json(request): Json<PatientInfoRequest>,
) -> Result<Json<PatientInfoResponse>, AppError> {
    let info = service.patient_info(request).await?;
    Ok(Json(info))
}
