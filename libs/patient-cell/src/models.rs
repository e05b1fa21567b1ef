use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{AppError, Patient, RiskLevel};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePatientRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub last_appointment: Option<String>,
    pub last_topic: Option<String>,
    pub risk_level: Option<RiskLevel>,
}

// ==============================================================================
// VOICE PLATFORM WEBHOOKS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreCallRequest {
    pub patient_id: Option<String>,
}

/// What the bot is told about the caller before the call connects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreCallResponse {
    pub patient_id: String,
    pub name: String,
    pub last_appointment: Option<String>,
    pub last_topic: Option<String>,
}

impl From<Patient> for PreCallResponse {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.id,
            name: patient.name,
            last_appointment: patient.last_appointment,
            last_topic: patient.last_topic,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInfoRequest {
    pub patient_id: Option<String>,
    /// Platform call id; when present the lookup is audited against it.
    pub call_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Hotline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientResource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfoResponse {
    pub patient_id: String,
    pub name: String,
    pub resources: Vec<PatientResource>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("{0} is required")]
    Required(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound => AppError::not_found("Patient"),
            PatientError::Required(field) => AppError::required(field),
            PatientError::Store(store_err) => store_err.into(),
        }
    }
}
