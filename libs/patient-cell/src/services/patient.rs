use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use shared_database::RecordStore;
use shared_models::{Call, NewApiCall, NewPatient, Patient};

use crate::models::{
    CreatePatientRequest, PatientError, PatientInfoRequest, PatientInfoResponse, PatientResource,
    PreCallRequest, PreCallResponse, ResourceKind,
};

pub const PATIENT_INFO_ENDPOINT: &str = "/api/getPatientInfo";

pub struct PatientService {
    store: Arc<dyn RecordStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        let id = required(request.id, "Patient ID")?;
        let name = required(request.name, "Name")?;

        let patient = self
            .store
            .create_patient(NewPatient {
                id,
                name,
                last_appointment: request.last_appointment,
                last_topic: request.last_topic,
                risk_level: request.risk_level,
            })
            .await?;

        info!("Patient created: {}", patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, id: &str) -> Result<Patient, PatientError> {
        self.store.get_patient(id).await?.ok_or(PatientError::NotFound)
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        Ok(self.store.list_patients().await?)
    }

    pub async fn list_patient_calls(&self, id: &str) -> Result<Vec<Call>, PatientError> {
        self.get_patient(id).await?;
        Ok(self.store.list_calls_by_patient(id).await?)
    }

    /// Context handed to the bot before a call connects.
    pub async fn pre_call(&self, request: PreCallRequest) -> Result<PreCallResponse, PatientError> {
        let patient_id = required(request.patient_id, "Patient ID")?;
        let patient = self.get_patient(&patient_id).await?;

        debug!("Pre-call context served for patient {}", patient.id);
        Ok(patient.into())
    }

    /// In-call lookup invoked by the bot. Audited when the platform passes
    /// its call id.
    pub async fn patient_info(
        &self,
        request: PatientInfoRequest,
    ) -> Result<PatientInfoResponse, PatientError> {
        let patient_id = required(request.patient_id, "Patient ID")?;
        let patient = self.get_patient(&patient_id).await?;

        if let Some(call_id) = request.call_id {
            self.store
                .create_api_call(NewApiCall {
                    call_id: Some(call_id),
                    endpoint: PATIENT_INFO_ENDPOINT.to_string(),
                    request_data: Some(json!({ "patientId": patient_id })),
                    response_data: Some(json!({ "patient": patient })),
                })
                .await?;
        }

        Ok(PatientInfoResponse {
            patient_id: patient.id,
            name: patient.name,
            resources: support_resources(),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, PatientError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(PatientError::Required(field))
}

pub fn support_resources() -> Vec<PatientResource> {
    vec![
        PatientResource {
            kind: ResourceKind::Article,
            title: "Coping with Anxiety".to_string(),
            link: Some("https://www.nimh.nih.gov/health/topics/anxiety-disorders".to_string()),
            phone: None,
        },
        PatientResource {
            kind: ResourceKind::Hotline,
            title: "24x7 Crisis Hotline".to_string(),
            link: None,
            phone: Some("+1-800-273-8255".to_string()),
        },
    ]
}
