use async_trait::async_trait;
use thiserror::Error;

use shared_models::{
    ApiCall, AppError, Bot, BotUpdate, Call, CallFlag, CallUpdate, CallWithDetails, NewApiCall,
    NewBot, NewCall, NewCallFlag, NewPatient, Patient,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{entity} with id {id} already exists")]
    Duplicate { entity: &'static str, id: String },

    #[error("{entity} with id {id} does not exist")]
    MissingReference { entity: &'static str, id: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => AppError::Conflict(err.to_string()),
            StoreError::MissingReference { .. } => AppError::ValidationError(err.to_string()),
            StoreError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

/// Persistence capability shared by every cell.
///
/// Lookups return `Ok(None)` for unknown ids. Joins never fail because a
/// referenced patient or bot is gone; those fields are left empty.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // Patients
    async fn get_patient(&self, id: &str) -> StoreResult<Option<Patient>>;
    async fn create_patient(&self, patient: NewPatient) -> StoreResult<Patient>;
    async fn list_patients(&self) -> StoreResult<Vec<Patient>>;

    // Bots
    async fn get_bot(&self, id: &str) -> StoreResult<Option<Bot>>;
    async fn get_bot_by_external_id(&self, external_bot_id: &str) -> StoreResult<Option<Bot>>;
    async fn create_bot(&self, bot: NewBot) -> StoreResult<Bot>;
    async fn update_bot(&self, id: &str, update: BotUpdate) -> StoreResult<Option<Bot>>;
    async fn delete_bot(&self, id: &str) -> StoreResult<bool>;
    async fn list_bots(&self) -> StoreResult<Vec<Bot>>;

    // Calls
    async fn get_call(&self, id: &str) -> StoreResult<Option<Call>>;
    async fn get_call_with_details(&self, id: &str) -> StoreResult<Option<CallWithDetails>>;
    async fn create_call(&self, call: NewCall) -> StoreResult<Call>;
    /// Persists the call and its flags as one unit, flags in input order.
    async fn create_call_with_flags(
        &self,
        call: NewCall,
        flags: Vec<NewCallFlag>,
    ) -> StoreResult<(Call, Vec<CallFlag>)>;
    async fn update_call(&self, id: &str, update: CallUpdate) -> StoreResult<Option<Call>>;
    /// Does not cascade to flags or api calls.
    async fn delete_call(&self, id: &str) -> StoreResult<bool>;
    /// Newest first.
    async fn list_calls_with_details(&self) -> StoreResult<Vec<CallWithDetails>>;
    async fn list_calls_by_patient(&self, patient_id: &str) -> StoreResult<Vec<Call>>;

    // Call flags
    async fn create_call_flag(&self, call_id: &str, flag: NewCallFlag) -> StoreResult<CallFlag>;
    async fn list_flags_by_call(&self, call_id: &str) -> StoreResult<Vec<CallFlag>>;

    // Api calls
    async fn create_api_call(&self, api_call: NewApiCall) -> StoreResult<ApiCall>;
    async fn list_api_calls_by_call(&self, call_id: &str) -> StoreResult<Vec<ApiCall>>;
}
