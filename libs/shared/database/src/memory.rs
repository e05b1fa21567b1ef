use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use shared_models::{
    ApiCall, Bot, BotUpdate, Call, CallFlag, CallUpdate, CallWithDetails, NewApiCall, NewBot,
    NewCall, NewCallFlag, NewPatient, Patient,
};
use shared_utils::generate_id;

use crate::seed;
use crate::store::{RecordStore, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    patients: HashMap<String, Patient>,
    bots: HashMap<String, Bot>,
    calls: HashMap<String, Call>,
    // Insertion sequence per call; breaks timestamp ties in newest-first listings.
    call_seq: HashMap<String, u64>,
    next_call_seq: u64,
    // Append-only, so per-call order is creation order.
    call_flags: Vec<CallFlag>,
    api_calls: Vec<ApiCall>,
}

impl Tables {
    fn insert_call(&mut self, call: NewCall) -> Call {
        let call = Call {
            id: generate_id(),
            patient_id: call.patient_id,
            bot_id: call.bot_id,
            external_call_id: call.external_call_id,
            duration: call.duration,
            transcript: call.transcript,
            sentiment_score: call.sentiment_score,
            sentiment_label: call.sentiment_label,
            status: call.status,
            timestamp: Utc::now(),
        };
        self.next_call_seq += 1;
        self.call_seq.insert(call.id.clone(), self.next_call_seq);
        self.calls.insert(call.id.clone(), call.clone());
        call
    }

    /// Newest first, later insertions first on equal timestamps.
    fn newest_first(&self, a: &Call, b: &Call) -> std::cmp::Ordering {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| self.call_seq.get(&b.id).cmp(&self.call_seq.get(&a.id)))
    }

    fn insert_flag(&mut self, call_id: &str, flag: NewCallFlag) -> CallFlag {
        let flag = CallFlag {
            id: generate_id(),
            call_id: call_id.to_string(),
            flag_type: flag.flag_type,
            severity: flag.severity,
            content: flag.content,
            created_at: Utc::now(),
        };
        self.call_flags.push(flag.clone());
        flag
    }

    fn flags_for(&self, call_id: &str) -> Vec<CallFlag> {
        self.call_flags
            .iter()
            .filter(|flag| flag.call_id == call_id)
            .cloned()
            .collect()
    }

    fn api_calls_for(&self, call_id: &str) -> Vec<ApiCall> {
        self.api_calls
            .iter()
            .filter(|api_call| api_call.call_id.as_deref() == Some(call_id))
            .cloned()
            .collect()
    }

    /// In-call lookups are logged against the platform's call id, which only
    /// becomes `external_call_id` once post-call processing stores the call.
    fn audit_trail_for(&self, call: &Call) -> Vec<ApiCall> {
        self.api_calls
            .iter()
            .filter(|api_call| match api_call.call_id.as_deref() {
                Some(id) => id == call.id || call.external_call_id.as_deref() == Some(id),
                None => false,
            })
            .cloned()
            .collect()
    }

    fn details(&self, call: &Call) -> CallWithDetails {
        let patient = call
            .patient_id
            .as_ref()
            .and_then(|id| self.patients.get(id))
            .cloned();
        let bot = call
            .bot_id
            .as_ref()
            .and_then(|id| self.bots.get(id))
            .cloned();

        CallWithDetails {
            call: call.clone(),
            patient,
            bot,
            flags: self.flags_for(&call.id),
            api_calls: self.audit_trail_for(call),
        }
    }
}

/// Process-local store. One lock covers every table so each trait method,
/// including `create_call_with_flags`, is a single atomic step.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the demo patients and bot.
    pub fn with_sample_data() -> Self {
        let mut tables = Tables::default();
        for patient in seed::sample_patients() {
            tables.patients.insert(patient.id.clone(), patient);
        }
        for bot in seed::sample_bots() {
            tables.bots.insert(bot.id.clone(), bot);
        }
        debug!(
            "Seeded memory store with {} patients and {} bots",
            tables.patients.len(),
            tables.bots.len()
        );

        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        Ok(self.tables.read().await.patients.get(id).cloned())
    }

    async fn create_patient(&self, patient: NewPatient) -> StoreResult<Patient> {
        let mut tables = self.tables.write().await;
        if tables.patients.contains_key(&patient.id) {
            return Err(StoreError::Duplicate {
                entity: "Patient",
                id: patient.id,
            });
        }

        let patient = Patient {
            id: patient.id,
            name: patient.name,
            last_appointment: patient.last_appointment,
            last_topic: patient.last_topic,
            risk_level: patient.risk_level.unwrap_or_default(),
            created_at: Utc::now(),
        };
        tables.patients.insert(patient.id.clone(), patient.clone());
        Ok(patient)
    }

    async fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let mut patients: Vec<Patient> =
            self.tables.read().await.patients.values().cloned().collect();
        patients.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(patients)
    }

    async fn get_bot(&self, id: &str) -> StoreResult<Option<Bot>> {
        Ok(self.tables.read().await.bots.get(id).cloned())
    }

    async fn get_bot_by_external_id(&self, external_bot_id: &str) -> StoreResult<Option<Bot>> {
        Ok(self
            .tables
            .read()
            .await
            .bots
            .values()
            .find(|bot| bot.external_bot_id.as_deref() == Some(external_bot_id))
            .cloned())
    }

    async fn create_bot(&self, bot: NewBot) -> StoreResult<Bot> {
        let bot = Bot {
            id: generate_id(),
            name: bot.name,
            external_bot_id: bot.external_bot_id,
            personality: bot.personality,
            greeting: bot.greeting,
            crisis_keywords: bot.crisis_keywords,
            is_active: bot.is_active,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .bots
            .insert(bot.id.clone(), bot.clone());
        Ok(bot)
    }

    async fn update_bot(&self, id: &str, update: BotUpdate) -> StoreResult<Option<Bot>> {
        let mut tables = self.tables.write().await;
        Ok(tables.bots.get_mut(id).map(|bot| {
            update.apply_to(bot);
            bot.clone()
        }))
    }

    async fn delete_bot(&self, id: &str) -> StoreResult<bool> {
        Ok(self.tables.write().await.bots.remove(id).is_some())
    }

    async fn list_bots(&self) -> StoreResult<Vec<Bot>> {
        let mut bots: Vec<Bot> = self.tables.read().await.bots.values().cloned().collect();
        bots.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(bots)
    }

    async fn get_call(&self, id: &str) -> StoreResult<Option<Call>> {
        Ok(self.tables.read().await.calls.get(id).cloned())
    }

    async fn get_call_with_details(&self, id: &str) -> StoreResult<Option<CallWithDetails>> {
        let tables = self.tables.read().await;
        Ok(tables.calls.get(id).map(|call| tables.details(call)))
    }

    async fn create_call(&self, call: NewCall) -> StoreResult<Call> {
        Ok(self.tables.write().await.insert_call(call))
    }

    async fn create_call_with_flags(
        &self,
        call: NewCall,
        flags: Vec<NewCallFlag>,
    ) -> StoreResult<(Call, Vec<CallFlag>)> {
        let mut tables = self.tables.write().await;
        let call = tables.insert_call(call);
        let flags = flags
            .into_iter()
            .map(|flag| tables.insert_flag(&call.id, flag))
            .collect();
        Ok((call, flags))
    }

    async fn update_call(&self, id: &str, update: CallUpdate) -> StoreResult<Option<Call>> {
        let mut tables = self.tables.write().await;
        Ok(tables.calls.get_mut(id).map(|call| {
            update.apply_to(call);
            call.clone()
        }))
    }

    async fn delete_call(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        tables.call_seq.remove(id);
        Ok(tables.calls.remove(id).is_some())
    }

    async fn list_calls_with_details(&self) -> StoreResult<Vec<CallWithDetails>> {
        let tables = self.tables.read().await;
        let mut calls: Vec<CallWithDetails> =
            tables.calls.values().map(|call| tables.details(call)).collect();
        calls.sort_by(|a, b| tables.newest_first(&a.call, &b.call));
        Ok(calls)
    }

    async fn list_calls_by_patient(&self, patient_id: &str) -> StoreResult<Vec<Call>> {
        let tables = self.tables.read().await;
        let mut calls: Vec<Call> = tables
            .calls
            .values()
            .filter(|call| call.patient_id.as_deref() == Some(patient_id))
            .cloned()
            .collect();
        calls.sort_by(|a, b| tables.newest_first(a, b));
        Ok(calls)
    }

    async fn create_call_flag(&self, call_id: &str, flag: NewCallFlag) -> StoreResult<CallFlag> {
        let mut tables = self.tables.write().await;
        if !tables.calls.contains_key(call_id) {
            return Err(StoreError::MissingReference {
                entity: "Call",
                id: call_id.to_string(),
            });
        }
        Ok(tables.insert_flag(call_id, flag))
    }

    async fn list_flags_by_call(&self, call_id: &str) -> StoreResult<Vec<CallFlag>> {
        Ok(self.tables.read().await.flags_for(call_id))
    }

    async fn create_api_call(&self, api_call: NewApiCall) -> StoreResult<ApiCall> {
        let api_call = ApiCall {
            id: generate_id(),
            call_id: api_call.call_id,
            endpoint: api_call.endpoint,
            request_data: api_call.request_data,
            response_data: api_call.response_data,
            timestamp: Utc::now(),
        };
        self.tables.write().await.api_calls.push(api_call.clone());
        Ok(api_call)
    }

    async fn list_api_calls_by_call(&self, call_id: &str) -> StoreResult<Vec<ApiCall>> {
        Ok(self.tables.read().await.api_calls_for(call_id))
    }
}
