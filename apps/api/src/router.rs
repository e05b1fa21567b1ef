use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};

use analysis_cell::{CallSummaryService, OpenAiClient, SentimentAnalyzer};
use bot_cell::{create_bot_router, BotService, OpenMicClient};
use call_cell::{create_call_router, CallService, PostCallService};
use patient_cell::{create_patient_router, PatientService};
use shared_config::AppConfig;
use shared_database::RecordStore;

/// Builds every cell over one shared store and one client per external service.
pub fn create_router(config: Arc<AppConfig>, store: Arc<dyn RecordStore>) -> anyhow::Result<Router> {
    let language_model = Arc::new(OpenAiClient::new(&config)?);
    let analyzer_timeout = Duration::from_secs(config.analyzer_timeout_secs);
    let analyzer = Arc::new(SentimentAnalyzer::new(language_model.clone(), analyzer_timeout));
    let summaries = Arc::new(CallSummaryService::new(language_model, analyzer_timeout));
    let openmic = Arc::new(OpenMicClient::new(&config)?);

    let post_call_service = Arc::new(PostCallService::new(store.clone(), analyzer));
    let call_service = Arc::new(CallService::new(store.clone(), summaries));
    let patient_service = Arc::new(PatientService::new(store.clone()));
    let bot_service = Arc::new(BotService::new(store, openmic));

    let api = Router::new()
        .merge(create_call_router(post_call_service, call_service))
        .merge(create_patient_router(patient_service))
        .nest("/bots", create_bot_router(bot_service));

    Ok(Router::new()
        .route("/", get(|| async { "Mental Health Triage API is running!" }))
        .nest("/api", api))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use shared_database::MemoryStore;
    use shared_utils::test_utils::TestConfig;
    use tower::ServiceExt;

    fn app() -> Router {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::with_sample_data());
        create_router(TestConfig::unconfigured().to_arc(), store).unwrap()
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_text_is_served_at_root() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn every_cell_is_mounted_under_api() {
        let (status, bots) = get_json(app(), "/api/bots").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bots[0]["externalBotId"], "bot_123456");

        let (status, patients) = get_json(app(), "/api/patients").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patients.as_array().unwrap().len(), 2);

        let (status, calls) = get_json(app(), "/api/calls").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls, json!([]));

        let (status, stats) = get_json(app(), "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["activeBots"], 1);
    }

    #[tokio::test]
    async fn remote_bot_listing_needs_platform_key() {
        let (status, _) = get_json(app(), "/api/bots/remote").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
