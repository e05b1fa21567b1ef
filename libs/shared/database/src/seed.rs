use chrono::Utc;

use shared_models::{Bot, Patient, RiskLevel};
use shared_utils::generate_id;

pub fn sample_patients() -> Vec<Patient> {
    let now = Utc::now();
    vec![
        Patient {
            id: "P123".to_string(),
            name: "John Doe".to_string(),
            last_appointment: Some("2025-08-12".to_string()),
            last_topic: Some("anxiety management".to_string()),
            risk_level: RiskLevel::High,
            created_at: now,
        },
        Patient {
            id: "P456".to_string(),
            name: "Sarah Miller".to_string(),
            last_appointment: Some("2025-09-10".to_string()),
            last_topic: Some("depression support".to_string()),
            risk_level: RiskLevel::Low,
            created_at: now,
        },
    ]
}

pub fn sample_bots() -> Vec<Bot> {
    vec![Bot {
        id: generate_id(),
        name: "Mental Wellness Assistant v2.1".to_string(),
        external_bot_id: Some("bot_123456".to_string()),
        personality: vec![
            "empathetic".to_string(),
            "calm".to_string(),
            "non-judgmental".to_string(),
        ],
        greeting: "Hello, thank you for calling. This is your Mental Wellness Assistant. \
                   To protect your privacy, this call is not being recorded for human review. \
                   Please provide your unique Patient ID to get started."
            .to_string(),
        crisis_keywords: vec![
            "suicidal".to_string(),
            "harm".to_string(),
            "hopeless".to_string(),
            "end it all".to_string(),
        ],
        is_active: true,
        created_at: Utc::now(),
    }]
}
