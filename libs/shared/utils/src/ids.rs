use uuid::Uuid;

/// Random identifier for records the service owns (bots, calls, flags, api calls).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Placeholder used when the voice platform answers without any id field.
pub fn fallback_bot_id() -> String {
    format!("bot_{}", chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn fallback_bot_id_has_prefix() {
        assert!(fallback_bot_id().starts_with("bot_"));
    }
}
