use serde_json::Value;

use shared_utils::ids::fallback_bot_id;

use crate::models::{BotFallback, OpenMicApiResponse, OpenMicBot};

/// Normalises an OpenMic bot payload. Each field prefers the response, then
/// the fallback, then a fixed default.
pub fn map_bot_response(response: &OpenMicApiResponse, fallback: &BotFallback) -> OpenMicBot {
    let id = [&response.id, &response.bot_id, &response.uid]
        .into_iter()
        .find_map(|field| field.as_ref().and_then(id_value))
        .or_else(|| fallback.id.clone())
        .unwrap_or_else(fallback_bot_id);

    let name = non_empty(response.name.as_deref())
        .or_else(|| fallback.name.clone())
        .unwrap_or_else(|| "Unknown Bot".to_string());

    let personality = response
        .personality
        .as_ref()
        .and_then(personality_traits)
        .or_else(|| fallback.personality.clone())
        .unwrap_or_default();

    let greeting = non_empty(response.system_prompt.as_deref())
        .or_else(|| non_empty(response.greeting.as_deref()))
        .or_else(|| fallback.greeting.clone())
        .unwrap_or_default();

    OpenMicBot {
        id,
        name,
        personality,
        greeting,
        functions: response.functions.clone().unwrap_or_default(),
    }
}

/// Accepts either a bare array or an object wrapping it in `bots` or `data`.
pub fn bot_list_entries(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(entries) => Some(entries),
        Value::Object(mut map) => ["bots", "data"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(entries)) => Some(entries),
                _ => None,
            }),
        _ => None,
    }
}

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn personality_traits(value: &Value) -> Option<Vec<String>> {
    let traits: Vec<String> = match value {
        Value::String(list) => list
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => return None,
    };

    if traits.is_empty() {
        None
    } else {
        Some(traits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> OpenMicApiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn id_prefers_id_then_bot_id_then_uid() {
        let fallback = BotFallback::default();
        assert_eq!(
            map_bot_response(&response(json!({ "id": "a", "bot_id": "b" })), &fallback).id,
            "a"
        );
        assert_eq!(
            map_bot_response(&response(json!({ "bot_id": "b", "uid": "c" })), &fallback).id,
            "b"
        );
        assert_eq!(map_bot_response(&response(json!({ "uid": 77 })), &fallback).id, "77");
    }

    #[test]
    fn missing_fields_use_fallback_values() {
        let fallback = BotFallback {
            id: Some("ext_1".to_string()),
            name: Some("Day Line".to_string()),
            personality: Some(vec!["calm".to_string()]),
            greeting: Some("Hello and welcome".to_string()),
        };

        let bot = map_bot_response(&response(json!({})), &fallback);
        assert_eq!(bot.id, "ext_1");
        assert_eq!(bot.name, "Day Line");
        assert_eq!(bot.personality, vec!["calm".to_string()]);
        assert_eq!(bot.greeting, "Hello and welcome");
        assert!(bot.functions.is_empty());
    }

    #[test]
    fn missing_everything_uses_defaults() {
        let bot = map_bot_response(&response(json!({})), &BotFallback::default());
        assert!(bot.id.starts_with("bot_"));
        assert_eq!(bot.name, "Unknown Bot");
        assert!(bot.personality.is_empty());
        assert_eq!(bot.greeting, "");
    }

    #[test]
    fn personality_accepts_comma_list_or_array() {
        let fallback = BotFallback::default();
        let from_string = map_bot_response(
            &response(json!({ "personality": "empathetic,  calm ,non-judgmental" })),
            &fallback,
        );
        assert_eq!(from_string.personality, vec!["empathetic", "calm", "non-judgmental"]);

        let from_array =
            map_bot_response(&response(json!({ "personality": ["warm", "patient"] })), &fallback);
        assert_eq!(from_array.personality, vec!["warm", "patient"]);
    }

    #[test]
    fn system_prompt_wins_over_greeting() {
        let bot = map_bot_response(
            &response(json!({ "system_prompt": "From prompt", "greeting": "From greeting" })),
            &BotFallback::default(),
        );
        assert_eq!(bot.greeting, "From prompt");
    }

    #[test]
    fn list_entries_accepts_wrapped_shapes() {
        assert_eq!(bot_list_entries(json!([{ "id": "a" }])).unwrap().len(), 1);
        assert_eq!(bot_list_entries(json!({ "bots": [{}, {}] })).unwrap().len(), 2);
        assert_eq!(bot_list_entries(json!({ "data": [] })).unwrap().len(), 0);
        assert!(bot_list_entries(json!({ "other": [] })).is_none());
        assert!(bot_list_entries(json!("nope")).is_none());
    }
}
