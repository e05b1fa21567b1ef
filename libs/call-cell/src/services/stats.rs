use chrono::{DateTime, Utc};

use shared_models::{Bot, CallWithDetails, Severity};

use crate::models::DashboardStats;

/// Placeholder until the voice platform reports latency.
pub const AVG_RESPONSE_TIME: &str = "1.2s";

pub fn dashboard_stats(calls: &[CallWithDetails], bots: &[Bot], now: DateTime<Utc>) -> DashboardStats {
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|start| start.and_utc())
        .unwrap_or(now);

    let active_calls = calls
        .iter()
        .filter(|details| details.call.timestamp >= midnight)
        .count();

    let crisis_flags = calls
        .iter()
        .flat_map(|details| &details.flags)
        .filter(|flag| flag.severity == Severity::High)
        .count();

    // Calls without a duration count as zero seconds.
    let avg_duration = if calls.is_empty() {
        0
    } else {
        let total: i64 = calls
            .iter()
            .map(|details| details.call.duration.unwrap_or(0))
            .sum();
        (total as f64 / calls.len() as f64).round() as i64
    };

    DashboardStats {
        active_calls,
        crisis_flags,
        avg_response_time: AVG_RESPONSE_TIME.to_string(),
        active_bots: bots.iter().filter(|bot| bot.is_active).count(),
        avg_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared_models::{Call, CallFlag, CallStatus};

    fn call(timestamp: DateTime<Utc>, duration: Option<i64>, severities: &[Severity]) -> CallWithDetails {
        let id = format!("c{}", timestamp.timestamp());
        CallWithDetails {
            call: Call {
                id: id.clone(),
                patient_id: None,
                bot_id: None,
                external_call_id: None,
                duration,
                transcript: None,
                sentiment_score: None,
                sentiment_label: None,
                status: CallStatus::Completed,
                timestamp,
            },
            patient: None,
            bot: None,
            flags: severities
                .iter()
                .enumerate()
                .map(|(i, severity)| CallFlag {
                    id: format!("{}-f{}", id, i),
                    call_id: id.clone(),
                    flag_type: "keyword".to_string(),
                    severity: *severity,
                    content: None,
                    created_at: timestamp,
                })
                .collect(),
            api_calls: Vec::new(),
        }
    }

    fn bot(is_active: bool) -> Bot {
        Bot {
            id: "b".to_string(),
            name: "Bot".to_string(),
            external_bot_id: None,
            personality: Vec::new(),
            greeting: String::new(),
            crisis_keywords: Vec::new(),
            is_active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_dashboard_is_all_zero() {
        let stats = dashboard_stats(&[], &[], Utc::now());
        assert_eq!(stats.active_calls, 0);
        assert_eq!(stats.crisis_flags, 0);
        assert_eq!(stats.active_bots, 0);
        assert_eq!(stats.avg_duration, 0);
        assert_eq!(stats.avg_response_time, "1.2s");
    }

    #[test]
    fn counts_only_todays_calls_and_high_flags() {
        let now = Utc.with_ymd_and_hms(2025, 9, 10, 15, 0, 0).unwrap();
        let calls = vec![
            call(now - Duration::hours(1), Some(100), &[Severity::High, Severity::Low]),
            call(now - Duration::hours(14), Some(200), &[Severity::High]),
            call(now - Duration::hours(16), None, &[Severity::Medium]),
        ];

        let stats = dashboard_stats(&calls, &[bot(true), bot(false), bot(true)], now);

        assert_eq!(stats.active_calls, 2);
        assert_eq!(stats.crisis_flags, 2);
        assert_eq!(stats.active_bots, 2);
        assert_eq!(stats.avg_duration, 100);
    }

    #[test]
    fn average_duration_rounds_to_nearest_second() {
        let now = Utc::now();
        let calls = vec![call(now, Some(1), &[]), call(now, Some(2), &[])];
        assert_eq!(dashboard_stats(&calls, &[], now).avg_duration, 2);
    }
}
