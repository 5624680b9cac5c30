//! End-to-end tests for the `events` ping.

use chrono::{TimeZone, Utc};
use glean_server::telemetry::{BackendTestEventEvent, EventsPing, EventsPingEvent};
use glean_server::{GleanEventsLogger, RecordError, RequestInfo};
use serde_json::json;
use uuid::Uuid;

use crate::integration::{decode_line, logger_with_buffer, test_identity};

fn sample_ping(event: Option<Box<dyn EventsPingEvent>>) -> EventsPing {
    EventsPing {
        metric_name: "hello".to_string(),
        metric_request_bool: true,
        metric_request_count: 3,
        metric_request_datetime: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 15).unwrap(),
        event,
    }
}

fn test_event() -> Box<dyn EventsPingEvent> {
    Box::new(BackendTestEventEvent {
        event_field_string: "x".to_string(),
        event_field_quantity: 5,
        event_field_bool: false,
    })
}

#[test]
fn end_to_end_events_ping() {
    let (logger, buffer) = logger_with_buffer();
    let request = RequestInfo::new("curl/8", "10.0.0.1");
    logger
        .record_events_ping(&request, &sample_ping(Some(test_event())))
        .unwrap();

    let out = buffer.contents();
    assert!(out.ends_with('\n'));
    assert!(!out.ends_with("\n\n"));
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);

    let (envelope, payload) = decode_line(&lines[0]);
    assert_eq!(envelope["Logger"], "glean");
    assert_eq!(envelope["Type"], "glean-server-event");
    assert!(envelope["Timestamp"].as_str().unwrap().parse::<u128>().is_ok());

    let fields = &envelope["Fields"];
    assert_eq!(fields["document_namespace"], "myapp");
    assert_eq!(fields["document_type"], "events");
    assert_eq!(fields["document_version"], "1");
    assert_eq!(fields["user_agent"], "curl/8");
    assert_eq!(fields["ip_address"], "10.0.0.1");
    assert!(fields["payload"].is_string());
    Uuid::parse_str(fields["document_id"].as_str().unwrap()).unwrap();

    assert_eq!(payload["metrics"]["string"]["metric.name"], "hello");
    assert_eq!(payload["metrics"]["boolean"]["metric.request_bool"], true);
    assert_eq!(payload["metrics"]["quantity"]["metric.request_count"], 3);
    assert_eq!(
        payload["metrics"]["datetime"]["metric.request_datetime"],
        "2024-06-01T12:30:15.000Z"
    );

    let event = &payload["events"][0];
    assert_eq!(event["category"], "backend");
    assert_eq!(event["name"], "test_event");
    assert!(event["timestamp"].is_i64());
    assert_eq!(
        event["extra"],
        json!({
            "event_field_string": "x",
            "event_field_quantity": "5",
            "event_field_bool": "false"
        })
    );

    let client_info = &payload["client_info"];
    assert_eq!(client_info["app_display_version"], "1.0");
    assert_eq!(client_info["app_channel"], "prod");
    assert_eq!(client_info["os"], "Unknown");
}

#[test]
fn ping_info_is_constant_seq_with_equal_times() {
    let (logger, buffer) = logger_with_buffer();
    logger
        .record_events_ping_without_user_info(&sample_ping(None))
        .unwrap();

    let (_, payload) = decode_line(&buffer.lines()[0]);
    let ping_info = &payload["ping_info"];
    assert_eq!(ping_info["seq"], 0);
    assert_eq!(ping_info["start_time"], ping_info["end_time"]);

    let start = ping_info["start_time"].as_str().unwrap();
    assert_eq!(start.len(), 24);
    assert!(start.ends_with('Z'));
    chrono::DateTime::parse_from_rfc3339(start).unwrap();
    assert_eq!(payload["events"], json!([]));
}

#[test]
fn without_user_info_matches_empty_request_info() {
    let (logger, buffer) = logger_with_buffer();
    logger
        .record_events_ping_without_user_info(&sample_ping(Some(test_event())))
        .unwrap();
    logger
        .record_events_ping(&RequestInfo::empty(), &sample_ping(Some(test_event())))
        .unwrap();

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    let (first, _) = decode_line(&lines[0]);
    let (second, _) = decode_line(&lines[1]);
    for fields in [&first["Fields"], &second["Fields"]] {
        let object = fields.as_object().unwrap();
        assert!(!object.contains_key("user_agent"));
        assert!(!object.contains_key("ip_address"));
    }

    let keys = |v: &serde_json::Value| {
        v.as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first["Fields"]), keys(&second["Fields"]));
}

#[test]
fn document_ids_differ_between_calls() {
    let (logger, buffer) = logger_with_buffer();
    for _ in 0..50 {
        logger
            .record_events_ping_without_user_info(&sample_ping(None))
            .unwrap();
    }

    let mut ids: Vec<String> = buffer
        .lines()
        .iter()
        .map(|line| {
            let (envelope, _) = decode_line(line);
            envelope["Fields"]["document_id"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(ids.len(), 50);
    for id in &ids {
        Uuid::parse_str(id).unwrap();
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn unconfigured_logger_rejects_every_variant() {
    let logger = GleanEventsLogger::new(test_identity());
    let request = RequestInfo::new("curl/8", "10.0.0.1");

    assert!(matches!(
        logger.record_events_ping(&request, &sample_ping(None)),
        Err(RecordError::NotConfigured)
    ));
    assert!(matches!(
        logger.record_events_ping_without_user_info(&sample_ping(None)),
        Err(RecordError::NotConfigured)
    ));
    assert!(matches!(
        logger.record(
            "events",
            &request,
            glean_server::telemetry::Metrics::new(),
            Vec::new()
        ),
        Err(RecordError::NotConfigured)
    ));
}

#[test]
fn event_timestamp_precedes_emission() {
    let (logger, buffer) = logger_with_buffer();
    let before = Utc::now().timestamp_millis();
    logger
        .record_events_ping_without_user_info(&sample_ping(Some(test_event())))
        .unwrap();

    let (envelope, payload) = decode_line(&buffer.lines()[0]);
    let event_ts = payload["events"][0]["timestamp"].as_i64().unwrap();
    let envelope_ns: u128 = envelope["Timestamp"].as_str().unwrap().parse().unwrap();
    assert!(event_ts >= before);
    assert!((event_ts as u128) <= envelope_ns / 1_000_000);
}
