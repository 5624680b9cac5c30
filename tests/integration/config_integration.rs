//! Integration tests for building a logger from configuration

use glean_server::config::{ConfigLoader, OutputTarget};
use glean_server::telemetry::{BackendTestEventEvent, EventsPing};
use glean_server::ConfigError;
use tempfile::TempDir;

use crate::integration::decode_line;

#[test]
fn test_file_output_appends_lines() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("glean.toml");
    let output = temp_dir.path().join("pings.log");

    std::fs::write(
        &config_file,
        format!(
            r#"
[app]
app_id = "config-app"
app_display_version = "2.0"
app_channel = "staging"

[output]
target = "file"
path = "{}"
"#,
            output.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert_eq!(config.output.target, OutputTarget::File);

    let logger = config.build_logger().unwrap();
    let ping = EventsPing {
        metric_name: "from-config".to_string(),
        metric_request_bool: false,
        metric_request_count: 1,
        metric_request_datetime: chrono::Utc::now(),
        event: Some(Box::new(BackendTestEventEvent {
            event_field_string: "z".to_string(),
            event_field_quantity: 9,
            event_field_bool: true,
        })),
    };
    logger.record_events_ping_without_user_info(&ping).unwrap();
    logger.record_events_ping_without_user_info(&ping).unwrap();
    drop(logger);

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);

    let (envelope, payload) = decode_line(lines[0]);
    assert_eq!(envelope["Fields"]["document_namespace"], "config-app");
    assert_eq!(payload["client_info"]["app_display_version"], "2.0");
    assert_eq!(payload["client_info"]["app_channel"], "staging");
    assert_eq!(payload["events"][0]["extra"]["event_field_bool"], "true");
}

#[test]
fn test_unwritable_output_path_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("glean.toml");
    let output = temp_dir.path().join("missing-dir").join("pings.log");

    std::fs::write(
        &config_file,
        format!(
            "[app]\napp_id = \"a\"\n[output]\ntarget = \"file\"\npath = \"{}\"\n",
            output.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let err = config.build_logger().unwrap_err();
    assert!(matches!(err, ConfigError::Output { .. }));
}
